//! Plain text and JSON rendering of prefix lists.

use crate::models::Prefix;
use itertools::Itertools;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Output format of the prefix list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One CIDR per line.
    #[default]
    Text,
    /// JSON array of CIDR strings.
    Json,
}

impl FromStr for OutputFormat {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {other} (expected text or json)").into()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One CIDR per line, no trailing newline.
pub fn format_text(prefixes: &[Prefix]) -> String {
    prefixes.iter().join("\n")
}

/// Pretty-printed JSON array of CIDR strings.
pub fn format_json(prefixes: &[Prefix]) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(prefixes)
        .map_err(|e| format!("Error serializing JSON: {e}"))?;
    Ok(json)
}

pub fn render(prefixes: &[Prefix], format: OutputFormat) -> Result<String, Box<dyn Error>> {
    match format {
        OutputFormat::Text => Ok(format_text(prefixes)),
        OutputFormat::Json => format_json(prefixes),
    }
}
