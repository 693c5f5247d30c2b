//! Parse prefix lists from text or JSON.
//!
//! Text input holds CIDR tokens separated by whitespace, commas or semicolons.
//! `#` starts a comment that runs to the end of the line.
//! JSON input is an array of CIDR strings.

use crate::models::Prefix;
use regex::Regex;
use std::error::Error;
use std::path::Path;
use std::sync::OnceLock;

/// Name used on the command line for standard input.
pub const STDIN_SOURCE: &str = "-";

static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_separator_regex() -> &'static Regex {
    SEPARATOR_REGEX.get_or_init(|| Regex::new(r"[\s,;]+").expect("Invalid Regex"))
}

/// Parse a text prefix list.
///
/// # Examples
/// ```
/// use cidr_aggregate::input::parse_prefixes;
/// let list = parse_prefixes("10.0.0.0/24, 10.0.1.0/24 # office\n2001:db8::/48").unwrap();
/// assert_eq!(list.len(), 3);
/// ```
pub fn parse_prefixes(text: &str) -> Result<Vec<Prefix>, Box<dyn Error>> {
    let mut prefixes = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or("");
        for token in get_separator_regex()
            .split(content)
            .filter(|t| !t.is_empty())
        {
            let prefix =
                Prefix::new(token).map_err(|e| format!("line {}: '{token}': {e}", n + 1))?;
            prefixes.push(prefix);
        }
    }
    log::trace!("parse_prefixes() got {} prefixes", prefixes.len());
    Ok(prefixes)
}

/// Parse a JSON array of CIDR strings.
pub fn parse_json_prefixes(json: &str) -> Result<Vec<Prefix>, Box<dyn Error>> {
    let prefixes: Vec<Prefix> =
        serde_json::from_str(json).map_err(|e| format!("Error parsing prefix JSON: {e}"))?;
    Ok(prefixes)
}

/// Read prefixes from a file, or from stdin when `source` is `-`.
///
/// Files with a `.json` extension are parsed as JSON, anything else as text.
pub fn read_prefix_source(source: &str) -> Result<Vec<Prefix>, Box<dyn Error>> {
    if source == STDIN_SOURCE {
        let text = std::io::read_to_string(std::io::stdin())
            .map_err(|e| format!("Error reading stdin: {e}"))?;
        let prefixes = parse_prefixes(&text)?;
        log::info!("Read {} prefixes from stdin", prefixes.len());
        return Ok(prefixes);
    }

    let path = Path::new(source);
    if !path.exists() {
        return Err(format!("Input file does not exist: {source}").into());
    }
    let text =
        std::fs::read_to_string(path).map_err(|e| format!("Error reading {source}: {e}"))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        parse_json_prefixes(&text)
    } else {
        parse_prefixes(&text)
    };
    let prefixes = parsed.map_err(|e| format!("{source}: {e}"))?;

    log::info!("Read {} prefixes from {source}", prefixes.len());
    Ok(prefixes)
}

/// Read and concatenate several sources. No sources means stdin.
pub fn read_prefix_sources(sources: &[String]) -> Result<Vec<Prefix>, Box<dyn Error>> {
    if sources.is_empty() {
        return read_prefix_source(STDIN_SOURCE);
    }
    let mut prefixes = Vec::new();
    for source in sources {
        prefixes.extend(read_prefix_source(source)?);
    }
    Ok(prefixes)
}

/// Clear host bits on every prefix, warning about each one that changed.
pub fn mask_host_bits(prefixes: Vec<Prefix>) -> Vec<Prefix> {
    prefixes
        .into_iter()
        .map(|p| {
            let network = p.network();
            if network != p {
                log::warn!("{p} has host bits set, using {network}");
            }
            network
        })
        .collect()
}
