//! Runtime configuration.
//!
//! Values are taken from defaults, then environment variables (a `.env` file
//! is loaded by `main` first), then command line arguments. Later sources win.

use crate::output::OutputFormat;
use log::LevelFilter;
use std::error::Error;

pub const ENV_FORMAT: &str = "CIDR_AGGREGATE_FORMAT";
pub const ENV_MASK_HOST_BITS: &str = "CIDR_AGGREGATE_MASK_HOST_BITS";
pub const ENV_SUMMARY: &str = "CIDR_AGGREGATE_SUMMARY";
pub const ENV_LOG: &str = "CIDR_AGGREGATE_LOG";
pub const ENV_LOG_CONFIG: &str = "CIDR_AGGREGATE_LOG_CONFIG";

pub const USAGE: &str = "\
Usage: cidr-aggregate [OPTIONS] [FILE]...

Aggregate CIDR prefixes into the smallest equivalent list.
Reads stdin when no FILE is given or FILE is '-'. Files ending in .json
hold a JSON array of CIDR strings; other files hold whitespace, comma or
semicolon separated CIDRs with '#' comments.

Options:
  --format <text|json>  Output format (default text)
  --json                Same as --format json
  --mask                Clear host bits before aggregating (default)
  --no-mask             Keep addresses exactly as given
  --no-summary          Do not print the summary line on stderr
  --log <level>         off, error, warn, info, debug or trace (default warn)
  --log-config <file>   log4rs YAML config, overrides --log
  -h, --help            Print this help";

/// Settings for one run of the command line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Input files; empty means stdin.
    pub inputs: Vec<String>,
    pub format: OutputFormat,
    /// Clear host bits on input prefixes before aggregation.
    pub mask_host_bits: bool,
    /// Print a summary line on stderr.
    pub summary: bool,
    pub log_level: LevelFilter,
    /// Optional log4rs YAML file.
    pub log_config: Option<String>,
    pub help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            inputs: vec![],
            format: OutputFormat::Text,
            mask_host_bits: true,
            summary: true,
            log_level: LevelFilter::Warn,
            log_config: None,
            help: false,
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, Box<dyn Error>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("Invalid boolean for {name}: {other}").into()),
    }
}

fn parse_level(value: &str) -> Result<LevelFilter, Box<dyn Error>> {
    value
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| format!("Invalid log level: {value}").into())
}

impl Config {
    /// Build a config from the process environment and command line.
    pub fn load() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| std::env::var(key).ok())?.apply_args(std::env::args().skip(1))
    }

    /// Build a config from defaults and an environment lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(v) = lookup(ENV_FORMAT) {
            config.format = v.parse()?;
        }
        if let Some(v) = lookup(ENV_MASK_HOST_BITS) {
            config.mask_host_bits = parse_bool(ENV_MASK_HOST_BITS, &v)?;
        }
        if let Some(v) = lookup(ENV_SUMMARY) {
            config.summary = parse_bool(ENV_SUMMARY, &v)?;
        }
        if let Some(v) = lookup(ENV_LOG) {
            config.log_level = parse_level(&v)?;
        }
        if let Some(v) = lookup(ENV_LOG_CONFIG) {
            config.log_config = Some(v);
        }
        Ok(config)
    }

    /// Apply command line arguments (program name already stripped).
    pub fn apply_args<I>(mut self, args: I) -> Result<Config, Box<dyn Error>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => self.help = true,
                "--json" => self.format = OutputFormat::Json,
                "--mask" => self.mask_host_bits = true,
                "--no-mask" => self.mask_host_bits = false,
                "--no-summary" => self.summary = false,
                "--format" => {
                    let v = args.next().ok_or("--format needs a value")?;
                    self.format = v.parse()?;
                }
                "--log" => {
                    let v = args.next().ok_or("--log needs a value")?;
                    self.log_level = parse_level(&v)?;
                }
                "--log-config" => {
                    let v = args.next().ok_or("--log-config needs a value")?;
                    self.log_config = Some(v);
                }
                "-" => self.inputs.push(arg),
                flag if flag.starts_with('-') => {
                    return Err(format!("Unknown option: {flag}").into());
                }
                _ => self.inputs.push(arg),
            }
        }
        Ok(self)
    }
}
