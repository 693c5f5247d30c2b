//! log4rs setup for the command line tool.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

const LOG_PATTERN: &str = "{d(%H:%M:%S)} {h({l:<5})} {t} - {m}{n}";

/// Build the fallback config: everything at `level` and above to stderr.
///
/// stdout is reserved for the prefix list.
pub fn stderr_config(level: LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| format!("Error building log config: {e}"))?;
    Ok(config)
}

/// Initialise logging from a log4rs YAML file when given, else log to stderr at `level`.
pub fn init_logging(level: LevelFilter, log_config: Option<&str>) -> Result<(), Box<dyn Error>> {
    if let Some(file) = log_config {
        if !Path::new(file).exists() {
            return Err(format!("Log config file does not exist: {file}").into());
        }
        log4rs::init_file(file, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {file}: {e}"))?;
        log::debug!("Logging configured from {file}");
        return Ok(());
    }
    log4rs::init_config(stderr_config(level)?)
        .map_err(|e| format!("Error initializing log4rs: {e}"))?;
    Ok(())
}
