use cidr_aggregate::config::{Config, USAGE};
use cidr_aggregate::logging::init_logging;
use cidr_aggregate::output::{format_summary, render};
use cidr_aggregate::run;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let config = Config::load()?;
    if config.help {
        println!("{USAGE}");
        return Ok(());
    }
    init_logging(config.log_level, config.log_config.as_deref())?;
    log::info!("#Start main()");

    let report = run(&config)?;
    println!("{}", render(&report.output, config.format)?);
    if config.summary {
        eprintln!("{}", format_summary(&report.input, &report.output));
    }

    Ok(())
}
