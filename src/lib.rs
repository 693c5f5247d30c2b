//! Aggregate CIDR prefixes into the smallest equivalent list.
//!
//! Overlapping prefixes are dropped and sibling prefixes are merged into their
//! parent, repeatedly, so the result covers exactly the input address space.
//!
//! ```
//! use cidr_aggregate::{aggregate, models::Prefix};
//! let input: Vec<Prefix> = ["192.168.0.0/24", "192.168.1.0/24", "192.168.2.0/23"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//! assert_eq!(aggregate(input).unwrap(), vec!["192.168.0.0/22".parse::<Prefix>().unwrap()]);
//! ```

pub mod bits;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

use config::Config;
use models::Prefix;
use std::error::Error;

pub use error::PrefixError;
pub use processing::{aggregate, aggregate_single_family, contains, group_by_family, merge_adjacent};

/// Input and output of one aggregation run.
#[derive(Debug)]
pub struct Report {
    pub input: Vec<Prefix>,
    pub output: Vec<Prefix>,
}

/// Read all configured sources and aggregate them.
pub fn run(config: &Config) -> Result<Report, Box<dyn Error>> {
    let mut input = input::read_prefix_sources(&config.inputs)?;
    if config.mask_host_bits {
        input = input::mask_host_bits(input);
    }
    let output = aggregate(input.clone())?;
    log::info!("Aggregated {} prefixes into {}", input.len(), output.len());
    Ok(Report { input, output })
}
