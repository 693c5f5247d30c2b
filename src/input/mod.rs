//! Prefix list input.
//!
//! This module reads prefix lists for the aggregation engine:
//! - [`reader`] - text and JSON parsing, file / stdin sources

mod reader;

// Re-export public functions
pub use reader::{
    mask_host_bits, parse_json_prefixes, parse_prefixes, read_prefix_source, read_prefix_sources,
};
