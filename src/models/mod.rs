//! Domain models for prefix aggregation.
//!
//! This module contains the value types the engine consumes and produces:
//! - [`AddressFamily`] - IPv4 / IPv6 classification and widths
//! - [`Prefix`] - an address with a CIDR prefix length

mod family;
mod prefix;

// Re-export public types
pub use family::AddressFamily;
pub use prefix::{cmp_prefix, Prefix};
