//! Terminal summary output.

use crate::models::{AddressFamily, Prefix};
use colored::Colorize;

fn count_family(prefixes: &[Prefix], family: AddressFamily) -> usize {
    prefixes.iter().filter(|p| p.family() == family).count()
}

/// One-line summary of an aggregation run, for stderr.
///
/// # Arguments
/// * `before` - The prefixes read from input
/// * `after` - The aggregated prefixes
pub fn format_summary(before: &[Prefix], after: &[Prefix]) -> String {
    let removed = before.len().saturating_sub(after.len());
    format!(
        "# aggregated {} prefixes into {} (IPv4 {}, IPv6 {}), removed {}",
        before.len().to_string().blue(),
        after.len().to_string().green(),
        count_family(after, AddressFamily::V4),
        count_family(after, AddressFamily::V6),
        removed.to_string().yellow()
    )
}
