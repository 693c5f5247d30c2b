//! Prefix processing logic.
//!
//! This module contains the aggregation engine:
//! - [`aggregate()`] - containment / adjacency folding of prefixes

mod aggregate;

// Re-export public functions
pub use aggregate::{aggregate, aggregate_single_family, contains, group_by_family, merge_adjacent};
