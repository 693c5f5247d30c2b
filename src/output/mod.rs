//! Output formatting for aggregated prefixes.
//!
//! This module handles rendering results:
//! - [`format`] - plain text and JSON lists
//! - [`terminal`] - coloured summary line

mod format;
mod terminal;

pub use format::{format_json, format_text, render, OutputFormat};
pub use terminal::format_summary;
