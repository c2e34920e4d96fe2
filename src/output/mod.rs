//! Output formatting module
//!
//! Renders structured run results for console and CI logs.

mod formatter;

pub use formatter::{write_summary_to_file, OutputFormat, ResultFormatter};
