//! Progress bars for cohort evaluation and file loading
//!
//! Thin wrappers around indicatif so that every bar in the binary shares
//! the same look.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Template for bars with a known length
pub const MAIN_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Template for spinners without a known length
pub const SPINNER_TEMPLATE: &str = "{spinner:.green} {elapsed_precise} {msg}";

/// Create a progress bar over `length` items
///
/// # Arguments
/// * `length` - Total number of items
/// * `description` - Optional initial message
#[must_use]
pub fn create_main_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template(MAIN_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    let pb = ProgressBar::new(length).with_style(style);
    if let Some(description) = description {
        pb.set_message(description.to_string());
    }
    pb
}

/// Create a ticking spinner for work of unknown length
#[must_use]
pub fn create_spinner(message: Option<&str>) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let pb = ProgressBar::new_spinner().with_style(style);
    if let Some(message) = message {
        pb.set_message(message.to_string());
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a progress bar, optionally replacing its message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    match message {
        Some(message) => pb.finish_with_message(message.to_string()),
        None => pb.finish(),
    }
}
