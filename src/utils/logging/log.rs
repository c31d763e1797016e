//! Log lines for file-level operations
//!
//! Reading and writing tables logs a start and a completion line in the
//! same shape everywhere.

use std::path::Path;
use std::time::Duration;

/// Log the start of an operation on a file
///
/// # Arguments
/// * `operation` - Verb phrase such as "Reading" or "Writing"
/// * `path` - File being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{operation} {}", path.display());
}

/// Log the completion of an operation on a file
///
/// # Arguments
/// * `operation` - Past tense verb such as "read" or "wrote"
/// * `path` - File that was operated on
/// * `rows` - Number of rows handled
/// * `elapsed` - Time taken, if measured
pub fn log_operation_complete(operation: &str, path: &Path, rows: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(elapsed) => log::info!(
            "Successfully {operation} {rows} rows ({}) in {elapsed:?}",
            path.display()
        ),
        None => log::info!("Successfully {operation} {rows} rows ({})", path.display()),
    }
}

/// Log a warning, optionally tied to a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}

/// Log a warning about skipped input rows
pub fn log_skipped_rows(table: &str, skipped: usize) {
    if skipped > 0 {
        log::warn!("Skipped {skipped} {table} rows that could not be converted");
    }
}
