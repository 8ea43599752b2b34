use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures that abort a run before any ledger is touched.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("session results file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read session results file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session results file {} is not readable as delimited text", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Add context to ledger read errors
pub fn read_context(kind: &str, path: &Path) -> String {
    format!("Failed to read {} from {}", kind, path.display())
}

/// Add context to ledger write errors
pub fn write_context(kind: &str, path: &Path) -> String {
    format!("Failed to write {} to {}", kind, path.display())
}
