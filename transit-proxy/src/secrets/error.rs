//! Secret lookup error types.

use std::path::PathBuf;

/// Errors that can occur while retrieving API keys.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// Secrets file could not be read
    #[error("failed to read secrets file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Secrets file is not valid JSON or lacks a key
    #[error("failed to parse secrets file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A key is unset or empty
    #[error("secret {0} is not set")]
    Missing(&'static str),
}
