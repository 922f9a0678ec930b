//! API key lookup.
//!
//! The prediction service depends only on [`SecretSource`]; where the keys
//! come from (a mounted JSON file or environment variables) is decided at
//! startup.

mod env;
mod error;
mod file;

pub use env::{BUS_KEY_VAR, EnvSecretSource, TRAIN_KEY_VAR};
pub use error::SecretError;
pub use file::{DEFAULT_SECRET_PATH, FileSecretSource};

/// Provides the upstream API keys.
pub trait SecretSource: Send + Sync {
    /// Key for the Bus Tracker API.
    fn bus_tracker_api_key(&self) -> Result<String, SecretError>;

    /// Key for the Train Tracker API.
    fn train_tracker_api_key(&self) -> Result<String, SecretError>;
}
