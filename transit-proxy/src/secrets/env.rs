//! Environment-variable backed secrets.

use super::SecretSource;
use super::error::SecretError;

/// Variable holding the Bus Tracker key.
pub const BUS_KEY_VAR: &str = "BUS_TRACKER_API_KEY";

/// Variable holding the Train Tracker key.
pub const TRAIN_KEY_VAR: &str = "TRAIN_TRACKER_API_KEY";

/// Reads keys from environment variables at lookup time.
#[derive(Debug, Clone, Copy)]
pub struct EnvSecretSource {
    lookup: fn(&str) -> Option<String>,
}

impl EnvSecretSource {
    /// Read from the process environment.
    pub fn new() -> Self {
        Self::with_lookup(|name| std::env::var(name).ok())
    }

    /// Read through a custom lookup function.
    pub fn with_lookup(lookup: fn(&str) -> Option<String>) -> Self {
        Self { lookup }
    }

    fn get(&self, name: &'static str) -> Result<String, SecretError> {
        (self.lookup)(name)
            .filter(|value| !value.is_empty())
            .ok_or(SecretError::Missing(name))
    }
}

impl Default for EnvSecretSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretSource for EnvSecretSource {
    fn bus_tracker_api_key(&self) -> Result<String, SecretError> {
        self.get(BUS_KEY_VAR)
    }

    fn train_tracker_api_key(&self) -> Result<String, SecretError> {
        self.get(TRAIN_KEY_VAR)
    }
}
