//! JSON-file backed secrets.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::SecretSource;
use super::error::SecretError;

/// Where the secrets file is mounted unless `SECRET_PATH` says otherwise.
pub const DEFAULT_SECRET_PATH: &str = "/etc/secrets/gtfs_secrets.json";

/// On-disk layout of the secrets file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Secrets {
    train_tracker_api_key: String,
    bus_tracker_api_key: String,
}

/// Reads keys from a JSON file.
///
/// The file is re-read on every lookup so rotated keys take effect without
/// a restart.
#[derive(Debug, Clone)]
pub struct FileSecretSource {
    path: PathBuf,
}

impl FileSecretSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the secrets file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Secrets, SecretError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| SecretError::Io {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|e| SecretError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

impl Default for FileSecretSource {
    fn default() -> Self {
        Self::new(DEFAULT_SECRET_PATH)
    }
}

impl SecretSource for FileSecretSource {
    fn bus_tracker_api_key(&self) -> Result<String, SecretError> {
        non_empty(self.load()?.bus_tracker_api_key, "busTrackerApiKey")
    }

    fn train_tracker_api_key(&self) -> Result<String, SecretError> {
        non_empty(self.load()?.train_tracker_api_key, "trainTrackerApiKey")
    }
}

fn non_empty(value: String, name: &'static str) -> Result<String, SecretError> {
    if value.is_empty() {
        Err(SecretError::Missing(name))
    } else {
        Ok(value)
    }
}
