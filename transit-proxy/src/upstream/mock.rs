//! Mock fetcher for running without API access.
//!
//! Serves canned upstream payloads as if they were live responses, and
//! records every request so tests can assert on call counts and parameters.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::client::Fetcher;
use super::error::UpstreamError;

/// A request seen by [`MockFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// First value of a query parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Fetcher that answers from pre-loaded bodies.
///
/// Rail bodies are keyed by station id (`mapid`), bus bodies by the
/// comma-joined stop list (`stpid`) exactly as the bus client sends it.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    rail: Arc<HashMap<String, String>>,
    bus: Arc<HashMap<String, String>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockFetcher {
    /// Load canned bodies from a directory.
    ///
    /// Expects `rail/{mapid}.json` and `bus/{stpid}.json`, e.g.
    /// `rail/41380.json` or `bus/14792,14786.json`. Either subdirectory may
    /// be missing, but at least one body must be found.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, UpstreamError> {
        let data_dir = data_dir.as_ref();
        let rail = load_bodies(&data_dir.join("rail"))?;
        let bus = load_bodies(&data_dir.join("bus"))?;

        if rail.is_empty() && bus.is_empty() {
            return Err(UpstreamError::Mock(format!(
                "no mock response files found in {:?}",
                data_dir
            )));
        }

        Ok(Self {
            rail: Arc::new(rail),
            bus: Arc::new(bus),
            requests: Arc::default(),
        })
    }

    /// Add a rail body for a station id.
    pub fn with_rail(mut self, station_id: impl Into<String>, body: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.rail).insert(station_id.into(), body.into());
        self
    }

    /// Add a bus body for a comma-joined stop list.
    pub fn with_bus(mut self, stop_ids: impl Into<String>, body: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.bus).insert(stop_ids.into(), body.into());
        self
    }

    /// All requests served so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn record(&self, url: &str, query: &[(&str, &str)]) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                query: query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            });
        }
    }

    fn lookup(&self, query: &[(&str, &str)]) -> Result<String, UpstreamError> {
        let param = |name: &str| query.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);

        let (table, key) = if let Some(station) = param("mapid") {
            (&self.rail, station)
        } else if let Some(stops) = param("stpid") {
            (&self.bus, stops)
        } else {
            return Err(UpstreamError::Mock(
                "request has neither mapid nor stpid".to_string(),
            ));
        };

        table.get(key).cloned().ok_or_else(|| UpstreamError::Api {
            status: 404,
            message: format!(
                "no mock data for {key}. Available: {:?}",
                table.keys().collect::<Vec<_>>()
            ),
        })
    }
}

impl Fetcher for MockFetcher {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, UpstreamError> {
        self.record(url, query);
        let body = self.lookup(query)?;
        debug!(url, bytes = body.len(), "mock response");
        Ok(body)
    }
}

/// Read every `.json` file in `dir`, keyed by file stem.
fn load_bodies(dir: &Path) -> Result<HashMap<String, String>, UpstreamError> {
    let mut bodies = HashMap::new();

    if !dir.is_dir() {
        return Ok(bodies);
    }

    let entries = std::fs::read_dir(dir).map_err(|e| {
        UpstreamError::Mock(format!("failed to read mock data directory {:?}: {}", dir, e))
    })?;

    for entry in entries {
        let entry = entry
            .map_err(|e| UpstreamError::Mock(format!("failed to read directory entry: {}", e)))?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let key = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| UpstreamError::Mock(format!("invalid filename: {:?}", path)))?
            .to_string();

        let body = std::fs::read_to_string(&path)
            .map_err(|e| UpstreamError::Mock(format!("failed to read {:?}: {}", path, e)))?;

        bodies.insert(key, body);
    }

    Ok(bodies)
}
