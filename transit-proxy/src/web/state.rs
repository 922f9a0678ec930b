//! Application state for the web layer.

use std::sync::Arc;

use crate::service::PredictionService;
use crate::upstream::UpstreamFetcher;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Prediction service over the configured upstream fetcher
    pub predictions: Arc<PredictionService<UpstreamFetcher>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(predictions: PredictionService<UpstreamFetcher>) -> Self {
        Self {
            predictions: Arc::new(predictions),
        }
    }
}
