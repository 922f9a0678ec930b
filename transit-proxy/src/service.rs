//! Per-request orchestration: resolve routes, call upstreams, merge.
//!
//! Rail routes are fetched concurrently, one request each, alongside the
//! single batched bus request. Any upstream failure fails the whole
//! request; there is no partial result.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate_bus, aggregate_rail};
use crate::model::{PredictionResponse, RoutePrediction};
use crate::registry::{RailTarget, RouteRegistry, RouteSelection};
use crate::secrets::{SecretError, SecretSource};
use crate::upstream::{BusClient, Fetcher, RailClient, UpstreamConfig, UpstreamError};

/// Why a prediction request failed.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("secret lookup failed: {0}")]
    Secret(#[from] SecretError),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] UpstreamError),
}

/// Answers prediction requests against both upstreams.
pub struct PredictionService<F> {
    registry: Arc<RouteRegistry>,
    rail: RailClient<F>,
    bus: BusClient<F>,
    secrets: Arc<dyn SecretSource>,
}

impl<F: Fetcher + Clone> PredictionService<F> {
    pub fn new(
        registry: Arc<RouteRegistry>,
        fetcher: F,
        config: &UpstreamConfig,
        secrets: Arc<dyn SecretSource>,
    ) -> Self {
        Self {
            registry,
            rail: RailClient::new(fetcher.clone(), &config.rail_base_url),
            bus: BusClient::new(fetcher, &config.bus_base_url),
            secrets,
        }
    }
}

impl<F: Fetcher> PredictionService<F> {
    /// Build the unified prediction document for the requested route tokens.
    ///
    /// Keys are looked up before any upstream call, and only for the modes
    /// the request actually needs.
    pub async fn predict<S: AsRef<str>>(
        &self,
        routes: &[S],
        now: DateTime<Utc>,
    ) -> Result<PredictionResponse, PredictionError> {
        let selection = self.registry.select(routes);
        debug!(
            rail = selection.rail.len(),
            bus_routes = selection.bus_routes.len(),
            bus_stops = selection.bus_stops.len(),
            "resolved routes"
        );

        let rail_key = if selection.rail.is_empty() {
            None
        } else {
            Some(self.secrets.train_tracker_api_key()?)
        };
        let bus_key = if selection.needs_bus() {
            Some(self.secrets.bus_tracker_api_key()?)
        } else {
            None
        };

        let (rail, bus) = tokio::try_join!(
            self.fetch_rail(rail_key.as_deref(), &selection),
            self.fetch_bus(bus_key.as_deref(), &selection)
        )?;

        let response = assemble(routes, rail, bus, now);
        info!(
            requested = routes.len(),
            returned = response.predictions.len(),
            "predictions assembled"
        );
        Ok(response)
    }

    async fn fetch_rail(
        &self,
        api_key: Option<&str>,
        selection: &RouteSelection,
    ) -> Result<Vec<RoutePrediction>, UpstreamError> {
        let Some(api_key) = api_key else {
            return Ok(Vec::new());
        };

        let routes = try_join_all(
            selection
                .rail
                .iter()
                .map(|target| self.fetch_rail_route(api_key, target)),
        )
        .await?;

        Ok(routes.into_iter().flatten().collect())
    }

    async fn fetch_rail_route(
        &self,
        api_key: &str,
        target: &RailTarget,
    ) -> Result<Option<RoutePrediction>, UpstreamError> {
        let etas = self
            .rail
            .arrivals(api_key, &target.route, &target.station_id)
            .await
            .inspect_err(|e| warn!(route = %target.route, error = %e, "rail request failed"))?;

        Ok(aggregate_rail(&target.route, &etas))
    }

    async fn fetch_bus(
        &self,
        api_key: Option<&str>,
        selection: &RouteSelection,
    ) -> Result<Vec<RoutePrediction>, UpstreamError> {
        let Some(api_key) = api_key else {
            return Ok(Vec::new());
        };

        let predictions = self
            .bus
            .predictions(api_key, &selection.bus_routes, &selection.bus_stops)
            .await
            .inspect_err(|e| warn!(error = %e, "bus request failed"))?;

        Ok(aggregate_bus(&selection.bus_routes, &predictions))
    }
}

/// Merge rail and bus predictions into one response.
///
/// Routes appear in first-seen order of `requested`. If a token resolved in
/// both modes, the bus prediction replaces the rail one.
pub fn assemble<S: AsRef<str>>(
    requested: &[S],
    rail: Vec<RoutePrediction>,
    bus: Vec<RoutePrediction>,
    now: DateTime<Utc>,
) -> PredictionResponse {
    let mut rail: HashMap<String, RoutePrediction> =
        rail.into_iter().map(|p| (p.route.clone(), p)).collect();
    let mut bus: HashMap<String, RoutePrediction> =
        bus.into_iter().map(|p| (p.route.clone(), p)).collect();

    let mut predictions = Vec::new();
    for token in requested.iter().map(|t| t.as_ref()) {
        let prediction = match (rail.remove(token), bus.remove(token)) {
            (Some(_), Some(bus)) => {
                warn!(route = token, "route resolved as both rail and bus, using bus");
                Some(bus)
            }
            (rail, bus) => rail.or(bus),
        };
        predictions.extend(prediction);
    }

    PredictionResponse {
        predictions,
        current_time: now,
    }
}
