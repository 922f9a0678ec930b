//! Train Tracker arrivals client.

use tracing::debug;

use super::client::Fetcher;
use super::error::UpstreamError;
use super::types::{TrainEta, TrainTrackerResponse};

/// Default Train Tracker arrivals endpoint.
pub const DEFAULT_RAIL_BASE_URL: &str = "https://lapi.transitchicago.com/api/1.0/ttarrivals.aspx";

/// Client for rail arrival predictions.
///
/// Issues exactly one request per call; rail routes are never batched.
#[derive(Debug, Clone)]
pub struct RailClient<F> {
    fetcher: F,
    base_url: String,
}

impl<F: Fetcher> RailClient<F> {
    pub fn new(fetcher: F, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// Fetch arrivals for one route at one station.
    pub async fn arrivals(
        &self,
        api_key: &str,
        route: &str,
        station_id: &str,
    ) -> Result<Vec<TrainEta>, UpstreamError> {
        let body = self
            .fetcher
            .get(
                &self.base_url,
                &[
                    ("key", api_key),
                    ("mapid", station_id),
                    ("rt", route),
                    ("outputType", "JSON"),
                ],
            )
            .await?;

        let etas = parse_rail_body(&body)?;
        debug!(route, station_id, count = etas.len(), "rail arrivals");
        Ok(etas)
    }
}

/// Decode a Train Tracker body into its arrival records.
///
/// A non-zero `errCd` is an error even though the HTTP status was 200.
pub fn parse_rail_body(body: &str) -> Result<Vec<TrainEta>, UpstreamError> {
    let response: TrainTrackerResponse =
        serde_json::from_str(body).map_err(|e| UpstreamError::json(e, body))?;

    let ctatt = response.ctatt;

    if let Some(code) = ctatt.err_cd.filter(|code| code != "0") {
        return Err(UpstreamError::Reported {
            upstream: "train tracker",
            code,
            message: ctatt.err_nm.unwrap_or_default(),
        });
    }

    Ok(ctatt.eta.unwrap_or_default())
}
