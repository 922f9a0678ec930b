//! Bus Tracker predictions client.

use tracing::debug;

use super::client::Fetcher;
use super::error::UpstreamError;
use super::types::{BusPrediction, BusTrackerResponse};

/// Default Bus Tracker predictions endpoint.
pub const DEFAULT_BUS_BASE_URL: &str =
    "https://www.ctabustracker.com/bustime/api/v2/getpredictions";

/// Client for bus arrival predictions.
#[derive(Debug, Clone)]
pub struct BusClient<F> {
    fetcher: F,
    base_url: String,
}

impl<F: Fetcher> BusClient<F> {
    pub fn new(fetcher: F, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// Fetch predictions for every stop in one request.
    ///
    /// Returns an empty list without touching the network when either
    /// `routes` or `stop_ids` is empty. The result covers every route
    /// serving the stops; filtering by route is the caller's job.
    pub async fn predictions(
        &self,
        api_key: &str,
        routes: &[String],
        stop_ids: &[String],
    ) -> Result<Vec<BusPrediction>, UpstreamError> {
        if routes.is_empty() || stop_ids.is_empty() {
            return Ok(Vec::new());
        }

        let stops = stop_ids.join(",");
        let body = self
            .fetcher
            .get(
                &self.base_url,
                &[("key", api_key), ("stpid", &stops), ("format", "json")],
            )
            .await?;

        let predictions = parse_bus_body(&body)?;
        debug!(stops = %stops, count = predictions.len(), "bus predictions");
        Ok(predictions)
    }
}

/// Decode a Bus Tracker body into its prediction records.
///
/// Entries in the `error` list ("No service scheduled" and friends) are
/// per-stop notices, not failures.
pub fn parse_bus_body(body: &str) -> Result<Vec<BusPrediction>, UpstreamError> {
    let response: BusTrackerResponse =
        serde_json::from_str(body).map_err(|e| UpstreamError::json(e, body))?;

    for notice in response.body.error.iter().flatten() {
        debug!(
            stpid = notice.stpid.as_deref().unwrap_or_default(),
            rt = notice.rt.as_deref().unwrap_or_default(),
            msg = %notice.msg,
            "bus tracker notice"
        );
    }

    Ok(response.body.prd.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::MockFetcher;

    const BODY: &str = r#"{"bustime-response":{"prd":[
        {"tmstmp":"20230526 13:22","stpid":"14792","rt":"22","des":"Harrison","prdctdn":"2","dly":false}
    ]}}"#;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn batches_stops_into_one_request() {
        let fetcher = MockFetcher::default().with_bus("14792,14786", BODY);
        let client = BusClient::new(fetcher.clone(), DEFAULT_BUS_BASE_URL);

        let predictions = client
            .predictions("secret", &strings(&["22"]), &strings(&["14792", "14786"]))
            .await
            .unwrap();
        assert_eq!(predictions.len(), 1);

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, DEFAULT_BUS_BASE_URL);
        assert_eq!(requests[0].param("key"), Some("secret"));
        assert_eq!(requests[0].param("stpid"), Some("14792,14786"));
        assert_eq!(requests[0].param("format"), Some("json"));
    }

    #[tokio::test]
    async fn empty_input_short_circuits() {
        let fetcher = MockFetcher::default();
        let client = BusClient::new(fetcher.clone(), DEFAULT_BUS_BASE_URL);

        let no_routes = client
            .predictions("secret", &[], &strings(&["1802"]))
            .await
            .unwrap();
        let no_stops = client
            .predictions("secret", &strings(&["50"]), &[])
            .await
            .unwrap();

        assert!(no_routes.is_empty());
        assert!(no_stops.is_empty());
        assert!(fetcher.requests().is_empty());
    }

    #[test]
    fn notices_without_predictions_are_empty() {
        let body = r#"{"bustime-response":{"error":[{"stpid":"1038","msg":"No service scheduled"}]}}"#;
        assert!(parse_bus_body(body).unwrap().is_empty());
    }

    #[test]
    fn malformed_body_is_json_error() {
        let body = r#"{"bustime-response":{"prd":[{"rt":"22"}]}}"#;
        assert!(matches!(
            parse_bus_body(body),
            Err(UpstreamError::Json { .. })
        ));
    }
}
