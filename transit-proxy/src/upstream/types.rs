//! Upstream API response DTOs.
//!
//! These types map directly to the Train Tracker and Bus Tracker JSON
//! payloads. Only the fields the aggregator reads are modelled; everything
//! else in the upstream records is ignored.

use chrono::NaiveDateTime;
use serde::Deserialize;

/// Response from the Train Tracker arrivals endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainTrackerResponse {
    pub ctatt: TrainTrackerBody,
}

/// The `ctatt` envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainTrackerBody {
    /// Error code, `"0"` on success.
    pub err_cd: Option<String>,

    /// Error description, null on success.
    pub err_nm: Option<String>,

    /// Arrival predictions. Absent or null when the API reports an error.
    pub eta: Option<Vec<TrainEta>>,
}

/// One rail arrival prediction.
///
/// Flags are strings: `"1"` means set, anything else means unset.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainEta {
    /// Route token, e.g. "Red" or "Brn".
    pub rt: String,

    /// Destination name shown on the train.
    #[serde(rename = "destNm")]
    pub destination: String,

    /// When the prediction was generated.
    #[serde(rename = "prdt")]
    pub prediction_time: NaiveDateTime,

    /// Predicted arrival at the station.
    #[serde(rename = "arrT")]
    pub arrival_time: NaiveDateTime,

    /// `"1"` when the prediction comes from the schedule, not a live train.
    #[serde(rename = "isSch")]
    pub is_scheduled: String,

    /// `"1"` when the train is flagged as delayed.
    #[serde(rename = "isDly")]
    pub is_delayed: String,
}

/// Response from the Bus Tracker predictions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BusTrackerResponse {
    #[serde(rename = "bustime-response")]
    pub body: BusTimeBody,
}

/// The `bustime-response` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct BusTimeBody {
    /// Predictions for every route serving the requested stops.
    pub prd: Option<Vec<BusPrediction>>,

    /// Per-stop messages such as "No service scheduled".
    pub error: Option<Vec<BusTimeError>>,
}

/// One bus arrival prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct BusPrediction {
    /// Route token, e.g. "84".
    pub rt: String,

    /// Destination name.
    #[serde(rename = "des")]
    pub destination: String,

    /// Minutes until arrival. Usually numeric, but may be "DUE" or "DLY".
    #[serde(rename = "prdctdn")]
    pub countdown: String,

    /// Whether the vehicle is flagged as delayed.
    #[serde(rename = "dly")]
    pub delayed: bool,
}

/// An informational entry in the Bus Tracker `error` list.
#[derive(Debug, Clone, Deserialize)]
pub struct BusTimeError {
    pub stpid: Option<String>,
    pub rt: Option<String>,
    pub msg: String,
}
