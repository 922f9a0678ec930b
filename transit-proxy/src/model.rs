//! Unified prediction model.
//!
//! Both upstream schemas are normalized into these types. Routes and
//! destinations are held as ordered lists and serialized as JSON objects
//! keyed by route token and destination name, in insertion order.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// One estimated arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalEstimate {
    /// Minutes until arrival. `None` when upstream gave no numeric estimate.
    #[serde(rename = "timeInMinutes")]
    pub minutes: Option<i64>,

    /// False for rail predictions taken from the timetable.
    pub real_time_tracked: bool,

    pub delayed: bool,
}

/// Arrivals heading to one destination, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationPrediction {
    pub destination: String,
    pub arrival_times: Vec<ArrivalEstimate>,
}

/// All destinations for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePrediction {
    pub route: String,

    #[serde(rename = "destinationPrediction", serialize_with = "keyed_map")]
    pub destinations: Vec<DestinationPrediction>,
}

impl RoutePrediction {
    /// Look up a destination by name.
    pub fn destination(&self, name: &str) -> Option<&DestinationPrediction> {
        self.destinations.iter().find(|d| d.destination == name)
    }
}

/// The response body for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    #[serde(serialize_with = "keyed_map")]
    pub predictions: Vec<RoutePrediction>,

    /// When the response was assembled.
    pub current_time: DateTime<Utc>,
}

impl PredictionResponse {
    /// Look up a route by token.
    pub fn route(&self, route: &str) -> Option<&RoutePrediction> {
        self.predictions.iter().find(|p| p.route == route)
    }
}

/// Something that serializes as a value under its own name.
trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for RoutePrediction {
    fn key(&self) -> &str {
        &self.route
    }
}

impl Keyed for DestinationPrediction {
    fn key(&self) -> &str {
        &self.destination
    }
}

/// Serialize a list as a map from each item's key to the item.
#[allow(clippy::ptr_arg)]
fn keyed_map<T, S>(items: &Vec<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Keyed + Serialize,
    S: Serializer,
{
    serializer.collect_map(items.iter().map(|item| (item.key(), item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn estimate(minutes: Option<i64>) -> ArrivalEstimate {
        ArrivalEstimate {
            minutes,
            real_time_tracked: true,
            delayed: minutes.is_none(),
        }
    }

    #[test]
    fn serializes_keyed_by_route_and_destination() {
        let response = PredictionResponse {
            predictions: vec![RoutePrediction {
                route: "84".into(),
                destinations: vec![DestinationPrediction {
                    destination: "Caldwell/Central".into(),
                    arrival_times: vec![estimate(Some(4)), estimate(None)],
                }],
            }],
            current_time: Utc.with_ymd_and_hms(2023, 5, 26, 18, 22, 36).unwrap(),
        };

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "predictions": {
                    "84": {
                        "route": "84",
                        "destinationPrediction": {
                            "Caldwell/Central": {
                                "destination": "Caldwell/Central",
                                "arrivalTimes": [
                                    {"timeInMinutes": 4, "realTimeTracked": true, "delayed": false},
                                    {"timeInMinutes": null, "realTimeTracked": true, "delayed": true}
                                ]
                            }
                        }
                    }
                },
                "currentTime": "2023-05-26T18:22:36Z"
            })
        );
    }

    #[test]
    fn keeps_insertion_order() {
        let route = |name: &str| RoutePrediction {
            route: name.into(),
            destinations: vec![],
        };
        let response = PredictionResponse {
            predictions: vec![route("Red"), route("84"), route("Brn")],
            current_time: Utc.with_ymd_and_hms(2023, 5, 26, 18, 22, 36).unwrap(),
        };

        let text = serde_json::to_string(&response).unwrap();
        let red = text.find("\"Red\"").unwrap();
        let bus = text.find("\"84\"").unwrap();
        let brown = text.find("\"Brn\"").unwrap();

        assert!(red < bus && bus < brown, "{text}");
    }

    #[test]
    fn lookups() {
        let response = PredictionResponse {
            predictions: vec![RoutePrediction {
                route: "22".into(),
                destinations: vec![DestinationPrediction {
                    destination: "Howard".into(),
                    arrival_times: vec![estimate(Some(11))],
                }],
            }],
            current_time: Utc::now(),
        };

        let route = response.route("22").unwrap();
        assert_eq!(route.destination("Howard").unwrap().arrival_times.len(), 1);
        assert!(route.destination("Harrison").is_none());
        assert!(response.route("84").is_none());
    }
}
