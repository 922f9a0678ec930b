//! Normalization of upstream records into the unified model.
//!
//! Rail and bus upstreams disagree on almost everything: rail gives two
//! naive timestamps and string flags, bus gives a countdown string and a
//! boolean. Both end up as [`ArrivalEstimate`]s grouped by destination,
//! preserving upstream order within each group.

use std::collections::{HashMap, HashSet};

use crate::model::{ArrivalEstimate, DestinationPrediction, RoutePrediction};
use crate::upstream::{BusPrediction, TrainEta};

/// Upstream flag value meaning "set".
const FLAG_SET: &str = "1";

/// Normalize one rail record.
///
/// Minutes are `arrival - prediction`, truncated toward zero. Both
/// timestamps are upstream-local and compared as-is.
pub fn rail_estimate(eta: &TrainEta) -> ArrivalEstimate {
    let minutes = eta
        .arrival_time
        .signed_duration_since(eta.prediction_time)
        .num_minutes();

    ArrivalEstimate {
        minutes: Some(minutes),
        real_time_tracked: eta.is_scheduled != FLAG_SET,
        delayed: eta.is_delayed == FLAG_SET,
    }
}

/// Normalize one bus record.
///
/// A countdown that isn't an integer ("DUE", "DLY") has no minute value.
/// Bus predictions are always tracked vehicles.
pub fn bus_estimate(prediction: &BusPrediction) -> ArrivalEstimate {
    ArrivalEstimate {
        minutes: prediction.countdown.parse().ok(),
        real_time_tracked: true,
        delayed: prediction.delayed,
    }
}

/// Build the prediction for one rail route from its upstream response.
///
/// Records for other routes are ignored. Returns `None` when nothing is left.
pub fn aggregate_rail(route: &str, etas: &[TrainEta]) -> Option<RoutePrediction> {
    let destinations = group_by_destination(
        etas.iter()
            .filter(|eta| eta.rt == route)
            .map(|eta| (eta.destination.as_str(), rail_estimate(eta))),
    );

    (!destinations.is_empty()).then(|| RoutePrediction {
        route: route.to_string(),
        destinations,
    })
}

/// Build per-route predictions from one batched bus response.
///
/// Only `routes` are kept, in the order given; routes with no matching
/// predictions are omitted.
pub fn aggregate_bus<S: AsRef<str>>(
    routes: &[S],
    predictions: &[BusPrediction],
) -> Vec<RoutePrediction> {
    let mut seen = HashSet::new();

    routes
        .iter()
        .map(|route| route.as_ref())
        .filter(|route| seen.insert(*route))
        .filter_map(|route| {
            let destinations = group_by_destination(
                predictions
                    .iter()
                    .filter(|p| p.rt == route)
                    .map(|p| (p.destination.as_str(), bus_estimate(p))),
            );

            (!destinations.is_empty()).then(|| RoutePrediction {
                route: route.to_string(),
                destinations,
            })
        })
        .collect()
}

/// Group estimates by destination in first-seen order.
fn group_by_destination<'a>(
    estimates: impl IntoIterator<Item = (&'a str, ArrivalEstimate)>,
) -> Vec<DestinationPrediction> {
    let mut groups: Vec<DestinationPrediction> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (destination, estimate) in estimates {
        let slot = *index.entry(destination).or_insert_with(|| {
            groups.push(DestinationPrediction {
                destination: destination.to_string(),
                arrival_times: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].arrival_times.push(estimate);
    }

    groups
}
