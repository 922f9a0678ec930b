//! Route registry: maps public route tokens to upstream addressing.
//!
//! Bus routes resolve to one or more stop ids, rail routes to a single
//! station id. The table is built once at startup and shared read-only.

use std::collections::{HashMap, HashSet};

/// A rail route and the station to query for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RailTarget {
    pub route: String,
    pub station_id: String,
}

/// Requested tokens partitioned by transit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSelection {
    /// One entry per distinct rail route, in request order.
    pub rail: Vec<RailTarget>,

    /// Distinct bus routes, in request order.
    pub bus_routes: Vec<String>,

    /// Distinct stop ids across all bus routes, in request order.
    pub bus_stops: Vec<String>,
}

impl RouteSelection {
    /// Whether the bus upstream needs to be called at all.
    pub fn needs_bus(&self) -> bool {
        !self.bus_routes.is_empty() && !self.bus_stops.is_empty()
    }
}

/// Static route → upstream address table.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    bus: HashMap<String, Vec<String>>,
    rail: HashMap<String, String>,
}

impl RouteRegistry {
    /// Build a registry from bus (route → stops) and rail (route → station) tables.
    pub fn new<B, R>(bus: B, rail: R) -> Self
    where
        B: IntoIterator<Item = (String, Vec<String>)>,
        R: IntoIterator<Item = (String, String)>,
    {
        Self {
            bus: bus.into_iter().collect(),
            rail: rail.into_iter().collect(),
        }
    }

    /// The production table for the Chicago deployment.
    pub fn chicago() -> Self {
        let bus: [(&str, &[&str]); 7] = [
            ("84", &["11476"]),
            ("22", &["14792", "14786"]),
            ("50", &["1802"]),
            ("92", &["4796"]),
            ("36", &["5338"]),
            ("147", &["1038"]),
            ("136", &["1038"]),
        ];
        let rail: [(&str, &str); 2] = [("Red", "41380"), ("Brn", "40090")];

        Self::new(
            bus.iter().map(|(route, stops)| {
                (
                    route.to_string(),
                    stops.iter().map(|s| s.to_string()).collect(),
                )
            }),
            rail.iter()
                .map(|(route, station)| (route.to_string(), station.to_string())),
        )
    }

    /// Stop ids for a bus route. Empty if the route is not a bus route.
    pub fn bus_stops(&self, route: &str) -> &[String] {
        self.bus.get(route).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `route` is a registered bus route.
    pub fn is_bus_route(&self, route: &str) -> bool {
        self.bus.contains_key(route)
    }

    /// Station id for a rail route.
    pub fn rail_station(&self, route: &str) -> Option<&str> {
        self.rail.get(route).map(String::as_str)
    }

    /// Partition requested tokens into rail targets and bus routes/stops.
    ///
    /// Unknown tokens are dropped. Repeats are collapsed so that a token
    /// requested twice does not cause a second identical upstream call.
    pub fn select<S: AsRef<str>>(&self, tokens: &[S]) -> RouteSelection {
        let mut selection = RouteSelection::default();
        let mut seen_rail = HashSet::new();
        let mut seen_bus = HashSet::new();
        let mut seen_stops = HashSet::new();

        for token in tokens.iter().map(|t| t.as_ref()) {
            if let Some(station) = self.rail_station(token)
                && seen_rail.insert(token)
            {
                selection.rail.push(RailTarget {
                    route: token.to_string(),
                    station_id: station.to_string(),
                });
            }

            if self.is_bus_route(token) && seen_bus.insert(token) {
                selection.bus_routes.push(token.to_string());
                for stop in self.bus_stops(token) {
                    if seen_stops.insert(stop.as_str()) {
                        selection.bus_stops.push(stop.clone());
                    }
                }
            }
        }

        selection
    }
}
