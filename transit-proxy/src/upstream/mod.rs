//! Clients for the two upstream arrival-prediction APIs.
//!
//! The rail service (Train Tracker) is queried once per rail route, keyed by
//! station id. The bus service (Bus Tracker) is queried at most once per
//! request with every requested stop id batched into a single call; its
//! response covers all routes serving those stops, so callers filter by
//! route afterwards.
//!
//! Both APIs authenticate with a `key` query parameter and return JSON when
//! asked to. Transport is abstracted behind [`Fetcher`] so the clients can
//! be driven by canned payloads in tests.

mod bus;
mod client;
mod error;
mod mock;
mod rail;
mod types;

pub use bus::{BusClient, DEFAULT_BUS_BASE_URL, parse_bus_body};
pub use client::{Fetcher, HttpFetcher, UpstreamConfig, UpstreamFetcher};
pub use error::UpstreamError;
pub use mock::{MockFetcher, RecordedRequest};
pub use rail::{DEFAULT_RAIL_BASE_URL, RailClient, parse_rail_body};
pub use types::{
    BusPrediction, BusTimeBody, BusTimeError, BusTrackerResponse, TrainEta, TrainTrackerBody,
    TrainTrackerResponse,
};
