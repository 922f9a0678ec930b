//! Transit arrival prediction proxy.
//!
//! Queries the Train Tracker and Bus Tracker APIs for a set of requested
//! routes and merges both into one document keyed by route, then
//! destination, with an ordered list of arrival estimates for each.

pub mod aggregate;
pub mod config;
pub mod model;
pub mod registry;
pub mod secrets;
pub mod service;
pub mod upstream;
pub mod web;
