//! Web layer for the prediction proxy.
//!
//! Exposes the aggregated predictions over HTTP.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
