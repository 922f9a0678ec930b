//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tracing::{error, info};

use crate::model::PredictionResponse;
use crate::service::PredictionError;
use crate::upstream::UpstreamError;

use super::dto::{ErrorResponse, route_tokens};
use super::state::AppState;

/// Create the application router.
///
/// Predictions are served at `/predictions` and at `/`, the path the
/// function trigger used.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(predictions))
        .route("/predictions", get(predictions))
        .route("/health", get(health))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Aggregated predictions for the requested routes.
async fn predictions(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<PredictionResponse>, AppError> {
    let routes = route_tokens(&params);
    info!(routes = ?routes, "prediction request");

    let response = state.predictions.predict(&routes, Utc::now()).await?;

    Ok(Json(response))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// An upstream API failed or returned garbage
    BadGateway { message: String },
    Internal { message: String },
}

impl From<PredictionError> for AppError {
    fn from(e: PredictionError) -> Self {
        match e {
            PredictionError::Upstream(UpstreamError::Mock(_)) | PredictionError::Secret(_) => {
                AppError::Internal {
                    message: e.to_string(),
                }
            }
            PredictionError::Upstream(_) => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
