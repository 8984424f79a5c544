//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::error;

use crate::domain::StopId;
use crate::navitia::NavitiaError;

use super::dto::*;
use super::state::AppState;

/// Sent with every departures response; boards go stale within a minute.
const NO_STORE: &str = "no-store, no-cache";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops", get(list_stops))
        .route("/api/stops/:id", get(stop_departures))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Every known stop.
async fn list_stops(State(state): State<AppState>) -> Json<StopsResponse> {
    Json(StopsResponse {
        stops: state.stops.all().await,
    })
}

/// One stop and its upcoming departures.
async fn stop_departures(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let stop_id = StopId::parse(&id).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let stop = state
        .stops
        .get(stop_id.as_str())
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("unknown stop: {stop_id}"),
        })?;

    let departures = state.navitia.get_departures(&stop_id).await?;

    let body = StopDeparturesResponse {
        stop,
        departures: departures.to_vec(),
    };
    Ok(([(header::CACHE_CONTROL, NO_STORE)], Json(body)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// Upstream data could not be obtained; details are only logged
    Unavailable,
}

impl From<NavitiaError> for AppError {
    fn from(e: NavitiaError) -> Self {
        error!(error = %e.chain(), "could not get departures");
        AppError::Unavailable
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "departures are currently unavailable".to_string(),
            ),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
