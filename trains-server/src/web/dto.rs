//! Response bodies of the JSON API.

use serde::Serialize;

use crate::domain::{Departure, Stop};

/// Body of `GET /api/stops`.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    pub stops: Vec<Stop>,
}

/// Body of `GET /api/stops/{id}`.
#[derive(Debug, Serialize)]
pub struct StopDeparturesResponse {
    pub stop: Stop,
    pub departures: Vec<Departure>,
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
