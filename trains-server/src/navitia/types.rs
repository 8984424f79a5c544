//! Navitia coverage API response DTOs.
//!
//! Only the fields this crate consumes are declared; serde ignores the rest.
//! Every field defaults when absent, so a sparse payload still decodes and
//! the converter decides what is an error.

use serde::Deserialize;

/// Response from `GET /coverage/{region}/stop_areas/{id}/departures`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeparturesResponse {
    pub departures: Vec<DepartureItem>,
}

/// One entry of a departure board.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DepartureItem {
    pub display_informations: DisplayInformations,
    pub stop_date_time: StopDateTime,
}

/// Display metadata of a departure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DisplayInformations {
    /// Terminus shown to passengers.
    pub direction: String,
}

/// Times of a departure at the queried stop.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StopDateTime {
    /// Local date-time literal such as `20210406T223700`.
    pub arrival_date_time: String,
}

/// Response from `GET /coverage/{region}/stop_areas`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StopAreasResponse {
    pub pagination: Pagination,
    pub stop_areas: Vec<StopAreaItem>,
}

/// Paging metadata attached to every directory page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub start_page: u64,
    pub items_on_page: u64,
    pub items_per_page: u64,
    pub total_result: u64,
}

/// One stop area of the directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StopAreaItem {
    pub id: String,
    /// Display label; empty or null for some entries upstream.
    pub label: Option<String>,
}
