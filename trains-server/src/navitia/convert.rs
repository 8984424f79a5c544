//! Conversion from Navitia response bodies to domain types.
//!
//! Decoding is all-or-nothing: a body either converts completely or yields a
//! single error. The one exception is the stop directory, where entries with
//! an empty label are an upstream quirk and are dropped silently.

use chrono::NaiveDateTime;

use crate::domain::{Departure, Stop};

use super::error::{NavitiaError, Operation};
use super::types::{DeparturesResponse, Pagination, StopAreaItem, StopAreasResponse};

/// Format of `arrival_date_time` literals, e.g. `20210406T223700`.
pub const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// One decoded page of the stop directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopsPage {
    /// Stops with a non-empty label, in upstream order.
    pub stops: Vec<Stop>,
    pub pagination: Pagination,
}

/// Decode a departure board.
pub fn decode_departures(
    body: &str,
    operation: &Operation,
) -> Result<Vec<Departure>, NavitiaError> {
    let response: DeparturesResponse =
        serde_json::from_str(body).map_err(|e| NavitiaError::Decode {
            operation: operation.clone(),
            source: e,
        })?;

    response
        .departures
        .into_iter()
        .map(|item| {
            let arrival = parse_date_time(&item.stop_date_time.arrival_date_time)?;
            Ok(Departure::new(item.display_informations.direction, arrival))
        })
        .collect()
}

/// Decode one page of the stop directory.
pub fn decode_stops_page(body: &str, operation: &Operation) -> Result<StopsPage, NavitiaError> {
    let response: StopAreasResponse =
        serde_json::from_str(body).map_err(|e| NavitiaError::Decode {
            operation: operation.clone(),
            source: e,
        })?;

    Ok(StopsPage {
        stops: response
            .stop_areas
            .into_iter()
            .filter_map(convert_stop)
            .collect(),
        pagination: response.pagination,
    })
}

/// Parse an upstream date-time literal.
pub fn parse_date_time(literal: &str) -> Result<NaiveDateTime, NavitiaError> {
    NaiveDateTime::parse_from_str(literal, DATE_TIME_FORMAT).map_err(|e| {
        NavitiaError::DateParsing {
            literal: literal.to_string(),
            source: e,
        }
    })
}

fn convert_stop(item: StopAreaItem) -> Option<Stop> {
    match item.label {
        Some(label) if !label.is_empty() => Some(Stop::new(item.id, label)),
        _ => None,
    }
}
