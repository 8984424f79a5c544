//! Navitia coverage API client.
//!
//! This module provides an HTTP client for a Navitia coverage API (the SNCF
//! deployment by default), which publishes departure boards and the stop
//! area directory.
//!
//! Key characteristics:
//! - The API token travels as the username of the request URL
//! - Departure boards are cached per stop for one minute; failures are never
//!   cached
//! - The stop directory is paginated and is fetched whole or not at all
//! - Some stop areas come back with an empty label; they are dropped

mod cache;
mod client;
mod convert;
mod error;
mod paginate;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{Clock, DEFAULT_TTL, SystemClock, TtlCache};
pub use client::{DEFAULT_BASE_URL, NavitiaClient, NavitiaConfig};
pub use convert::{DATE_TIME_FORMAT, StopsPage, decode_departures, decode_stops_page};
pub use error::{NavitiaError, Operation, TransportError};
pub use paginate::collect_pages;
pub use types::{
    DepartureItem, DeparturesResponse, DisplayInformations, Pagination, StopAreaItem,
    StopAreasResponse, StopDateTime,
};
