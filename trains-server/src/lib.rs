//! Train departure monitor server.
//!
//! Shows upcoming departures and a directory of stops, fetched from a
//! Navitia coverage API.

pub mod config;
pub mod domain;
pub mod navitia;
pub mod stops;
pub mod web;
