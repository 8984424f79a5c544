//! Web layer for the departure monitor.
//!
//! Provides a small JSON API over the stop directory and the Navitia client.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
