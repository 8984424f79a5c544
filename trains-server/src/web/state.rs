//! Application state for the web layer.

use std::sync::Arc;

use crate::navitia::NavitiaClient;
use crate::stops::StopDirectory;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Navitia API client, with its departure cache
    pub navitia: Arc<NavitiaClient>,

    /// Snapshot of known stops
    pub stops: StopDirectory,
}

impl AppState {
    /// Create a new app state.
    pub fn new(navitia: Arc<NavitiaClient>, stops: StopDirectory) -> Self {
        Self { navitia, stops }
    }
}
