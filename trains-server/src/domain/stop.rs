//! Stop directory entries.

use serde::Serialize;

/// A stop area from the upstream directory.
///
/// `id` is kept as the raw upstream string: the directory is a snapshot of
/// whatever the coverage publishes, valid [`StopId`](super::StopId) or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
}

impl Stop {
    /// Create a stop.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
