//! In-memory stop directory.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::Stop;

#[derive(Debug, Default)]
struct Snapshot {
    stops: Vec<Stop>,
    by_id: HashMap<String, usize>,
}

impl Snapshot {
    fn new(stops: Vec<Stop>) -> Self {
        let by_id = stops
            .iter()
            .enumerate()
            .map(|(i, stop)| (stop.id.clone(), i))
            .collect();
        Self { stops, by_id }
    }
}

/// Thread-safe stop lookup.
///
/// Cloning is cheap and every clone sees the same snapshot. Replacement is
/// atomic: readers see either the old snapshot or the new one, never a mix.
#[derive(Debug, Clone, Default)]
pub struct StopDirectory {
    inner: Arc<RwLock<Snapshot>>,
}

impl StopDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole directory with `stops`.
    ///
    /// Stops missing from `stops` disappear. Returns the new size.
    pub async fn replace_all(&self, stops: Vec<Stop>) -> usize {
        let snapshot = Snapshot::new(stops);
        let count = snapshot.stops.len();

        let mut guard = self.inner.write().await;
        *guard = snapshot;

        count
    }

    /// Look up a stop by its upstream id.
    pub async fn get(&self, id: &str) -> Option<Stop> {
        let guard = self.inner.read().await;
        guard
            .by_id
            .get(id)
            .and_then(|&i| guard.stops.get(i))
            .cloned()
    }

    /// All stops, in upstream order.
    pub async fn all(&self) -> Vec<Stop> {
        let guard = self.inner.read().await;
        guard.stops.clone()
    }

    /// Get the number of stops in the directory.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.stops.len()
    }

    /// Check if the directory is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.stops.is_empty()
    }
}
