//! Stop directory.
//!
//! Holds the snapshot of every stop fetched from the coverage API, seeded at
//! startup and refreshed periodically. Each successful fetch replaces the
//! whole snapshot.

mod directory;
mod seed;

pub use directory::StopDirectory;
pub use seed::{refresh, seed_if_empty};
