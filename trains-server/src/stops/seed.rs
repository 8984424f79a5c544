//! Filling the stop directory from the coverage API.

use tracing::{info, warn};

use crate::navitia::{NavitiaClient, NavitiaError};

use super::directory::StopDirectory;

/// Fetch the full stop directory and swap it in.
///
/// On failure the directory is left exactly as it was and the error is
/// returned.
pub async fn refresh(
    client: &NavitiaClient,
    directory: &StopDirectory,
) -> Result<usize, NavitiaError> {
    let stops = client.get_stops().await?;
    Ok(directory.replace_all(stops).await)
}

/// Populate an empty directory at startup.
///
/// Never fails: a fetch error is logged and the server carries on with the
/// directory it has. Returns whether the directory was filled.
pub async fn seed_if_empty(client: &NavitiaClient, directory: &StopDirectory) -> bool {
    if !directory.is_empty().await {
        return false;
    }

    info!("no stop data found, fetching stop directory");
    match refresh(client, directory).await {
        Ok(count) => {
            info!(count, "loaded stop directory");
            true
        }
        Err(e) => {
            warn!(error = %e.chain(), "failed to fetch stop directory");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stop;
    use crate::navitia::NavitiaConfig;
    use crate::navitia::testing::{Reply, Upstream};

    const STOPS: &str = include_str!("../../testdata/stops.json");
    const STOPS_PATH: &str = "/coverage/sncf/stop_areas?count=1000&start_page=0";

    fn client_for(upstream: &Upstream) -> NavitiaClient {
        let config = NavitiaConfig::new("test").with_base_url(upstream.base_url());
        NavitiaClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn seeds_empty_directory() {
        let upstream = Upstream::start().await;
        upstream.serve(STOPS_PATH, Reply::Json(STOPS));
        let client = client_for(&upstream);
        let directory = StopDirectory::new();

        assert!(seed_if_empty(&client, &directory).await);
        assert_eq!(directory.len().await, 3);
    }

    #[tokio::test]
    async fn leaves_populated_directory_alone() {
        let upstream = Upstream::start().await;
        upstream.serve(STOPS_PATH, Reply::Json(STOPS));
        let client = client_for(&upstream);
        let directory = StopDirectory::new();
        directory.replace_all(vec![Stop::new("a", "A")]).await;

        assert!(!seed_if_empty(&client, &directory).await);
        assert_eq!(directory.len().await, 1);
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn seeding_failure_keeps_directory_empty() {
        let upstream = Upstream::start().await;
        upstream.serve(STOPS_PATH, Reply::Status(503));
        let client = client_for(&upstream);
        let directory = StopDirectory::new();

        assert!(!seed_if_empty(&client, &directory).await);
        assert!(directory.is_empty().await);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let upstream = Upstream::start().await;
        upstream.serve(STOPS_PATH, Reply::Json(STOPS));
        let client = client_for(&upstream);
        let directory = StopDirectory::new();

        assert_eq!(refresh(&client, &directory).await.unwrap(), 3);

        upstream.serve(STOPS_PATH, Reply::Json("{"));
        assert!(refresh(&client, &directory).await.is_err());
        assert_eq!(directory.len().await, 3);
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot() {
        let upstream = Upstream::start().await;
        upstream.serve(STOPS_PATH, Reply::Json(STOPS));
        let client = client_for(&upstream);
        let directory = StopDirectory::new();
        directory
            .replace_all(vec![Stop::new("stop_area:SNCF:1", "Gone")])
            .await;

        refresh(&client, &directory).await.unwrap();
        assert_eq!(directory.get("stop_area:SNCF:1").await, None);
        assert!(directory.get("stop_area:SNCF:87723502").await.is_some());
    }
}
