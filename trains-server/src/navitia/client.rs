//! Navitia coverage API HTTP client.
//!
//! Provides the two operations the rest of the server needs: the departure
//! board of one stop (cached for one TTL) and the full stop directory
//! (walked page by page, never cached).

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{Departure, Stop, StopId};

use super::cache::{Clock, DEFAULT_TTL, SystemClock, TtlCache};
use super::convert::{StopsPage, decode_departures, decode_stops_page};
use super::error::{NavitiaError, Operation, TransportError};
use super::paginate::collect_pages;

/// Default base URL for the SNCF Navitia API.
pub const DEFAULT_BASE_URL: &str = "https://api.sncf.com/v1";

/// Coverage region queried by every request.
const COVERAGE: &str = "sncf";

/// Stop areas requested per directory page.
const STOPS_PAGE_SIZE: u32 = 1000;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the Navitia client.
#[derive(Debug, Clone)]
pub struct NavitiaConfig {
    /// API token, sent as the URL username
    pub token: String,
    /// Base URL for the API, without credentials
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// How long a departure board is served from cache
    pub cache_ttl: Duration,
}

impl NavitiaConfig {
    /// Create a new config with the given API token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom base URL (for testing).
    ///
    /// Trailing slashes are dropped: request paths are appended verbatim.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the departure cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

/// Navitia API client.
///
/// Owns its HTTP transport and its departure cache; share it behind an
/// `Arc`. A single lock covers the cache lookup, the network request and the
/// cache update, so at most one departure fetch is in flight at a time
/// across all stops.
#[derive(Debug)]
pub struct NavitiaClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    departures: Mutex<TtlCache<Operation, Arc<Vec<Departure>>>>,
    clock: Arc<dyn Clock>,
}

impl NavitiaClient {
    /// Create a new client with the given configuration.
    ///
    /// The token is not checked here: a token that cannot be placed in a URL
    /// makes every call fail with a transport error instead.
    pub fn new(config: NavitiaConfig) -> Result<Self, TransportError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a client that reads time from `clock`.
    pub fn with_clock(
        config: NavitiaConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
            departures: Mutex::new(TtlCache::new(config.cache_ttl)),
            clock,
        })
    }

    /// Get the departure board for a stop.
    ///
    /// Served from cache while the last successful fetch for this stop is
    /// younger than the TTL. Failures are returned as-is and never touch the
    /// cache.
    pub async fn get_departures(
        &self,
        stop_id: &StopId,
    ) -> Result<Arc<Vec<Departure>>, NavitiaError> {
        let operation = Operation::Departures {
            stop_id: stop_id.clone(),
        };

        let mut cache = self.departures.lock().await;
        let now = self.clock.now();

        if let Some(cached) = cache.get_fresh(&operation, now) {
            debug!(%stop_id, "departures served from cache");
            return Ok(cached);
        }

        let url = self.endpoint(
            &format!("/coverage/{COVERAGE}/stop_areas/{stop_id}/departures"),
            &operation,
        )?;
        let body = self.fetch(&url, &operation).await?;
        let departures = Arc::new(decode_departures(&body, &operation)?);

        cache.insert(operation, departures.clone(), now);
        debug!(%stop_id, cached = cache.len(), "departures refreshed");

        Ok(departures)
    }

    /// Get the full stop directory.
    ///
    /// Returns every stop with a non-empty label across all pages, or the
    /// first error encountered.
    pub async fn get_stops(&self) -> Result<Vec<Stop>, NavitiaError> {
        collect_pages(move |page| self.get_stops_page(page)).await
    }

    async fn get_stops_page(&self, page: u64) -> Result<StopsPage, NavitiaError> {
        let operation = Operation::Stops { page };
        let url = self.endpoint(
            &format!(
                "/coverage/{COVERAGE}/stop_areas?count={STOPS_PAGE_SIZE}&start_page={page}"
            ),
            &operation,
        )?;
        let body = self.fetch(&url, &operation).await?;
        decode_stops_page(&body, &operation)
    }

    /// Build the full request URL with the token embedded as credentials.
    fn endpoint(&self, path: &str, operation: &Operation) -> Result<String, NavitiaError> {
        check_token(&self.token).map_err(|e| NavitiaError::transport(operation.clone(), e))?;

        let base = match self.base_url.split_once("://") {
            Some((scheme, rest)) if !self.token.is_empty() => {
                format!("{scheme}://{}@{rest}", self.token)
            }
            _ => self.base_url.clone(),
        };

        Ok(format!("{base}{path}"))
    }

    /// Issue a GET request and return the body of a 200 response.
    async fn fetch(&self, url: &str, operation: &Operation) -> Result<String, NavitiaError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| NavitiaError::transport(operation.clone(), e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(NavitiaError::Rejected {
                operation: operation.clone(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| NavitiaError::transport(operation.clone(), e))
    }
}

/// Check that every character of the token may appear unescaped as the
/// username of a URL: RFC 3986 unreserved characters and sub-delims.
///
/// `:` is refused as it would start a password, `%` as it would start an
/// escape sequence.
fn check_token(token: &str) -> Result<(), TransportError> {
    match token.chars().find(|c| !is_userinfo_char(*c)) {
        Some(found) => Err(TransportError::InvalidToken { found }),
        None => Ok(()),
    }
}

fn is_userinfo_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '_' | '~' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
        )
}
