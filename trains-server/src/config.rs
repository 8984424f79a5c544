//! Server configuration, read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use crate::navitia::{DEFAULT_BASE_URL, NavitiaConfig};

/// API token (required).
pub const TOKEN_VAR: &str = "TRAINS_TOKEN";
/// IP address or host name to listen on.
pub const ADDRESS_VAR: &str = "TRAINS_ADDRESS";
/// TCP port number or service name to listen on.
pub const PORT_VAR: &str = "TRAINS_PORT";
/// Base URL of the coverage API.
pub const API_URL_VAR: &str = "TRAINS_API_URL";
/// Hours between two stop directory refreshes.
pub const STOPS_REFRESH_VAR: &str = "TRAINS_STOPS_REFRESH_HOURS";

const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STOPS_REFRESH_HOURS: u64 = 24;

/// Errors from reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("TRAINS_TOKEN is not set")]
    MissingToken,

    #[error(
        "invalid token {0:?}: it must be an hexadecimal string that looks like \
         12345678-9abc-def0-1234-56789abcdef0"
    )]
    InvalidToken(String),

    #[error("invalid address {0:?}: it must be an IP address or a resolvable host name")]
    InvalidAddress(String),

    #[error("invalid port {0:?}: it must be a number between 1 and 65535 or a service name")]
    InvalidPort(String),

    #[error("invalid stop refresh period {0:?}: it must be a positive number of hours")]
    InvalidRefreshPeriod(String),
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address or host name the web server listens on
    pub address: String,
    /// Port the web server listens on
    pub port: u16,
    /// Navitia client settings
    pub navitia: NavitiaConfig,
    /// How often the stop directory is refetched
    pub stops_refresh: Duration,
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let token = get(TOKEN_VAR).ok_or(ConfigError::MissingToken)?;
        if !is_valid_token(&token) {
            return Err(ConfigError::InvalidToken(token));
        }

        let address = get(ADDRESS_VAR)
            .map(|raw| raw.trim().to_string())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

        let port = match get(PORT_VAR) {
            Some(raw) => lookup_port(raw.trim()).ok_or(ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let hours = match get(STOPS_REFRESH_VAR) {
            Some(raw) => {
                let parsed = raw.trim().parse::<u64>();
                match parsed {
                    Ok(hours) if hours > 0 => hours,
                    _ => return Err(ConfigError::InvalidRefreshPeriod(raw)),
                }
            }
            None => DEFAULT_STOPS_REFRESH_HOURS,
        };

        let base_url = get(API_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            address,
            port,
            navitia: NavitiaConfig::new(token).with_base_url(base_url),
            stops_refresh: Duration::from_secs(hours.saturating_mul(60 * 60)),
        })
    }

    /// Resolve the listen address to the socket address to bind.
    ///
    /// IP literals are used as-is; host names go through the system resolver
    /// and the first address returned wins.
    pub async fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let invalid = || ConfigError::InvalidAddress(self.address.clone());

        tokio::net::lookup_host((self.address.as_str(), self.port))
            .await
            .map_err(|_| invalid())?
            .next()
            .ok_or_else(invalid)
    }
}

/// TCP service names accepted in place of a port number.
const SERVICES: [(&str, u16); 14] = [
    ("ftp", 21),
    ("ftps", 990),
    ("gopher", 70),
    ("http", 80),
    ("https", 443),
    ("imap2", 143),
    ("imap3", 220),
    ("imaps", 993),
    ("pop3", 110),
    ("pop3s", 995),
    ("smtp", 25),
    ("ssh", 22),
    ("submissions", 465),
    ("telnet", 23),
];

/// Port number for a decimal port or a well-known TCP service name.
fn lookup_port(raw: &str) -> Option<u16> {
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.parse::<u16>().ok().filter(|&port| port != 0);
    }
    SERVICES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(raw))
        .map(|&(_, port)| port)
}

/// Tokens are UUID-shaped: hex groups of 8, 4, 4, 4 and 12 digits.
fn is_valid_token(token: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let parts: Vec<&str> = token.split('-').collect();
    parts.len() == GROUPS.len()
        && parts
            .iter()
            .zip(GROUPS)
            .all(|(part, len)| part.len() == len && part.bytes().all(|b| b.is_ascii_hexdigit()))
}
