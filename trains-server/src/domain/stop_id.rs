//! Stop area identifiers.

use std::fmt;

/// Prefix shared by every stop area identifier.
const PREFIX: &str = "stop_area:";

/// Error returned when parsing an invalid stop area identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A validated stop area identifier such as `stop_area:SNCF:87723502`.
///
/// The identifier is the literal `stop_area:`, a network name made of ASCII
/// letters, a colon, and a numeric code. Every `StopId` is valid by
/// construction, so it can be placed in a request path without escaping.
///
/// # Examples
///
/// ```
/// use trains_server::domain::StopId;
///
/// let id = StopId::parse("stop_area:SNCF:87723502").unwrap();
/// assert_eq!(id.as_str(), "stop_area:SNCF:87723502");
///
/// // Missing numeric code
/// assert!(StopId::parse("stop_area:SNCF:").is_err());
///
/// // Wrong prefix
/// assert!(StopId::parse("stop_point:SNCF:87723502").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop area identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let rest = s.strip_prefix(PREFIX).ok_or(InvalidStopId {
            reason: "must start with \"stop_area:\"",
        })?;

        let (network, code) = rest.split_once(':').ok_or(InvalidStopId {
            reason: "must look like stop_area:<network>:<code>",
        })?;

        if network.is_empty() || !network.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(InvalidStopId {
                reason: "network must be one or more ASCII letters",
            });
        }

        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStopId {
                reason: "code must be one or more ASCII digits",
            });
        }

        Ok(StopId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
