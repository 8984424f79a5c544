//! Navitia client error types.

use std::error::Error as _;
use std::fmt;

use crate::domain::StopId;

/// The logical operation a request belonged to.
///
/// Carried by errors so callers and logs can tell which call failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Departure board for one stop
    Departures { stop_id: StopId },
    /// One page of the stop directory
    Stops { page: u64 },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Departures { stop_id } => write!(f, "departures for {stop_id}"),
            Operation::Stops { page } => write!(f, "stops page {page}"),
        }
    }
}

/// Failures that happen before a response is received.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The token cannot be placed in the credential part of a URL
    #[error("token contains {found:?}, which is not allowed in URL credentials")]
    InvalidToken { found: char },

    /// Building, sending or reading the request failed (DNS, connection, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors returned by [`NavitiaClient`](super::NavitiaClient).
#[derive(Debug, thiserror::Error)]
pub enum NavitiaError {
    /// The request could not be made or did not complete
    #[error("transport error during {operation}")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },

    /// The service answered with a non-success status
    #[error("upstream returned {status} for {operation}")]
    Rejected { operation: Operation, status: u16 },

    /// The response body did not have the expected shape
    #[error("could not decode {operation}")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// A departure carried an arrival time in an unexpected format
    #[error("could not parse date {literal:?}")]
    DateParsing {
        literal: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl NavitiaError {
    pub(crate) fn transport(operation: Operation, source: impl Into<TransportError>) -> Self {
        NavitiaError::Transport {
            operation,
            source: source.into(),
        }
    }

    /// Whether the request failed before the service answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, NavitiaError::Transport { .. })
    }

    /// Render this error followed by its causes, `": "`-separated.
    pub fn chain(&self) -> String {
        let mut rendered = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            rendered.push_str(": ");
            rendered.push_str(&cause.to_string());
            source = cause.source();
        }
        rendered
    }

    /// The HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            NavitiaError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    fn stop_id() -> StopId {
        StopId::parse("stop_area:SNCF:87723502").unwrap()
    }

    #[test]
    fn error_display() {
        let err = NavitiaError::Rejected {
            operation: Operation::Departures { stop_id: stop_id() },
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "upstream returned 404 for departures for stop_area:SNCF:87723502"
        );

        let err = NavitiaError::transport(
            Operation::Stops { page: 2 },
            TransportError::InvalidToken { found: '}' },
        );
        assert_eq!(err.to_string(), "transport error during stops page 2");
        assert_eq!(
            err.chain(),
            "transport error during stops page 2: \
             token contains '}', which is not allowed in URL credentials"
        );
    }

    #[test]
    fn causes_are_chained() {
        let err = NavitiaError::transport(
            Operation::Stops { page: 0 },
            TransportError::InvalidToken { found: '}' },
        );
        let source = err.source().unwrap();
        assert_eq!(
            source.to_string(),
            "token contains '}', which is not allowed in URL credentials"
        );

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = NavitiaError::Decode {
            operation: Operation::Stops { page: 0 },
            source: json_err,
        };
        assert!(err.source().is_some());

        let date_err = chrono::NaiveDateTime::parse_from_str("x", "%Y").unwrap_err();
        let err = NavitiaError::DateParsing {
            literal: "x".into(),
            source: date_err,
        };
        assert_eq!(err.to_string(), "could not parse date \"x\"");
        assert!(err.source().is_some());
    }

    #[test]
    fn predicates() {
        let err = NavitiaError::Rejected {
            operation: Operation::Stops { page: 0 },
            status: 503,
        };
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_transport());

        let err = NavitiaError::transport(
            Operation::Stops { page: 0 },
            TransportError::InvalidToken { found: ' ' },
        );
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }
}
