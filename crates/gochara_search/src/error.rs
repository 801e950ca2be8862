//! Error type for event search.

use std::error::Error;
use std::fmt::{Display, Formatter};

use gochara_core::{Body, ConfigError, OracleError};
use gochara_time::TimeError;

/// Errors from scanning, detection, and aggregation.
///
/// A failed scan fails the whole request: no partial event list is returned.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// The position oracle could not produce a sample.
    Oracle(OracleError),
    /// A body, frame, or data source named in the request is unknown.
    Configuration(ConfigError),
    /// Scan parameters are invalid (step, iteration count, aspect pair).
    InvalidConfig(&'static str),
    /// A detector was asked to scan a body it structurally excludes.
    UnsupportedBody { body: Body, detector: &'static str },
    /// Calendar or window conversion failed.
    Time(TimeError),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oracle(e) => write!(f, "oracle error: {e}"),
            Self::Configuration(e) => write!(f, "configuration error: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::UnsupportedBody { body, detector } => {
                write!(f, "{detector} detection does not apply to {body}")
            }
            Self::Time(e) => write!(f, "time error: {e}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Oracle(e) => Some(e),
            Self::Configuration(e) => Some(e),
            Self::Time(e) => Some(e),
            _ => None,
        }
    }
}

impl From<OracleError> for SearchError {
    fn from(e: OracleError) -> Self {
        Self::Oracle(e)
    }
}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        Self::Configuration(e)
    }
}

impl From<TimeError> for SearchError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
