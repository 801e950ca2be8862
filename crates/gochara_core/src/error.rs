//! Error types for position lookup and request configuration.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::body::Body;

/// Why a position could not be produced.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum OracleErrorKind {
    /// The requested time lies outside the source's coverage.
    OutOfRange { first_jd: f64, last_jd: f64 },
    /// The source has no data for this body.
    MissingBody,
    /// The source produced a NaN or infinite longitude/speed.
    NonFinite,
    /// Failure reported by an external ephemeris backend.
    Backend(String),
}

/// A position computation failed for a given body and time.
///
/// Fatal for the scan that requested it: a missing sample would break
/// the bracketing of crossings.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleError {
    pub body: Body,
    pub jd: f64,
    pub kind: OracleErrorKind,
}

impl OracleError {
    pub fn new(body: Body, jd: f64, kind: OracleErrorKind) -> Self {
        Self { body, jd, kind }
    }
}

impl Display for OracleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let body = self.body.name();
        match &self.kind {
            OracleErrorKind::OutOfRange { first_jd, last_jd } => write!(
                f,
                "{body} at JD {}: outside ephemeris range [{first_jd}, {last_jd}]",
                self.jd
            ),
            OracleErrorKind::MissingBody => write!(f, "{body}: no ephemeris data"),
            OracleErrorKind::NonFinite => {
                write!(f, "{body} at JD {}: non-finite position", self.jd)
            }
            OracleErrorKind::Backend(msg) => write!(f, "{body} at JD {}: {msg}", self.jd),
        }
    }
}

impl Error for OracleError {}

/// A request names something that does not exist or cannot be loaded.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// Body name not in the tracked-body table.
    UnknownBody(String),
    /// Reference frame / ayanamsha name not recognized.
    UnknownFrame(String),
    /// Ephemeris table is malformed.
    InvalidTable { line: usize, reason: &'static str },
    /// Ephemeris table contains no usable series.
    EmptyTable,
    /// I/O error while reading configuration or data.
    Io(String),
    /// Sampling step is not a positive finite number of days.
    InvalidStep(f64),
    /// The source being tabulated failed.
    Source(OracleError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownBody(name) => write!(f, "unknown body: {name}"),
            Self::UnknownFrame(name) => write!(f, "unknown reference frame: {name}"),
            Self::InvalidTable { line, reason } => {
                write!(f, "ephemeris table line {line}: {reason}")
            }
            Self::EmptyTable => write!(f, "ephemeris table has no usable series"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::InvalidStep(step) => write!(f, "step must be positive and finite, got {step}"),
            Self::Source(e) => write!(f, "tabulation failed: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(e) => Some(e),
            _ => None,
        }
    }
}

impl From<OracleError> for ConfigError {
    fn from(e: OracleError) -> Self {
        Self::Source(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
