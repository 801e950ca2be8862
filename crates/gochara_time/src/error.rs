//! Error types for time handling.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar conversion, window construction, or time-zone lookup.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// A calendar field (month, day, hour, ...) is out of range.
    InvalidCalendar(&'static str),
    /// A scan window is empty, reversed, or not finite.
    InvalidWindow(&'static str),
    /// The IANA time-zone name is not known.
    UnknownTimeZone(String),
    /// The instant cannot be represented as a civil timestamp.
    OutOfRange { jd: f64 },
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCalendar(msg) => write!(f, "invalid calendar date: {msg}"),
            Self::InvalidWindow(msg) => write!(f, "invalid scan window: {msg}"),
            Self::UnknownTimeZone(name) => write!(f, "unknown time zone: {name}"),
            Self::OutOfRange { jd } => write!(f, "JD {jd} cannot be represented as a timestamp"),
        }
    }
}

impl Error for TimeError {}
