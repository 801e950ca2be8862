//! Rendering instants as civil timestamps in a display time zone.

use chrono::{DateTime, SecondsFormat};
use chrono_tz::Tz;

use crate::TimeInstant;
use crate::error::TimeError;

/// Time zone used for calendar display when none is configured.
pub const DEFAULT_DISPLAY_TZ: Tz = chrono_tz::Asia::Kolkata;

/// Parse an IANA time-zone name such as `"Asia/Kolkata"`.
pub fn parse_time_zone(name: &str) -> Result<Tz, TimeError> {
    name.parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimeZone(name.to_string()))
}

/// An instant resolved into a specific time zone.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalTimestamp {
    dt: DateTime<Tz>,
}

impl LocalTimestamp {
    pub fn new(instant: TimeInstant, tz: Tz) -> Result<Self, TimeError> {
        let utc = instant.to_datetime()?;
        Ok(Self {
            dt: utc.with_timezone(&tz),
        })
    }

    /// ISO-8601 with offset, whole seconds: `2024-03-20T08:36:00+05:30`.
    pub fn iso8601(&self) -> String {
        self.dt.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// Day-month-year: `20 Mar 2024`.
    pub fn display_date(&self) -> String {
        self.dt.format("%d %b %Y").to_string()
    }

    /// Twelve-hour clock: `08:36 AM`.
    pub fn display_clock(&self) -> String {
        self.dt.format("%I:%M %p").to_string()
    }

    /// Date and clock together: `20 Mar 2024, 08:36 AM`.
    pub fn display_date_time(&self) -> String {
        self.dt.format("%d %b %Y, %I:%M %p").to_string()
    }

    pub fn datetime(&self) -> &DateTime<Tz> {
        &self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LocalTimestamp {
        let t = TimeInstant::from_utc(2024, 3, 20, 3, 6, 0.0).unwrap();
        LocalTimestamp::new(t, DEFAULT_DISPLAY_TZ).unwrap()
    }

    #[test]
    fn iso_carries_offset() {
        assert_eq!(sample().iso8601(), "2024-03-20T08:36:00+05:30");
    }

    #[test]
    fn display_formats() {
        let ts = sample();
        assert_eq!(ts.display_date(), "20 Mar 2024");
        assert_eq!(ts.display_clock(), "08:36 AM");
        assert_eq!(ts.display_date_time(), "20 Mar 2024, 08:36 AM");
    }

    #[test]
    fn parses_known_zone() {
        assert_eq!(parse_time_zone("UTC").unwrap(), chrono_tz::UTC);
        assert_eq!(parse_time_zone("Asia/Kolkata").unwrap(), DEFAULT_DISPLAY_TZ);
    }

    #[test]
    fn rejects_unknown_zone() {
        assert!(matches!(
            parse_time_zone("Mars/Olympus_Mons"),
            Err(TimeError::UnknownTimeZone(_))
        ));
    }

    #[test]
    fn afternoon_clock() {
        let t = TimeInstant::from_utc(2024, 1, 1, 10, 0, 0.0).unwrap();
        let ts = LocalTimestamp::new(t, DEFAULT_DISPLAY_TZ).unwrap();
        assert_eq!(ts.display_clock(), "03:30 PM");
    }
}
