//! Time handling for the event search engine.
//!
//! This crate provides:
//! - [`TimeInstant`], a Julian Day (UT) clock position closed under day arithmetic
//! - Julian Day ↔ Gregorian calendar conversion
//! - Half-open scan windows for calendar months and years
//! - Rendering of instants in a display time zone (ISO-8601 and human-readable)

pub mod civil;
pub mod error;
pub mod julian;
pub mod window;

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::{Add, Sub};

use chrono::{DateTime, Utc};

pub use civil::{DEFAULT_DISPLAY_TZ, LocalTimestamp, parse_time_zone};
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, jd_to_calendar,
    jd_to_centuries,
};
pub use window::ScanWindow;

/// A position on the continuous Julian Day clock (UT).
///
/// Instants are compared with [`TimeInstant::total_cmp`] when a total order
/// is required (sorting); `PartialOrd` is kept for ordinary comparisons.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeInstant {
    jd: f64,
}

impl TimeInstant {
    /// Create an instant from a Julian Day number.
    pub const fn from_jd(jd: f64) -> Self {
        Self { jd }
    }

    /// Julian Day number of this instant.
    pub const fn jd(self) -> f64 {
        self.jd
    }

    /// Create an instant from a UTC calendar date and time of day.
    pub fn from_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        if !(1..=12).contains(&month) {
            return Err(TimeError::InvalidCalendar("month must be in 1..=12"));
        }
        if !(1..=31).contains(&day) {
            return Err(TimeError::InvalidCalendar("day must be in 1..=31"));
        }
        if hour > 23 || minute > 59 {
            return Err(TimeError::InvalidCalendar("hour/minute out of range"));
        }
        if !second.is_finite() || !(0.0..61.0).contains(&second) {
            return Err(TimeError::InvalidCalendar("second must be in [0, 61)"));
        }
        let day_frac = day as f64
            + hour as f64 / 24.0
            + minute as f64 / 1440.0
            + second / SECONDS_PER_DAY;
        Ok(Self::from_jd(calendar_to_jd(year, month, day_frac)))
    }

    /// Convert a `chrono` UTC timestamp into an instant.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
        Self::from_jd(UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY)
    }

    /// Convert into a `chrono` UTC timestamp, rounded to the nearest second.
    pub fn to_datetime(self) -> Result<DateTime<Utc>, TimeError> {
        let seconds = ((self.jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY).round();
        if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
            return Err(TimeError::OutOfRange { jd: self.jd });
        }
        DateTime::from_timestamp(seconds as i64, 0).ok_or(TimeError::OutOfRange { jd: self.jd })
    }

    /// Advance by a (possibly negative or fractional) number of days.
    pub fn plus_days(self, days: f64) -> Self {
        Self::from_jd(self.jd + days)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: TimeInstant) -> f64 {
        self.jd - earlier.jd
    }

    /// Midpoint between two instants.
    pub fn midpoint(self, other: TimeInstant) -> Self {
        Self::from_jd(self.jd + 0.5 * (other.jd - self.jd))
    }

    /// Total ordering over instants (IEEE 754 `totalOrder`).
    pub fn total_cmp(&self, other: &TimeInstant) -> Ordering {
        self.jd.total_cmp(&other.jd)
    }

    /// Whether the underlying Julian Day is finite.
    pub fn is_finite(self) -> bool {
        self.jd.is_finite()
    }
}

impl Add<f64> for TimeInstant {
    type Output = TimeInstant;

    fn add(self, days: f64) -> TimeInstant {
        self.plus_days(days)
    }
}

impl Sub<f64> for TimeInstant {
    type Output = TimeInstant;

    fn sub(self, days: f64) -> TimeInstant {
        self.plus_days(-days)
    }
}

impl Sub<TimeInstant> for TimeInstant {
    type Output = f64;

    fn sub(self, earlier: TimeInstant) -> f64 {
        self.days_since(earlier)
    }
}

impl Display for TimeInstant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "JD {:.6}", self.jd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_utc_matches_calendar() {
        let t = TimeInstant::from_utc(2000, 1, 1, 12, 0, 0.0).unwrap();
        assert!((t.jd() - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn from_utc_rejects_bad_month() {
        assert!(TimeInstant::from_utc(2024, 13, 1, 0, 0, 0.0).is_err());
        assert!(TimeInstant::from_utc(2024, 0, 1, 0, 0, 0.0).is_err());
    }

    #[test]
    fn from_utc_rejects_bad_clock() {
        assert!(TimeInstant::from_utc(2024, 1, 1, 24, 0, 0.0).is_err());
        assert!(TimeInstant::from_utc(2024, 1, 1, 0, 60, 0.0).is_err());
        assert!(TimeInstant::from_utc(2024, 1, 1, 0, 0, f64::NAN).is_err());
    }

    #[test]
    fn arithmetic_is_closed() {
        let t = TimeInstant::from_jd(2_460_000.5);
        let u = t + 0.25;
        assert!((u.jd() - 2_460_000.75).abs() < 1e-12);
        assert!(((u - t) - 0.25).abs() < 1e-12);
        assert!(((u - 0.25).jd() - t.jd()).abs() < 1e-12);
    }

    #[test]
    fn datetime_roundtrip() {
        let t = TimeInstant::from_utc(2024, 3, 20, 3, 6, 0.0).unwrap();
        let dt = t.to_datetime().unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-20T03:06:00+00:00");
        let back = TimeInstant::from_datetime(&dt);
        assert!((back.jd() - t.jd()).abs() < 1e-8);
    }

    #[test]
    fn non_finite_is_out_of_range() {
        assert!(TimeInstant::from_jd(f64::INFINITY).to_datetime().is_err());
    }

    #[test]
    fn total_order() {
        let a = TimeInstant::from_jd(1.0);
        let b = TimeInstant::from_jd(2.0);
        assert_eq!(a.total_cmp(&b), Ordering::Less);
        assert_eq!(b.total_cmp(&a), Ordering::Greater);
        assert!(a < b);
    }

    #[test]
    fn midpoint_between() {
        let a = TimeInstant::from_jd(10.0);
        let b = TimeInstant::from_jd(11.0);
        assert!((a.midpoint(b).jd() - 10.5).abs() < 1e-12);
    }
}
