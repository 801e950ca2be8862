//! Half-open `[start, end)` scan windows.

use crate::error::TimeError;
use crate::TimeInstant;

/// The interval a request scans: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanWindow {
    pub start: TimeInstant,
    pub end: TimeInstant,
}

impl ScanWindow {
    /// Create a window, rejecting empty, reversed, or non-finite bounds.
    pub fn new(start: TimeInstant, end: TimeInstant) -> Result<Self, TimeError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(TimeError::InvalidWindow("bounds must be finite"));
        }
        if end <= start {
            return Err(TimeError::InvalidWindow("end must be after start"));
        }
        Ok(Self { start, end })
    }

    /// One calendar month: 1st 00:00 UT up to the 1st of the following month.
    pub fn month(year: i32, month: u32) -> Result<Self, TimeError> {
        let start = TimeInstant::from_utc(year, month, 1, 0, 0, 0.0)?;
        let end = if month == 12 {
            TimeInstant::from_utc(year + 1, 1, 1, 0, 0, 0.0)?
        } else {
            TimeInstant::from_utc(year, month + 1, 1, 0, 0, 0.0)?
        };
        Self::new(start, end)
    }

    /// One calendar year: Jan 1 00:00 UT up to Jan 1 of the following year.
    pub fn year(year: i32) -> Result<Self, TimeError> {
        let start = TimeInstant::from_utc(year, 1, 1, 0, 0, 0.0)?;
        let end = TimeInstant::from_utc(year + 1, 1, 1, 0, 0, 0.0)?;
        Self::new(start, end)
    }

    /// Whether `t` falls inside `[start, end)`.
    pub fn contains(&self, t: TimeInstant) -> bool {
        t >= self.start && t < self.end
    }

    /// Length of the window in days.
    pub fn days(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        assert!((ScanWindow::month(2024, 2).unwrap().days() - 29.0).abs() < 1e-9);
        assert!((ScanWindow::month(2023, 2).unwrap().days() - 28.0).abs() < 1e-9);
        assert!((ScanWindow::month(2024, 4).unwrap().days() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn december_rolls_into_next_year() {
        let w = ScanWindow::month(2024, 12).unwrap();
        let jan = TimeInstant::from_utc(2025, 1, 1, 0, 0, 0.0).unwrap();
        assert_eq!(w.end, jan);
        assert!((w.days() - 31.0).abs() < 1e-9);
    }

    #[test]
    fn year_length() {
        assert!((ScanWindow::year(2024).unwrap().days() - 366.0).abs() < 1e-9);
        assert!((ScanWindow::year(2025).unwrap().days() - 365.0).abs() < 1e-9);
    }

    #[test]
    fn half_open_membership() {
        let w = ScanWindow::month(2024, 5).unwrap();
        assert!(w.contains(w.start));
        assert!(!w.contains(w.end));
        assert!(w.contains(w.end - 1e-6));
    }

    #[test]
    fn rejects_reversed() {
        let a = TimeInstant::from_jd(10.0);
        let b = TimeInstant::from_jd(5.0);
        assert!(ScanWindow::new(a, b).is_err());
        assert!(ScanWindow::new(a, a).is_err());
    }

    #[test]
    fn rejects_bad_month() {
        assert!(ScanWindow::month(2024, 13).is_err());
    }
}
