//! Closed-form synthetic ephemeris for tests, benchmarks, and demos.
//!
//! Each body follows an analytic motion law, so event times are known
//! exactly and the search can be checked against them.

use std::collections::HashMap;

use gochara_time::TimeInstant;

use crate::body::Body;
use crate::error::{OracleError, OracleErrorKind};
use crate::frame::ReferenceFrame;
use crate::oracle::EphemerisSource;
use crate::position::AngularPosition;

/// Analytic motion law relative to the source epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// `lon(t) = lon0 + rate * (t - epoch)`.
    Linear { lon0: f64, rate: f64 },
    /// `speed(t) = amplitude * cos(omega * (t - epoch))`, so
    /// `lon(t) = lon0 + amplitude / omega * sin(omega * (t - epoch))`.
    Oscillating {
        lon0: f64,
        amplitude: f64,
        omega: f64,
    },
    /// Linear drift plus an oscillation: a simple retrograde-loop model.
    Looping {
        lon0: f64,
        rate: f64,
        amplitude: f64,
        omega: f64,
    },
}

impl Motion {
    pub fn at(self, dt: f64) -> AngularPosition {
        match self {
            Self::Linear { lon0, rate } => AngularPosition::new(lon0 + rate * dt, rate),
            Self::Oscillating {
                lon0,
                amplitude,
                omega,
            } => AngularPosition::new(
                lon0 + amplitude / omega * (omega * dt).sin(),
                amplitude * (omega * dt).cos(),
            ),
            Self::Looping {
                lon0,
                rate,
                amplitude,
                omega,
            } => AngularPosition::new(
                lon0 + rate * dt + amplitude / omega * (omega * dt).sin(),
                rate + amplitude * (omega * dt).cos(),
            ),
        }
    }
}

/// Ephemeris source driven by [`Motion`] laws.
///
/// The reference frame is ignored: longitudes are whatever the laws say.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    epoch_jd: f64,
    motions: HashMap<Body, Motion>,
    valid_range: Option<(f64, f64)>,
}

impl SyntheticSource {
    pub fn new(epoch: TimeInstant) -> Self {
        Self {
            epoch_jd: epoch.jd(),
            motions: HashMap::new(),
            valid_range: None,
        }
    }

    /// Add or replace a body's motion law.
    pub fn with(mut self, body: Body, motion: Motion) -> Self {
        self.motions.insert(body, motion);
        self
    }

    /// Fail with `OutOfRange` outside `[first, last]`.
    pub fn with_valid_range(mut self, first: TimeInstant, last: TimeInstant) -> Self {
        self.valid_range = Some((first.jd(), last.jd()));
        self
    }

    pub fn epoch(&self) -> TimeInstant {
        TimeInstant::from_jd(self.epoch_jd)
    }
}

impl EphemerisSource for SyntheticSource {
    fn position(
        &self,
        body: Body,
        t: TimeInstant,
        _frame: ReferenceFrame,
    ) -> Result<AngularPosition, OracleError> {
        let jd = t.jd();
        if let Some((first_jd, last_jd)) = self.valid_range {
            if !(jd >= first_jd && jd <= last_jd) {
                return Err(OracleError::new(
                    body,
                    jd,
                    OracleErrorKind::OutOfRange { first_jd, last_jd },
                ));
            }
        }
        let motion = self
            .motions
            .get(&body)
            .ok_or_else(|| OracleError::new(body, jd, OracleErrorKind::MissingBody))?;
        Ok(motion.at(jd - self.epoch_jd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_law() {
        let src = SyntheticSource::new(TimeInstant::from_jd(100.0)).with(
            Body::Sun,
            Motion::Linear {
                lon0: 350.0,
                rate: 2.0,
            },
        );
        let p = src
            .position(Body::Sun, TimeInstant::from_jd(110.0), ReferenceFrame::Tropical)
            .unwrap();
        assert!((p.longitude_deg - 10.0).abs() < 1e-12);
        assert!((p.speed_deg_per_day - 2.0).abs() < 1e-15);
    }

    #[test]
    fn oscillating_speed_is_derivative() {
        let m = Motion::Oscillating {
            lon0: 50.0,
            amplitude: 1.0,
            omega: 0.1,
        };
        let h = 1e-5;
        for dt in [0.0, 3.0, 15.7, 40.0] {
            let numeric = (m.at(dt + h).longitude_deg - m.at(dt - h).longitude_deg) / (2.0 * h);
            assert!((numeric - m.at(dt).speed_deg_per_day).abs() < 1e-6, "dt = {dt}");
        }
    }

    #[test]
    fn valid_range_is_enforced() {
        let src = SyntheticSource::new(TimeInstant::from_jd(0.0))
            .with(Body::Mars, Motion::Linear { lon0: 0.0, rate: 0.5 })
            .with_valid_range(TimeInstant::from_jd(0.0), TimeInstant::from_jd(10.0));
        let err = src
            .position(Body::Mars, TimeInstant::from_jd(10.5), ReferenceFrame::Tropical)
            .unwrap_err();
        assert!(matches!(err.kind, OracleErrorKind::OutOfRange { .. }));
        let err = src
            .position(Body::Venus, TimeInstant::from_jd(1.0), ReferenceFrame::Tropical)
            .unwrap_err();
        assert_eq!(err.kind, OracleErrorKind::MissingBody);
    }
}
