//! Retrograde station detection.
//!
//! Crossing: longitude speed changes sign between consecutive samples.
//! Positive to negative is a retrograde start, negative to positive a
//! retrograde end. Only bodies whose direction can reverse are accepted:
//! luminaries never retrograde and mean nodes always do.

use gochara_core::{AngularPosition, Body, PositionOracle};
use gochara_time::{ScanWindow, TimeInstant};
use tracing::debug;

use crate::config::ScanConfig;
use crate::error::SearchError;
use crate::event::{Station, StationKind};
use crate::scanner::{Bisection, CrossingProbe, CrossingScanner, ScalarProbe, crosses_zero};

/// Reject bodies that cannot station.
pub fn validate_station_body(body: Body) -> Result<(), SearchError> {
    if body.can_station() {
        Ok(())
    } else {
        Err(SearchError::UnsupportedBody {
            body,
            detector: "retrograde station",
        })
    }
}

/// Probe over one body's longitude speed.
pub struct SpeedProbe<'o, 'a> {
    oracle: &'o PositionOracle<'a>,
    body: Body,
}

impl<'o, 'a> SpeedProbe<'o, 'a> {
    pub fn new(oracle: &'o PositionOracle<'a>, body: Body) -> Self {
        Self { oracle, body }
    }
}

impl CrossingProbe for SpeedProbe<'_, '_> {
    type State = AngularPosition;

    fn sample(&self, t: TimeInstant) -> Result<AngularPosition, SearchError> {
        Ok(self.oracle.position(self.body, t)?)
    }

    fn changed(&self, prev: &AngularPosition, next: &AngularPosition) -> bool {
        crosses_zero(prev.speed_deg_per_day, next.speed_deg_per_day)
    }
}

impl ScalarProbe for SpeedProbe<'_, '_> {
    fn deviation(&self, state: &AngularPosition) -> f64 {
        state.speed_deg_per_day
    }
}

/// All stations of `body` inside `window`, in time order.
pub fn stations(
    oracle: &PositionOracle<'_>,
    body: Body,
    window: ScanWindow,
    config: &ScanConfig,
) -> Result<Vec<Station>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    validate_station_body(body)?;

    let probe = SpeedProbe::new(oracle, body);
    let refinement = Bisection {
        iterations: config.bisection_iterations,
    };
    let mut events = Vec::new();
    for crossing in CrossingScanner::new(&probe, refinement, window, config.step_days)? {
        let crossing = crossing?;
        let kind = if crossing.prev.speed_deg_per_day > 0.0 {
            StationKind::RetrogradeStart
        } else {
            StationKind::RetrogradeEnd
        };
        let at = crossing.at.unwrap_or(crossing.next);
        events.push(Station {
            body,
            kind,
            time: crossing.time,
            longitude_deg: at.longitude_deg,
        });
    }

    debug!(
        body = %body,
        step_days = config.step_days,
        events = events.len(),
        "station scan"
    );
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gochara_core::{Motion, ReferenceFrame, SyntheticSource};
    use std::f64::consts::PI;

    fn window(start: f64, end: f64) -> ScanWindow {
        ScanWindow::new(TimeInstant::from_jd(start), TimeInstant::from_jd(end)).unwrap()
    }

    #[test]
    fn cosine_speed_alternates() {
        // speed = cos(2*pi*t/100): zeros at t = 25, 75, 125, 175
        let omega = 2.0 * PI / 100.0;
        let src = SyntheticSource::new(TimeInstant::from_jd(0.0)).with(
            Body::Mars,
            Motion::Oscillating {
                lon0: 100.0,
                amplitude: 1.0,
                omega,
            },
        );
        let oracle = PositionOracle::new(&src, ReferenceFrame::Tropical);
        let found = stations(&oracle, Body::Mars, window(0.0, 200.0), &ScanConfig::slow_body())
            .unwrap();
        let times: Vec<f64> = found.iter().map(|s| s.time.jd()).collect();
        assert_eq!(found.len(), 4, "{times:?}");
        for (s, want) in found.iter().zip([25.0, 75.0, 125.0, 175.0]) {
            assert!((s.time.jd() - want).abs() <= 1.0 / 1024.0, "{} vs {want}", s.time);
        }
        assert_eq!(found[0].kind, StationKind::RetrogradeStart);
        assert_eq!(found[1].kind, StationKind::RetrogradeEnd);
        assert_eq!(found[2].kind, StationKind::RetrogradeStart);
        assert_eq!(found[3].kind, StationKind::RetrogradeEnd);
    }

    #[test]
    fn rejects_structurally_fixed_bodies() {
        let src = SyntheticSource::new(TimeInstant::from_jd(0.0));
        let oracle = PositionOracle::new(&src, ReferenceFrame::Tropical);
        for body in [Body::Sun, Body::Moon, Body::Rahu, Body::Ketu] {
            let err = stations(&oracle, body, window(0.0, 10.0), &ScanConfig::slow_body())
                .unwrap_err();
            assert_eq!(
                err,
                SearchError::UnsupportedBody {
                    body,
                    detector: "retrograde station"
                }
            );
        }
    }

    #[test]
    fn direct_motion_has_no_station() {
        let src = SyntheticSource::new(TimeInstant::from_jd(0.0))
            .with(Body::Jupiter, Motion::Linear { lon0: 10.0, rate: 0.08 });
        let oracle = PositionOracle::new(&src, ReferenceFrame::Tropical);
        let found =
            stations(&oracle, Body::Jupiter, window(0.0, 365.0), &ScanConfig::slow_body())
                .unwrap();
        assert!(found.is_empty());
    }
}
