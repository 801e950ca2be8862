//! Aspect crossing detection.
//!
//! For a pair `(a, b)` and a target separation, the deviation
//! `val(t) = normalize_to_pm180((lonA - lonB) - target)` is zero at the exact
//! aspect. A crossing is a sign change of `val` between samples whose jump
//! is below 180 deg; larger jumps are the wraparound at +/-180, not an
//! aspect. The exact instant is linearly interpolated inside the bracket.
//!
//! Each target is scanned on its own: near-simultaneous crossings of
//! different targets are all reported.

use gochara_core::{Body, PositionOracle, normalize_to_pm180};
use gochara_time::{ScanWindow, TimeInstant};
use tracing::debug;

use crate::config::AspectConfig;
use crate::error::SearchError;
use crate::event::{AspectExact, AspectKind};
use crate::scanner::{
    CrossingProbe, CrossingScanner, LinearInterpolation, ScalarProbe, crosses_zero,
};

/// Signed deviation of a separation from a target, in (-180, 180].
pub fn aspect_deviation(diff_deg: f64, target_deg: f64) -> f64 {
    normalize_to_pm180(diff_deg - target_deg)
}

/// Probe over the deviation of one pair from one target.
pub struct AspectProbe<'o, 'a> {
    oracle: &'o PositionOracle<'a>,
    a: Body,
    b: Body,
    target_deg: f64,
}

impl<'o, 'a> AspectProbe<'o, 'a> {
    pub fn new(oracle: &'o PositionOracle<'a>, a: Body, b: Body, target_deg: f64) -> Self {
        Self {
            oracle,
            a,
            b,
            target_deg,
        }
    }
}

impl CrossingProbe for AspectProbe<'_, '_> {
    type State = f64;

    fn sample(&self, t: TimeInstant) -> Result<f64, SearchError> {
        let lon_a = self.oracle.longitude(self.a, t)?;
        let lon_b = self.oracle.longitude(self.b, t)?;
        Ok(aspect_deviation(lon_a - lon_b, self.target_deg))
    }

    fn changed(&self, prev: &f64, next: &f64) -> bool {
        crosses_zero(*prev, *next) && (prev - next).abs() < 180.0
    }
}

impl ScalarProbe for AspectProbe<'_, '_> {
    fn deviation(&self, state: &f64) -> f64 {
        *state
    }
}

pub(crate) fn validate_pair(a: Body, b: Body) -> Result<(), SearchError> {
    if a == b {
        return Err(SearchError::InvalidConfig(
            "aspect pair must name two different bodies",
        ));
    }
    if a.is_locked_to(b) {
        return Err(SearchError::InvalidConfig(
            "aspect pair has a fixed separation",
        ));
    }
    Ok(())
}

/// Exact aspects between `a` and `b` inside `window`, in time order.
///
/// Targets are scanned independently and merged with a stable sort, so
/// equal times keep target order.
pub fn aspects_for_pair(
    oracle: &PositionOracle<'_>,
    a: Body,
    b: Body,
    window: ScanWindow,
    config: &AspectConfig,
) -> Result<Vec<AspectExact>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    validate_pair(a, b)?;

    let mut events = Vec::new();
    for &target_deg in &config.targets {
        let Some(kind) = AspectKind::from_target(target_deg) else {
            continue;
        };
        let probe = AspectProbe::new(oracle, a, b, target_deg);
        for crossing in
            CrossingScanner::new(&probe, LinearInterpolation, window, config.scan.step_days)?
        {
            let crossing = crossing?;
            events.push(AspectExact {
                a,
                b,
                target_deg,
                kind,
                time: crossing.time,
                longitude_deg: oracle.longitude(a, crossing.time)?,
            });
        }
    }
    events.sort_by(|x, y| x.time.total_cmp(&y.time));

    debug!(
        a = %a,
        b = %b,
        step_days = config.scan.step_days,
        events = events.len(),
        "aspect scan"
    );
    Ok(events)
}

/// Unordered pairs of `bodies` in listing order: `(bodies[i], bodies[j])`, `i < j`.
///
/// Pairs locked at a fixed separation (Rahu and Ketu) are skipped.
pub fn body_pairs(bodies: &[Body]) -> Vec<(Body, Body)> {
    let mut pairs = Vec::with_capacity(bodies.len() * bodies.len().saturating_sub(1) / 2);
    for (i, &a) in bodies.iter().enumerate() {
        for &b in &bodies[i + 1..] {
            if !a.is_locked_to(b) {
                pairs.push((a, b));
            }
        }
    }
    pairs
}
