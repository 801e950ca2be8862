//! Sign transit (ingress) detection.
//!
//! Crossing: the sign index differs between consecutive samples.
//! Bisection keeps narrowing toward the side already in the new sign, so
//! the refined instant is the first one (to `step / 2^n`) at which the new
//! sign holds.

use gochara_core::{Body, PositionOracle, ZodiacSign};
use gochara_time::{ScanWindow, TimeInstant};
use tracing::debug;

use crate::config::ScanConfig;
use crate::error::SearchError;
use crate::event::SignIngress;
use crate::scanner::{Bisection, CrossingProbe, CrossingScanner};

/// Sampled longitude and its sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignState {
    pub longitude_deg: f64,
    pub sign: ZodiacSign,
}

/// Probe over one body's zodiac sign.
pub struct SignProbe<'o, 'a> {
    oracle: &'o PositionOracle<'a>,
    body: Body,
}

impl<'o, 'a> SignProbe<'o, 'a> {
    pub fn new(oracle: &'o PositionOracle<'a>, body: Body) -> Self {
        Self { oracle, body }
    }
}

impl CrossingProbe for SignProbe<'_, '_> {
    type State = SignState;

    fn sample(&self, t: TimeInstant) -> Result<SignState, SearchError> {
        let longitude_deg = self.oracle.longitude(self.body, t)?;
        Ok(SignState {
            longitude_deg,
            sign: ZodiacSign::from_longitude(longitude_deg),
        })
    }

    fn changed(&self, prev: &SignState, next: &SignState) -> bool {
        prev.sign != next.sign
    }

    fn reached(&self, _prev: &SignState, next: &SignState, mid: &SignState) -> bool {
        mid.sign == next.sign
    }
}

/// All sign ingresses of `body` inside `window`, in time order.
pub fn sign_ingresses(
    oracle: &PositionOracle<'_>,
    body: Body,
    window: ScanWindow,
    config: &ScanConfig,
) -> Result<Vec<SignIngress>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;

    let probe = SignProbe::new(oracle, body);
    let refinement = Bisection {
        iterations: config.bisection_iterations,
    };
    let mut events = Vec::new();
    for crossing in CrossingScanner::new(&probe, refinement, window, config.step_days)? {
        let crossing = crossing?;
        let at = crossing.at.unwrap_or(crossing.next);
        events.push(SignIngress {
            body,
            time: crossing.time,
            from_sign: crossing.prev.sign,
            to_sign: crossing.next.sign,
            longitude_deg: at.longitude_deg,
        });
    }

    debug!(
        body = %body,
        step_days = config.step_days,
        events = events.len(),
        "sign transit scan"
    );
    Ok(events)
}
