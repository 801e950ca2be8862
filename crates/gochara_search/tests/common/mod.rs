//! Shared synthetic sky for integration tests.

#![allow(dead_code)]

use std::f64::consts::PI;

use gochara_core::{Body, Motion, SyntheticSource};
use gochara_time::TimeInstant;

/// 2024-01-01 00:00 UT.
pub const EPOCH_JD: f64 = 2_460_310.5;

fn looping(lon0: f64, rate: f64, amplitude: f64, period_days: f64) -> Motion {
    Motion::Looping {
        lon0,
        rate,
        amplitude,
        omega: 2.0 * PI / period_days,
    }
}

/// Every primary body on a closed-form law with realistic rates and
/// retrograde loops for the planets.
pub fn sky() -> SyntheticSource {
    SyntheticSource::new(TimeInstant::from_jd(EPOCH_JD))
        .with(Body::Sun, Motion::Linear { lon0: 280.0, rate: 0.9856 })
        .with(Body::Moon, Motion::Linear { lon0: 10.0, rate: 13.176 })
        .with(Body::Mars, looping(300.0, 0.52, 0.9, 780.0))
        .with(Body::Mercury, looping(290.0, 0.9856, 2.2, 116.0))
        .with(Body::Jupiter, looping(30.0, 0.083, 0.2, 399.0))
        .with(Body::Venus, looping(250.0, 1.2, 1.5, 584.0))
        .with(Body::Saturn, looping(330.0, 0.034, 0.1, 378.0))
        .with(Body::Rahu, Motion::Linear { lon0: 15.0, rate: -0.053 })
        .with(Body::Uranus, looping(50.0, 0.0117, 0.04, 370.0))
        .with(Body::Neptune, looping(355.0, 0.006, 0.03, 367.0))
        .with(Body::Pluto, looping(300.0, 0.004, 0.03, 367.0))
}
