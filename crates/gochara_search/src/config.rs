//! Scan configuration.

use gochara_core::Body;

use crate::event::AspectKind;

/// Bisection iterations used when none is specified; resolution is `step / 2^10`.
pub const DEFAULT_BISECTION_ITERATIONS: u32 = 10;

/// Target separations scanned for aspects, in degrees.
///
/// 240 is the mirror trine and is reported separately from 120.
pub const ASPECT_TARGETS: [f64; 4] = [0.0, 120.0, 180.0, 240.0];

/// Coarse step and refinement budget for one scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    /// Sampling step in days.
    pub step_days: f64,
    /// Fixed number of bisection halvings per crossing.
    pub bisection_iterations: u32,
}

impl ScanConfig {
    pub fn new(step_days: f64) -> Self {
        Self {
            step_days,
            bisection_iterations: DEFAULT_BISECTION_ITERATIONS,
        }
    }

    /// 1-day step, for everything slower than the Moon.
    pub fn slow_body() -> Self {
        Self::new(1.0)
    }

    /// 6-hour step, for the Moon and for pairwise aspect scans.
    pub fn fast_body() -> Self {
        Self::new(0.25)
    }

    /// Preset step for a body's speed class.
    pub fn for_body(body: Body) -> Self {
        match body {
            Body::Moon => Self::fast_body(),
            _ => Self::slow_body(),
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.bisection_iterations = iterations;
        self
    }

    /// Bracket width after refinement, in days.
    pub fn resolution_days(&self) -> f64 {
        self.step_days / 2f64.powi(self.bisection_iterations.min(1023) as i32)
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.step_days.is_finite() || self.step_days <= 0.0 {
            return Err("step_days must be positive");
        }
        if self.bisection_iterations == 0 {
            return Err("bisection_iterations must be > 0");
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::slow_body()
    }
}

/// Configuration for pairwise aspect scans.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectConfig {
    pub scan: ScanConfig,
    /// Target separations `(lonA - lonB) mod 360`, a subset of [`ASPECT_TARGETS`].
    pub targets: Vec<f64>,
}

impl AspectConfig {
    pub fn new(scan: ScanConfig) -> Self {
        Self {
            scan,
            targets: ASPECT_TARGETS.to_vec(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        self.scan.validate()?;
        if self.targets.is_empty() {
            return Err("at least one aspect target is required");
        }
        if self
            .targets
            .iter()
            .any(|&t| AspectKind::from_target(t).is_none())
        {
            return Err("aspect targets must be 0, 120, 180 or 240");
        }
        Ok(())
    }
}

impl Default for AspectConfig {
    fn default() -> Self {
        Self::new(ScanConfig::fast_body())
    }
}
