//! Crossing scanner: the shared numerical core of every detector.
//!
//! A [`CrossingProbe`] turns a time into a state and decides whether two
//! consecutive states straddle a crossing. [`CrossingScanner`] samples the
//! probe on a fixed grid over a half-open window and hands every bracket
//! that changed to a [`Refinement`] strategy:
//!
//! - [`Bisection`]: fixed number of halvings, keeping the pre-crossing
//!   state at the low end and the post-crossing state at the high end; the
//!   final high bound is the crossing instant.
//! - [`LinearInterpolation`]: one-shot interpolation of a scalar deviation
//!   between the bracket ends, with no extra samples.
//!
//! The scan begins one step before the window start, so a crossing that
//! happens exactly at `start` is bracketed and reported. Crossings whose
//! refined instant falls outside `[start, end)` are dropped.

use gochara_time::{ScanWindow, TimeInstant};
use tracing::trace;

use crate::error::SearchError;

/// Something that can be sampled over time and checked for crossings.
pub trait CrossingProbe {
    type State: Clone;

    /// Sample the state at `t`.
    fn sample(&self, t: TimeInstant) -> Result<Self::State, SearchError>;

    /// Whether a crossing lies between two consecutive samples.
    fn changed(&self, prev: &Self::State, next: &Self::State) -> bool;

    /// Whether `mid`, sampled inside a changed bracket, is already on the
    /// post-crossing side. Drives bisection.
    fn reached(&self, prev: &Self::State, _next: &Self::State, mid: &Self::State) -> bool {
        self.changed(prev, mid)
    }
}

/// A probe whose state carries a signed deviation that is zero at the crossing.
pub trait ScalarProbe: CrossingProbe {
    fn deviation(&self, state: &Self::State) -> f64;
}

/// Result of refining one bracket.
#[derive(Debug, Clone, PartialEq)]
pub struct Refined<S> {
    pub time: TimeInstant,
    /// State sampled at `time`, when the strategy sampled it.
    pub state: Option<S>,
}

/// Strategy that narrows a changed bracket `[lo, hi]` to a crossing instant.
pub trait Refinement<P: CrossingProbe + ?Sized> {
    fn refine(
        &self,
        probe: &P,
        lo: (TimeInstant, &P::State),
        hi: (TimeInstant, &P::State),
    ) -> Result<Refined<P::State>, SearchError>;
}

/// Fixed-iteration bisection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bisection {
    pub iterations: u32,
}

impl<P: CrossingProbe + ?Sized> Refinement<P> for Bisection {
    fn refine(
        &self,
        probe: &P,
        lo: (TimeInstant, &P::State),
        hi: (TimeInstant, &P::State),
    ) -> Result<Refined<P::State>, SearchError> {
        let (mut t_lo, prev) = lo;
        let (mut t_hi, next) = hi;
        let mut hi_state = next.clone();
        for _ in 0..self.iterations {
            let t_mid = t_lo.midpoint(t_hi);
            let mid = probe.sample(t_mid)?;
            if probe.reached(prev, next, &mid) {
                t_hi = t_mid;
                hi_state = mid;
            } else {
                t_lo = t_mid;
            }
        }
        Ok(Refined {
            time: t_hi,
            state: Some(hi_state),
        })
    }
}

/// Linear interpolation of the deviation across the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinearInterpolation;

impl<P: ScalarProbe + ?Sized> Refinement<P> for LinearInterpolation {
    fn refine(
        &self,
        probe: &P,
        lo: (TimeInstant, &P::State),
        hi: (TimeInstant, &P::State),
    ) -> Result<Refined<P::State>, SearchError> {
        let d_prev = probe.deviation(lo.1).abs();
        let d_next = probe.deviation(hi.1).abs();
        let total = d_prev + d_next;
        let fraction = if total > 0.0 { d_prev / total } else { 0.0 };
        Ok(Refined {
            time: lo.0.plus_days((hi.0 - lo.0) * fraction),
            state: None,
        })
    }
}

/// Half-open zero crossing: a sample exactly at zero counts as the
/// post-crossing side, so each crossing fires once.
pub fn crosses_zero(prev: f64, next: f64) -> bool {
    (prev > 0.0 && next <= 0.0) || (prev < 0.0 && next >= 0.0)
}

/// One refined crossing.
#[derive(Debug, Clone, PartialEq)]
pub struct Crossing<S> {
    /// Refined crossing instant, inside the scan window.
    pub time: TimeInstant,
    /// State at the low end of the coarse bracket.
    pub prev: S,
    /// State at the high end of the coarse bracket.
    pub next: S,
    /// State at `time`, when the refinement sampled it.
    pub at: Option<S>,
    /// The coarse bracket `[t_prev, t_next]`.
    pub bracket: (TimeInstant, TimeInstant),
}

/// Lazy, finite, non-restartable sequence of crossings over a window.
///
/// The grid is `start - step + k * step`, with the last point clamped to
/// `end`. Each sample is taken once; the high end of one bracket is carried
/// forward as the low end of the next. After an error the scanner is
/// exhausted.
pub struct CrossingScanner<'p, P: CrossingProbe + ?Sized, R> {
    probe: &'p P,
    refinement: R,
    window: ScanWindow,
    step_days: f64,
    origin: TimeInstant,
    k: u64,
    t_prev: TimeInstant,
    prev: Option<P::State>,
    finished: bool,
}

impl<'p, P, R> CrossingScanner<'p, P, R>
where
    P: CrossingProbe + ?Sized,
    R: Refinement<P>,
{
    pub fn new(
        probe: &'p P,
        refinement: R,
        window: ScanWindow,
        step_days: f64,
    ) -> Result<Self, SearchError> {
        if !step_days.is_finite() || step_days <= 0.0 {
            return Err(SearchError::InvalidConfig("step_days must be positive"));
        }
        let origin = window.start.plus_days(-step_days);
        Ok(Self {
            probe,
            refinement,
            window,
            step_days,
            origin,
            k: 0,
            t_prev: origin,
            prev: None,
            finished: false,
        })
    }

    fn fail(&mut self, e: SearchError) -> Option<Result<Crossing<P::State>, SearchError>> {
        self.finished = true;
        self.prev = None;
        Some(Err(e))
    }
}

impl<P, R> Iterator for CrossingScanner<'_, P, R>
where
    P: CrossingProbe + ?Sized,
    R: Refinement<P>,
{
    type Item = Result<Crossing<P::State>, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished || self.t_prev >= self.window.end {
                self.finished = true;
                return None;
            }

            let prev = match self.prev.take() {
                Some(s) => s,
                None => match self.probe.sample(self.t_prev) {
                    Ok(s) => s,
                    Err(e) => return self.fail(e),
                },
            };

            let mut t_next = self.origin.plus_days((self.k + 1) as f64 * self.step_days);
            if t_next > self.window.end {
                t_next = self.window.end;
            }
            if t_next <= self.t_prev {
                return self.fail(SearchError::InvalidConfig(
                    "step_days too small to advance the scan",
                ));
            }
            let next = match self.probe.sample(t_next) {
                Ok(s) => s,
                Err(e) => return self.fail(e),
            };

            let t_prev = self.t_prev;
            self.k += 1;
            self.t_prev = t_next;
            self.prev = Some(next.clone());

            if !self.probe.changed(&prev, &next) {
                continue;
            }
            let refined =
                match self
                    .refinement
                    .refine(self.probe, (t_prev, &prev), (t_next, &next))
                {
                    Ok(r) => r,
                    Err(e) => return self.fail(e),
                };
            if !self.window.contains(refined.time) {
                trace!(jd = refined.time.jd(), "crossing outside window dropped");
                continue;
            }
            trace!(jd = refined.time.jd(), "crossing refined");
            return Some(Ok(Crossing {
                time: refined.time,
                prev,
                next,
                at: refined.state,
                bracket: (t_prev, t_next),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// `f(t) = slope * (t - root)`, sampled with a call counter.
    struct LinearRoot {
        root: f64,
        slope: f64,
        calls: Cell<usize>,
        fail_after: Option<f64>,
    }

    impl LinearRoot {
        fn new(root: f64, slope: f64) -> Self {
            Self {
                root,
                slope,
                calls: Cell::new(0),
                fail_after: None,
            }
        }
    }

    impl CrossingProbe for LinearRoot {
        type State = f64;

        fn sample(&self, t: TimeInstant) -> Result<f64, SearchError> {
            self.calls.set(self.calls.get() + 1);
            if let Some(limit) = self.fail_after {
                if t.jd() > limit {
                    return Err(SearchError::InvalidConfig("probe failure"));
                }
            }
            Ok(self.slope * (t.jd() - self.root))
        }

        fn changed(&self, prev: &f64, next: &f64) -> bool {
            crosses_zero(*prev, *next)
        }
    }

    impl ScalarProbe for LinearRoot {
        fn deviation(&self, state: &f64) -> f64 {
            *state
        }
    }

    fn window(start: f64, end: f64) -> ScanWindow {
        ScanWindow::new(TimeInstant::from_jd(start), TimeInstant::from_jd(end)).unwrap()
    }

    fn bisect(probe: &LinearRoot, w: ScanWindow, step: f64) -> Vec<Crossing<f64>> {
        CrossingScanner::new(probe, Bisection { iterations: 10 }, w, step)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn bisection_converges_within_resolution() {
        let probe = LinearRoot::new(5.3, 1.0);
        let found = bisect(&probe, window(0.0, 10.0), 1.0);
        assert_eq!(found.len(), 1);
        let t = found[0].time.jd();
        assert!(t >= 5.3 && t - 5.3 <= 1.0 / 1024.0, "t = {t}");
        assert_eq!(found[0].bracket, (TimeInstant::from_jd(5.0), TimeInstant::from_jd(6.0)));
        assert!(found[0].at.unwrap() >= 0.0);
    }

    #[test]
    fn each_sample_taken_once() {
        let probe = LinearRoot::new(5.3, 1.0);
        bisect(&probe, window(0.0, 10.0), 1.0);
        // lead-in + 11 grid points (0..=10) + 10 bisection samples
        assert_eq!(probe.calls.get(), 22);
    }

    #[test]
    fn crossing_at_start_is_included() {
        let probe = LinearRoot::new(0.0, 1.0);
        let found = bisect(&probe, window(0.0, 10.0), 1.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].time.jd(), 0.0);
    }

    #[test]
    fn crossing_at_end_is_excluded() {
        let probe = LinearRoot::new(10.0, 1.0);
        assert!(bisect(&probe, window(0.0, 10.0), 1.0).is_empty());
    }

    #[test]
    fn crossing_on_grid_point_fires_once() {
        let probe = LinearRoot::new(4.0, -2.0);
        let found = bisect(&probe, window(0.0, 10.0), 1.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].time.jd(), 4.0);
    }

    #[test]
    fn last_step_is_clamped_to_end() {
        let probe = LinearRoot::new(9.9, 1.0);
        let found = bisect(&probe, window(0.0, 9.95), 1.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].bracket.1, TimeInstant::from_jd(9.95));
    }

    #[test]
    fn linear_interpolation_is_exact_for_linear_deviation() {
        let probe = LinearRoot::new(3.37, 0.8);
        let found: Vec<_> = CrossingScanner::new(&probe, LinearInterpolation, window(0.0, 10.0), 0.25)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!((found[0].time.jd() - 3.37).abs() < 1e-9);
        assert!(found[0].at.is_none());
        // lead-in + 41 grid points (0..=10), no refinement samples
        assert_eq!(probe.calls.get(), 42);
    }

    #[test]
    fn error_ends_the_scan() {
        let mut probe = LinearRoot::new(8.0, 1.0);
        probe.fail_after = Some(3.5);
        let mut scan =
            CrossingScanner::new(&probe, Bisection { iterations: 10 }, window(0.0, 10.0), 1.0)
                .unwrap();
        assert!(matches!(scan.next(), Some(Err(SearchError::InvalidConfig(_)))));
        assert!(scan.next().is_none());
    }

    #[test]
    fn rejects_non_positive_step() {
        let probe = LinearRoot::new(1.0, 1.0);
        assert!(CrossingScanner::new(&probe, LinearInterpolation, window(0.0, 1.0), 0.0).is_err());
        assert!(
            CrossingScanner::new(&probe, LinearInterpolation, window(0.0, 1.0), f64::NAN).is_err()
        );
    }

    #[test]
    fn zero_crossing_rule() {
        assert!(crosses_zero(1.0, -1.0));
        assert!(crosses_zero(1.0, 0.0));
        assert!(crosses_zero(-1.0, 0.0));
        assert!(!crosses_zero(0.0, 1.0));
        assert!(!crosses_zero(0.0, -1.0));
        assert!(!crosses_zero(2.0, 1.0));
    }
}
