//! Position oracle: the seam between event search and an ephemeris.
//!
//! [`EphemerisSource`] is the external contract: it answers primary bodies
//! only. [`PositionOracle`] wraps a source for the duration of one request,
//! pins the reference frame, resolves derived bodies, and rejects
//! non-finite answers so that a bad sample can never slip into a scan.

use gochara_time::TimeInstant;

use crate::body::{Body, BodyKind};
use crate::error::{OracleError, OracleErrorKind};
use crate::frame::ReferenceFrame;
use crate::position::AngularPosition;

/// External longitude/speed provider.
///
/// Implementations must be deterministic and safe for concurrent reads:
/// scans for different bodies and pairs may run on different threads.
pub trait EphemerisSource: Send + Sync {
    /// Position of a primary body at `t`, measured in `frame`.
    fn position(
        &self,
        body: Body,
        t: TimeInstant,
        frame: ReferenceFrame,
    ) -> Result<AngularPosition, OracleError>;
}

impl<S: EphemerisSource + ?Sized> EphemerisSource for &S {
    fn position(
        &self,
        body: Body,
        t: TimeInstant,
        frame: ReferenceFrame,
    ) -> Result<AngularPosition, OracleError> {
        (**self).position(body, t, frame)
    }
}

impl<S: EphemerisSource + ?Sized> EphemerisSource for Box<S> {
    fn position(
        &self,
        body: Body,
        t: TimeInstant,
        frame: ReferenceFrame,
    ) -> Result<AngularPosition, OracleError> {
        (**self).position(body, t, frame)
    }
}

/// Per-request view of an ephemeris source with a fixed reference frame.
pub struct PositionOracle<'a> {
    source: &'a dyn EphemerisSource,
    frame: ReferenceFrame,
}

impl<'a> PositionOracle<'a> {
    pub fn new(source: &'a dyn EphemerisSource, frame: ReferenceFrame) -> Self {
        Self { source, frame }
    }

    pub fn frame(&self) -> ReferenceFrame {
        self.frame
    }

    /// Position of any tracked body, primary or derived.
    pub fn position(&self, body: Body, t: TimeInstant) -> Result<AngularPosition, OracleError> {
        match body.kind() {
            BodyKind::Primary => {
                let pos = self.source.position(body, t, self.frame)?;
                if !pos.is_finite() {
                    return Err(OracleError::new(body, t.jd(), OracleErrorKind::NonFinite));
                }
                Ok(AngularPosition::new(pos.longitude_deg, pos.speed_deg_per_day))
            }
            BodyKind::Derived { from, offset_deg } => {
                let base = self.position(from, t).map_err(|e| OracleError { body, ..e })?;
                Ok(base.offset(offset_deg))
            }
        }
    }

    /// Longitude only, in [0, 360).
    pub fn longitude(&self, body: Body, t: TimeInstant) -> Result<f64, OracleError> {
        Ok(self.position(body, t)?.longitude_deg)
    }
}

impl std::fmt::Debug for PositionOracle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionOracle")
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}
