//! Snapshot of every tracked body's position at one instant.

use gochara_core::{Body, MotionClass, PositionOracle, SignPosition, ZodiacSign, format_degree};
use gochara_time::TimeInstant;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// One body's position, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionEntry {
    pub name: Body,
    /// Longitude in [0, 360).
    pub full_degree: f64,
    pub sign: ZodiacSign,
    /// `D° M' S"` within the sign.
    pub degree_str: String,
    pub retrograde: bool,
}

/// Positions of `bodies` at `t`, in the order given.
///
/// Mean nodes are always reported retrograde.
pub fn positions_at(
    oracle: &PositionOracle<'_>,
    bodies: &[Body],
    t: TimeInstant,
) -> Result<Vec<PositionEntry>, SearchError> {
    bodies
        .iter()
        .map(|&body| -> Result<PositionEntry, SearchError> {
            let pos = oracle.position(body, t)?;
            let sp = SignPosition::from_longitude(pos.longitude_deg);
            Ok(PositionEntry {
                name: body,
                full_degree: pos.longitude_deg,
                sign: sp.sign,
                degree_str: format_degree(sp.degrees_in_sign),
                retrograde: body.motion() == MotionClass::Node || pos.is_retrograde(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gochara_core::{Motion, ReferenceFrame, SyntheticSource};

    #[test]
    fn snapshot_fields() {
        let src = SyntheticSource::new(TimeInstant::from_jd(0.0))
            .with(Body::Mercury, Motion::Linear { lon0: 75.5, rate: -0.3 })
            .with(Body::Rahu, Motion::Linear { lon0: 10.0, rate: 0.01 });
        let oracle = PositionOracle::new(&src, ReferenceFrame::Tropical);
        let rows = positions_at(
            &oracle,
            &[Body::Mercury, Body::Rahu, Body::Ketu],
            TimeInstant::from_jd(0.0),
        )
        .unwrap();

        assert_eq!(rows[0].sign, ZodiacSign::Gemini);
        assert_eq!(rows[0].degree_str, "15° 30' 0\"");
        assert!(rows[0].retrograde);
        // nodes are retrograde regardless of the sampled speed
        assert!(rows[1].retrograde);
        assert!(rows[2].retrograde);
        assert!((rows[2].full_degree - 190.0).abs() < 1e-12);
        assert_eq!(rows[2].sign, ZodiacSign::Libra);
    }

    #[test]
    fn missing_body_fails_snapshot() {
        let src = SyntheticSource::new(TimeInstant::from_jd(0.0));
        let oracle = PositionOracle::new(&src, ReferenceFrame::Tropical);
        assert!(positions_at(&oracle, &[Body::Sun], TimeInstant::from_jd(0.0)).is_err());
    }
}
