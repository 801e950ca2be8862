//! Core types for transit event search.
//!
//! This crate provides:
//! - The tracked-body table (primary and derived bodies)
//! - Zodiac sign mapping and degree formatting
//! - Tropical and sidereal reference frames
//! - The [`EphemerisSource`] contract and the per-request [`PositionOracle`]
//! - A tabulated source with Hermite interpolation and a closed-form synthetic source

pub mod body;
pub mod error;
pub mod frame;
pub mod oracle;
pub mod position;
pub mod synthetic;
pub mod table;
pub mod zodiac;

pub use body::{ALL_BODIES, BODY_TABLE, Body, BodyDef, BodyKind, MotionClass};
pub use error::{ConfigError, OracleError, OracleErrorKind};
pub use frame::{AyanamshaSystem, ReferenceFrame, ayanamsha_deg, general_precession_deg};
pub use oracle::{EphemerisSource, PositionOracle};
pub use position::{AngularPosition, normalize_360, normalize_to_pm180};
pub use synthetic::{Motion, SyntheticSource};
pub use table::{TableSample, TableSource};
pub use zodiac::{
    ALL_SIGNS, Dms, SIGN_SPAN_DEG, SignPosition, ZodiacSign, deg_to_dms, format_degree,
    sign_index,
};
