//! Transit event search: sign ingresses, retrograde stations, and exact aspects.
//!
//! This crate provides:
//! - A generic crossing scanner with bisection and linear-interpolation refinement
//! - Sign transit, retrograde station, and aspect crossing detectors
//! - An aggregator that runs independent scans (in parallel via rayon) and
//!   merges their events by time
//! - Calendar presets (monthly calendar, yearly transits) with serializable entries
//! - Position snapshots

pub mod aggregate;
pub mod aspect;
pub mod calendar;
pub mod config;
pub mod error;
pub mod event;
pub mod positions;
pub mod scanner;
pub mod station;
pub mod transit;

pub use aggregate::{ScanJob, collect_events};
pub use aspect::{AspectProbe, aspect_deviation, aspects_for_pair, body_pairs};
pub use calendar::{
    CalendarConfig, CalendarEntry, TransitEntry, calendar_month, month_events, transits_year,
};
pub use config::{ASPECT_TARGETS, AspectConfig, DEFAULT_BISECTION_ITERATIONS, ScanConfig};
pub use error::SearchError;
pub use event::{AspectExact, AspectKind, Event, SignIngress, Station, StationKind};
pub use positions::{PositionEntry, positions_at};
pub use scanner::{
    Bisection, Crossing, CrossingProbe, CrossingScanner, LinearInterpolation, Refined,
    Refinement, ScalarProbe, crosses_zero,
};
pub use station::{SpeedProbe, stations, validate_station_body};
pub use transit::{SignProbe, SignState, sign_ingresses};
