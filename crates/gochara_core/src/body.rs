//! Tracked bodies and their lookup table.
//!
//! Every body is either *primary* (answered directly by the ephemeris
//! source) or *derived* (a fixed angular offset from another body, with
//! the same speed). Ketu is derived from Rahu at +180 deg.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Bodies known to the event search, in canonical order.
///
/// The canonical order is also the pair-enumeration order for aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    /// Mean ascending lunar node.
    Rahu,
    /// Descending lunar node, antipodal to Rahu.
    Ketu,
    Uranus,
    Neptune,
    Pluto,
}

/// How a body's position is resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    /// Position comes straight from the ephemeris source.
    Primary,
    /// `from.longitude + offset_deg (mod 360)`, same speed as `from`.
    Derived { from: Body, offset_deg: f64 },
}

/// Structural direction of motion, which decides station applicability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionClass {
    /// Sun and Moon: always direct.
    Luminary,
    /// Planets: alternate between direct and retrograde.
    Planet,
    /// Mean lunar nodes: always retrograde.
    Node,
}

/// One row of the body table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDef {
    pub body: Body,
    pub name: &'static str,
    pub sanskrit_name: &'static str,
    pub kind: BodyKind,
    pub motion: MotionClass,
}

const fn primary(
    body: Body,
    name: &'static str,
    sanskrit_name: &'static str,
    motion: MotionClass,
) -> BodyDef {
    BodyDef {
        body,
        name,
        sanskrit_name,
        kind: BodyKind::Primary,
        motion,
    }
}

/// The body table, indexed by `Body as usize`.
pub static BODY_TABLE: [BodyDef; 12] = [
    primary(Body::Sun, "Sun", "Surya", MotionClass::Luminary),
    primary(Body::Moon, "Moon", "Chandra", MotionClass::Luminary),
    primary(Body::Mars, "Mars", "Mangal", MotionClass::Planet),
    primary(Body::Mercury, "Mercury", "Buddh", MotionClass::Planet),
    primary(Body::Jupiter, "Jupiter", "Guru", MotionClass::Planet),
    primary(Body::Venus, "Venus", "Shukra", MotionClass::Planet),
    primary(Body::Saturn, "Saturn", "Shani", MotionClass::Planet),
    primary(Body::Rahu, "Rahu", "Rahu", MotionClass::Node),
    BodyDef {
        body: Body::Ketu,
        name: "Ketu",
        sanskrit_name: "Ketu",
        kind: BodyKind::Derived {
            from: Body::Rahu,
            offset_deg: 180.0,
        },
        motion: MotionClass::Node,
    },
    primary(Body::Uranus, "Uranus", "Uranus", MotionClass::Planet),
    primary(Body::Neptune, "Neptune", "Neptune", MotionClass::Planet),
    primary(Body::Pluto, "Pluto", "Pluto", MotionClass::Planet),
];

/// All tracked bodies in canonical order.
pub const ALL_BODIES: [Body; 12] = [
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
    Body::Rahu,
    Body::Ketu,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

impl Body {
    /// Table row for this body.
    pub fn def(self) -> &'static BodyDef {
        &BODY_TABLE[self as usize]
    }

    /// 0-based position in canonical order.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// English display name.
    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn sanskrit_name(self) -> &'static str {
        self.def().sanskrit_name
    }

    pub fn kind(self) -> BodyKind {
        self.def().kind
    }

    pub fn motion(self) -> MotionClass {
        self.def().motion
    }

    pub fn is_primary(self) -> bool {
        matches!(self.kind(), BodyKind::Primary)
    }

    /// Whether one of the two bodies is a fixed offset of the other, which
    /// pins their separation.
    pub fn is_locked_to(self, other: Body) -> bool {
        let derived_from = |body: Body, parent: Body| {
            matches!(body.kind(), BodyKind::Derived { from, .. } if from == parent)
        };
        derived_from(self, other) || derived_from(other, self)
    }

    /// Whether the body's direction can reverse (planets only).
    pub fn can_station(self) -> bool {
        self.motion() == MotionClass::Planet
    }

    /// All tracked bodies in canonical order.
    pub const fn all() -> &'static [Body; 12] {
        &ALL_BODIES
    }

    /// Look up a body by English or Sanskrit name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Body, ConfigError> {
        let needle = name.trim();
        BODY_TABLE
            .iter()
            .find(|def| {
                def.name.eq_ignore_ascii_case(needle)
                    || def.sanskrit_name.eq_ignore_ascii_case(needle)
            })
            .map(|def| def.body)
            .ok_or_else(|| ConfigError::UnknownBody(name.to_string()))
    }
}

impl FromStr for Body {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Body::from_name(s)
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
