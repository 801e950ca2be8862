//! Event records produced by the detectors.

use gochara_core::{Body, ZodiacSign};
use gochara_time::TimeInstant;
use serde::{Deserialize, Serialize};

/// A body entering a new zodiac sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignIngress {
    pub body: Body,
    pub time: TimeInstant,
    pub from_sign: ZodiacSign,
    pub to_sign: ZodiacSign,
    /// Longitude at the refined ingress instant (inside `to_sign`).
    pub longitude_deg: f64,
}

/// Direction of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationKind {
    /// Speed turns from positive to negative.
    RetrogradeStart,
    /// Speed turns from negative to positive.
    RetrogradeEnd,
}

impl StationKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::RetrogradeStart => "Retrograde Start",
            Self::RetrogradeEnd => "Retrograde End",
        }
    }
}

/// A body's speed crossing zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    pub body: Body,
    pub kind: StationKind,
    pub time: TimeInstant,
    pub longitude_deg: f64,
}

/// Aspect label for a target separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Label for one of the supported targets (0, 120, 180, 240).
    pub fn from_target(target_deg: f64) -> Option<AspectKind> {
        if target_deg == 0.0 {
            Some(Self::Conjunction)
        } else if target_deg == 180.0 {
            Some(Self::Opposition)
        } else if target_deg == 120.0 || target_deg == 240.0 {
            Some(Self::Trine)
        } else {
            None
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::Trine => "Trine",
            Self::Opposition => "Opposition",
        }
    }
}

/// Two bodies reaching an exact target separation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectExact {
    pub a: Body,
    pub b: Body,
    /// Target of `(lonA - lonB) mod 360`.
    pub target_deg: f64,
    pub kind: AspectKind,
    pub time: TimeInstant,
    /// Longitude of body `a` at the exact instant.
    pub longitude_deg: f64,
}

/// Any detected event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    SignIngress(SignIngress),
    RetrogradeStart(Station),
    RetrogradeEnd(Station),
    AspectExact(AspectExact),
}

impl Event {
    pub fn time(&self) -> TimeInstant {
        match self {
            Self::SignIngress(e) => e.time,
            Self::RetrogradeStart(e) | Self::RetrogradeEnd(e) => e.time,
            Self::AspectExact(e) => e.time,
        }
    }

    /// The body the event is about (body `a` for aspects).
    pub fn body(&self) -> Body {
        match self {
            Self::SignIngress(e) => e.body,
            Self::RetrogradeStart(e) | Self::RetrogradeEnd(e) => e.body,
            Self::AspectExact(e) => e.a,
        }
    }

    /// Longitude shown with the event.
    pub fn longitude_deg(&self) -> f64 {
        match self {
            Self::SignIngress(e) => e.longitude_deg,
            Self::RetrogradeStart(e) | Self::RetrogradeEnd(e) => e.longitude_deg,
            Self::AspectExact(e) => e.longitude_deg,
        }
    }

    pub fn sign(&self) -> ZodiacSign {
        match self {
            Self::SignIngress(e) => e.to_sign,
            _ => ZodiacSign::from_longitude(self.longitude_deg()),
        }
    }

    /// Event category: `Transit`, `Retrograde`, or the aspect label.
    pub fn type_label(&self) -> &'static str {
        match self {
            Self::SignIngress(_) => "Transit",
            Self::RetrogradeStart(_) | Self::RetrogradeEnd(_) => "Retrograde",
            Self::AspectExact(e) => e.kind.name(),
        }
    }

    /// Free-text name, e.g. `"Jupiter enters Taurus"`, `"Mars - Saturn Trine"`.
    pub fn name(&self) -> String {
        match self {
            Self::SignIngress(e) => format!("{} enters {}", e.body, e.to_sign),
            Self::RetrogradeStart(e) | Self::RetrogradeEnd(e) => {
                format!("{} {}", e.body, e.kind.name())
            }
            Self::AspectExact(e) => format!("{} - {} {}", e.a, e.b, e.kind.name()),
        }
    }
}

impl From<SignIngress> for Event {
    fn from(e: SignIngress) -> Self {
        Self::SignIngress(e)
    }
}

impl From<Station> for Event {
    fn from(e: Station) -> Self {
        match e.kind {
            StationKind::RetrogradeStart => Self::RetrogradeStart(e),
            StationKind::RetrogradeEnd => Self::RetrogradeEnd(e),
        }
    }
}

impl From<AspectExact> for Event {
    fn from(e: AspectExact) -> Self {
        Self::AspectExact(e)
    }
}
