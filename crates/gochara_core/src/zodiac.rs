//! Zodiac sign mapping and degree formatting.
//!
//! The ecliptic is divided into 12 equal signs of 30 degrees each,
//! starting from Aries (Mesha) at 0 deg.

use serde::{Deserialize, Serialize};

use crate::position::normalize_360;

/// Width of one sign in degrees.
pub const SIGN_SPAN_DEG: f64 = 30.0;

/// The 12 zodiac signs starting from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in order (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Sanskrit (rashi) name.
    pub const fn sanskrit_name(self) -> &'static str {
        match self {
            Self::Aries => "Mesha",
            Self::Taurus => "Vrishabha",
            Self::Gemini => "Mithuna",
            Self::Cancer => "Karka",
            Self::Leo => "Simha",
            Self::Virgo => "Kanya",
            Self::Libra => "Tula",
            Self::Scorpio => "Vrischika",
            Self::Sagittarius => "Dhanu",
            Self::Capricorn => "Makara",
            Self::Aquarius => "Kumbha",
            Self::Pisces => "Meena",
        }
    }

    /// 0-based index (Aries = 0 .. Pisces = 11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<ZodiacSign> {
        ALL_SIGNS.get(index as usize).copied()
    }

    /// Sign containing an ecliptic longitude (any real value).
    pub fn from_longitude(lon_deg: f64) -> ZodiacSign {
        ALL_SIGNS[sign_index(lon_deg) as usize]
    }

    pub const fn all() -> &'static [ZodiacSign; 12] {
        &ALL_SIGNS
    }
}

impl std::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sign index `floor((lon mod 360) / 30) mod 12`, always in [0, 11].
pub fn sign_index(lon_deg: f64) -> u8 {
    let lon = normalize_360(lon_deg);
    ((lon / SIGN_SPAN_DEG).floor() as u8) % 12
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: u16,
    pub minutes: u8,
    /// Arc-seconds (0.0..60.0), may include a fractional part.
    pub seconds: f64,
}

/// Convert decimal degrees to degrees-minutes-seconds (absolute value).
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let degrees = d.floor() as u16;
    let remainder = (d - degrees as f64) * 60.0;
    let minutes = remainder.floor() as u8;
    let seconds = (remainder - minutes as f64) * 60.0;
    Dms {
        degrees,
        minutes,
        seconds,
    }
}

/// Render an angle as `D° M' S"` with truncated integer parts.
pub fn format_degree(deg: f64) -> String {
    let dms = deg_to_dms(deg);
    format!("{}° {}' {}\"", dms.degrees, dms.minutes, dms.seconds.floor() as u8)
}

/// A longitude resolved into its sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignPosition {
    pub sign: ZodiacSign,
    /// Degrees within the sign, [0, 30).
    pub degrees_in_sign: f64,
}

impl SignPosition {
    pub fn from_longitude(lon_deg: f64) -> Self {
        let lon = normalize_360(lon_deg);
        let sign = ZodiacSign::from_longitude(lon);
        Self {
            sign,
            degrees_in_sign: lon - sign.index() as f64 * SIGN_SPAN_DEG,
        }
    }

    /// `"<sign> D° M' S\""`, the calendar display form.
    pub fn display(&self) -> String {
        format!("{} {}", self.sign.name(), format_degree(self.degrees_in_sign))
    }
}
