//! Reference frames: tropical, or sidereal under an ayanamsha system.
//!
//! The ayanamsha is the angular offset between the tropical zodiac
//! (anchored to the vernal equinox) and a sidereal zodiac (anchored to the
//! fixed stars). Each system is defined by its J2000.0 value; the offset at
//! any epoch adds the IAU 2006 general precession in longitude.

use gochara_time::{DAYS_PER_CENTURY, TimeInstant, jd_to_centuries};

use crate::error::ConfigError;
use crate::position::AngularPosition;

/// Sidereal reference systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AyanamshaSystem {
    /// Lahiri (Chitrapaksha): Spica at 0 Libra sidereal.
    Lahiri,
    /// Krishnamurti Paddhati: minimal offset from Lahiri.
    Krishnamurti,
    /// B.V. Raman.
    Raman,
    /// Fagan-Bradley, the Western sidereal standard.
    FaganBradley,
    /// Sri Yukteshwar.
    Yukteshwar,
}

const ALL_SYSTEMS: [AyanamshaSystem; 5] = [
    AyanamshaSystem::Lahiri,
    AyanamshaSystem::Krishnamurti,
    AyanamshaSystem::Raman,
    AyanamshaSystem::FaganBradley,
    AyanamshaSystem::Yukteshwar,
];

impl AyanamshaSystem {
    /// Ayanamsha at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            Self::Lahiri => 23.853,
            Self::Krishnamurti => 23.850,
            Self::Raman => 22.370,
            Self::FaganBradley => 24.736,
            Self::Yukteshwar => 22.376,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Lahiri => "lahiri",
            Self::Krishnamurti => "krishnamurti",
            Self::Raman => "raman",
            Self::FaganBradley => "fagan-bradley",
            Self::Yukteshwar => "yukteshwar",
        }
    }

    pub const fn all() -> &'static [AyanamshaSystem] {
        &ALL_SYSTEMS
    }
}

/// IAU 2006 general precession in longitude, in degrees, `t` in Julian centuries.
pub fn general_precession_deg(t: f64) -> f64 {
    let arcsec = t
        * (5028.796195 + t * (1.1054348 + t * (0.00007964 + t * (-0.000023857 + t * -0.0000000383))));
    arcsec / 3600.0
}

/// Rate of general precession in degrees per day.
fn general_precession_rate_deg_per_day(t: f64) -> f64 {
    let arcsec_per_century = 5028.796195
        + t * (2.0 * 1.1054348
            + t * (3.0 * 0.00007964 + t * (4.0 * -0.000023857 + t * 5.0 * -0.0000000383)));
    arcsec_per_century / 3600.0 / DAYS_PER_CENTURY
}

/// Mean ayanamsha in degrees at an instant.
pub fn ayanamsha_deg(system: AyanamshaSystem, t: TimeInstant) -> f64 {
    system.reference_j2000_deg() + general_precession_deg(jd_to_centuries(t.jd()))
}

/// Frame in which longitudes are measured. Fixed for a whole request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceFrame {
    Tropical,
    Sidereal(AyanamshaSystem),
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self::Sidereal(AyanamshaSystem::Lahiri)
    }
}

impl ReferenceFrame {
    /// Parse `"tropical"` or an ayanamsha system name (`"lahiri"`, `"kp"`, ...).
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        let lower = name.trim().to_ascii_lowercase();
        match lower.as_str() {
            "tropical" => Ok(Self::Tropical),
            "kp" => Ok(Self::Sidereal(AyanamshaSystem::Krishnamurti)),
            "fagan" | "faganbradley" => Ok(Self::Sidereal(AyanamshaSystem::FaganBradley)),
            other => ALL_SYSTEMS
                .iter()
                .find(|s| s.name() == other)
                .map(|&s| Self::Sidereal(s))
                .ok_or_else(|| ConfigError::UnknownFrame(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Tropical => "tropical",
            Self::Sidereal(system) => system.name(),
        }
    }

    /// Convert a tropical position into this frame at instant `t`.
    ///
    /// Longitude drops by the ayanamsha; speed drops by its rate.
    pub fn from_tropical(self, tropical: AngularPosition, t: TimeInstant) -> AngularPosition {
        match self {
            Self::Tropical => tropical,
            Self::Sidereal(system) => {
                let rate = general_precession_rate_deg_per_day(jd_to_centuries(t.jd()));
                AngularPosition::new(
                    tropical.longitude_deg - ayanamsha_deg(system, t),
                    tropical.speed_deg_per_day - rate,
                )
            }
        }
    }
}
