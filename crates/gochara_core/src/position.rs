//! Ecliptic longitude/speed samples and angle normalization.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize an angle to (-180, +180] degrees.
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// A body's ecliptic longitude and its rate of change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularPosition {
    /// Ecliptic longitude in degrees, always in [0, 360).
    pub longitude_deg: f64,
    /// Longitude speed in degrees per day; negative while retrograde.
    pub speed_deg_per_day: f64,
}

impl AngularPosition {
    /// Create a position, normalizing the longitude into [0, 360).
    pub fn new(longitude_deg: f64, speed_deg_per_day: f64) -> Self {
        Self {
            longitude_deg: normalize_360(longitude_deg),
            speed_deg_per_day,
        }
    }

    /// The same position shifted by a fixed angle, speed unchanged.
    pub fn offset(self, offset_deg: f64) -> Self {
        Self::new(self.longitude_deg + offset_deg, self.speed_deg_per_day)
    }

    pub fn is_retrograde(self) -> bool {
        self.speed_deg_per_day < 0.0
    }

    pub fn is_finite(self) -> bool {
        self.longitude_deg.is_finite() && self.speed_deg_per_day.is_finite()
    }
}
