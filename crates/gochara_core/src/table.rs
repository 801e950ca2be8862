//! Tabulated ephemeris source.
//!
//! A plain-text table of tropical longitude/speed samples, one row per
//! body and epoch:
//!
//! ```text
//! # body   jd_ut          longitude_deg   speed_deg_per_day
//! Sun      2460310.5      280.0321        1.01927
//! Sun      2460311.5      281.0515        1.01931
//! ```
//!
//! Blank lines and `#` comments are ignored. Rows for each body must have
//! strictly increasing Julian Days. Between samples the longitude is
//! interpolated with a cubic Hermite spline that uses the tabulated speeds
//! as end-point slopes, so both longitude and speed are continuous.

use std::path::Path;

use gochara_time::TimeInstant;
use tracing::debug;

use crate::body::{ALL_BODIES, Body};
use crate::error::{ConfigError, OracleError, OracleErrorKind};
use crate::frame::ReferenceFrame;
use crate::oracle::EphemerisSource;
use crate::position::{AngularPosition, normalize_to_pm180};

/// One tabulated sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSample {
    pub jd: f64,
    pub longitude_deg: f64,
    pub speed_deg_per_day: f64,
}

/// Ephemeris source backed by a longitude/speed table.
#[derive(Debug, Clone, Default)]
pub struct TableSource {
    // Indexed by `Body::index()`; empty for bodies without data.
    series: Vec<Vec<TableSample>>,
}

impl TableSource {
    /// Load a table from a file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::parse(&content)?;
        debug!(
            path = %path.display(),
            bodies = table.bodies().len(),
            "loaded ephemeris table"
        );
        Ok(table)
    }

    /// Parse a table from its text content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut series: Vec<Vec<TableSample>> = vec![Vec::new(); ALL_BODIES.len()];
        // Line of the first row per body, for error reporting.
        let mut first_line = [0usize; 12];

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = match raw.find('#') {
                Some(pos) => &raw[..pos],
                None => raw,
            };
            let mut fields = line.split_whitespace();
            let Some(name) = fields.next() else {
                continue;
            };
            let body = Body::from_name(name).map_err(|_| ConfigError::InvalidTable {
                line: line_no,
                reason: "unknown body name",
            })?;
            if !body.is_primary() {
                return Err(ConfigError::InvalidTable {
                    line: line_no,
                    reason: "derived bodies cannot be tabulated",
                });
            }
            let jd = parse_field(fields.next(), line_no)?;
            let longitude_deg = parse_field(fields.next(), line_no)?;
            let speed_deg_per_day = parse_field(fields.next(), line_no)?;
            if fields.next().is_some() {
                return Err(ConfigError::InvalidTable {
                    line: line_no,
                    reason: "expected 4 fields",
                });
            }

            let rows = &mut series[body.index()];
            if let Some(last) = rows.last() {
                if jd <= last.jd {
                    return Err(ConfigError::InvalidTable {
                        line: line_no,
                        reason: "julian days must be strictly increasing per body",
                    });
                }
            } else {
                first_line[body.index()] = line_no;
            }
            rows.push(TableSample {
                jd,
                longitude_deg,
                speed_deg_per_day,
            });
        }

        for (i, rows) in series.iter().enumerate() {
            if rows.len() == 1 {
                return Err(ConfigError::InvalidTable {
                    line: first_line[i],
                    reason: "a body needs at least two samples",
                });
            }
        }
        if series.iter().all(Vec::is_empty) {
            return Err(ConfigError::EmptyTable);
        }
        Ok(Self { series })
    }

    /// Build a table by sampling another source on a regular grid.
    ///
    /// Samples are taken in the tropical frame at `start + k * step_days`
    /// up to and including the first epoch at or past `end`.
    pub fn tabulate(
        source: &dyn EphemerisSource,
        bodies: &[Body],
        start: TimeInstant,
        end: TimeInstant,
        step_days: f64,
    ) -> Result<Self, ConfigError> {
        if !step_days.is_finite() || step_days <= 0.0 {
            return Err(ConfigError::InvalidStep(step_days));
        }
        let mut series: Vec<Vec<TableSample>> = vec![Vec::new(); ALL_BODIES.len()];
        let count = (((end - start) / step_days).ceil().max(1.0)) as usize + 1;
        for &body in bodies.iter().filter(|b| b.is_primary()) {
            let rows = &mut series[body.index()];
            rows.clear();
            for k in 0..count {
                let t = start.plus_days(k as f64 * step_days);
                let pos = source.position(body, t, ReferenceFrame::Tropical)?;
                rows.push(TableSample {
                    jd: t.jd(),
                    longitude_deg: pos.longitude_deg,
                    speed_deg_per_day: pos.speed_deg_per_day,
                });
            }
        }
        Ok(Self { series })
    }

    /// Render the table in the text format accepted by [`TableSource::parse`].
    pub fn to_text(&self) -> String {
        let mut out = String::from("# body jd_ut longitude_deg speed_deg_per_day\n");
        for body in ALL_BODIES {
            for s in self.samples(body) {
                out.push_str(&format!(
                    "{} {:.6} {:.9} {:.9}\n",
                    body.name(),
                    s.jd,
                    s.longitude_deg,
                    s.speed_deg_per_day
                ));
            }
        }
        out
    }

    /// Samples for one body (empty when the body is not tabulated).
    pub fn samples(&self, body: Body) -> &[TableSample] {
        self.series
            .get(body.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Bodies with data, in canonical order.
    pub fn bodies(&self) -> Vec<Body> {
        ALL_BODIES
            .into_iter()
            .filter(|&b| !self.samples(b).is_empty())
            .collect()
    }

    /// First and last Julian Day covered for a body.
    pub fn range(&self, body: Body) -> Option<(f64, f64)> {
        let rows = self.samples(body);
        Some((rows.first()?.jd, rows.last()?.jd))
    }

    fn interpolate(&self, body: Body, jd: f64) -> Result<AngularPosition, OracleError> {
        let rows = self.samples(body);
        let (first, last) = match (rows.first(), rows.last()) {
            (Some(f), Some(l)) => (f.jd, l.jd),
            _ => return Err(OracleError::new(body, jd, OracleErrorKind::MissingBody)),
        };
        if !(jd >= first && jd <= last) {
            return Err(OracleError::new(
                body,
                jd,
                OracleErrorKind::OutOfRange {
                    first_jd: first,
                    last_jd: last,
                },
            ));
        }

        // Index of the first sample strictly after jd, clamped so that
        // jd == last uses the final interval.
        let hi = rows.partition_point(|s| s.jd <= jd).clamp(1, rows.len() - 1);
        let a = rows[hi - 1];
        let b = rows[hi];
        Ok(hermite(a, b, jd))
    }
}

impl EphemerisSource for TableSource {
    fn position(
        &self,
        body: Body,
        t: TimeInstant,
        frame: ReferenceFrame,
    ) -> Result<AngularPosition, OracleError> {
        let tropical = self.interpolate(body, t.jd())?;
        Ok(frame.from_tropical(tropical, t))
    }
}

fn parse_field(field: Option<&str>, line: usize) -> Result<f64, ConfigError> {
    let text = field.ok_or(ConfigError::InvalidTable {
        line,
        reason: "expected 4 fields",
    })?;
    let value: f64 = text.parse().map_err(|_| ConfigError::InvalidTable {
        line,
        reason: "invalid number",
    })?;
    if !value.is_finite() {
        return Err(ConfigError::InvalidTable {
            line,
            reason: "non-finite number",
        });
    }
    Ok(value)
}

/// Cubic Hermite interpolation on the unwrapped longitude.
fn hermite(a: TableSample, b: TableSample, jd: f64) -> AngularPosition {
    let h = b.jd - a.jd;
    let s = (jd - a.jd) / h;
    let p0 = a.longitude_deg;
    let p1 = p0 + normalize_to_pm180(b.longitude_deg - a.longitude_deg);
    let m0 = a.speed_deg_per_day * h;
    let m1 = b.speed_deg_per_day * h;

    let s2 = s * s;
    let s3 = s2 * s;
    let lon = (2.0 * s3 - 3.0 * s2 + 1.0) * p0
        + (s3 - 2.0 * s2 + s) * m0
        + (-2.0 * s3 + 3.0 * s2) * p1
        + (s3 - s2) * m1;
    let dlon_ds = (6.0 * s2 - 6.0 * s) * p0
        + (3.0 * s2 - 4.0 * s + 1.0) * m0
        + (-6.0 * s2 + 6.0 * s) * p1
        + (3.0 * s2 - 2.0 * s) * m1;
    AngularPosition::new(lon, dlon_ds / h)
}
