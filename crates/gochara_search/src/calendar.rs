//! Calendar presets: the monthly event calendar and yearly transit lists.
//!
//! These fix the body sets, steps and display conventions of the calendar
//! views and render events into serializable entries with local
//! timestamps.

use chrono_tz::Tz;
use gochara_core::{ALL_BODIES, Body, PositionOracle, SignPosition, ZodiacSign};
use gochara_time::{DEFAULT_DISPLAY_TZ, LocalTimestamp, ScanWindow};
use serde::{Deserialize, Serialize};

use crate::aggregate::{ScanJob, collect_events};
use crate::aspect::body_pairs;
use crate::config::{AspectConfig, ScanConfig};
use crate::error::SearchError;
use crate::event::{Event, SignIngress};

/// Body sets, steps, and display settings for calendar queries.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarConfig {
    /// Tracked bodies, in pair-enumeration order.
    pub bodies: Vec<Body>,
    /// Bodies left out of pairwise aspect scans.
    pub aspect_exclude: Vec<Body>,
    /// Bodies left out of multi-body transit scans.
    pub transit_exclude: Vec<Body>,
    pub station_scan: ScanConfig,
    pub transit_scan: ScanConfig,
    pub aspect: AspectConfig,
    /// Zone used for rendered timestamps.
    pub display_tz: Tz,
    /// Run independent scans on the rayon pool.
    pub parallel: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            bodies: ALL_BODIES.to_vec(),
            aspect_exclude: vec![Body::Moon],
            transit_exclude: vec![Body::Moon],
            station_scan: ScanConfig::slow_body(),
            transit_scan: ScanConfig::slow_body(),
            aspect: AspectConfig::default(),
            display_tz: DEFAULT_DISPLAY_TZ,
            parallel: true,
        }
    }
}

impl CalendarConfig {
    pub fn with_display_tz(mut self, tz: Tz) -> Self {
        self.display_tz = tz;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Scan jobs for one month: stations, then aspects, then transits.
    pub fn month_jobs(&self) -> Vec<ScanJob> {
        let mut jobs = Vec::new();
        for &body in self.bodies.iter().filter(|b| b.can_station()) {
            jobs.push(ScanJob::Station {
                body,
                scan: self.station_scan,
            });
        }
        let aspect_bodies: Vec<Body> = self
            .bodies
            .iter()
            .copied()
            .filter(|b| !self.aspect_exclude.contains(b))
            .collect();
        for (a, b) in body_pairs(&aspect_bodies) {
            jobs.push(ScanJob::Aspects {
                a,
                b,
                config: self.aspect.clone(),
            });
        }
        jobs.extend(self.transit_jobs());
        jobs
    }

    /// Transit jobs for every tracked body not excluded.
    pub fn transit_jobs(&self) -> Vec<ScanJob> {
        self.bodies
            .iter()
            .copied()
            .filter(|b| !self.transit_exclude.contains(b))
            .map(|body| ScanJob::Transit {
                body,
                scan: self.transit_scan,
            })
            .collect()
    }
}

/// One rendered row of the monthly calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    /// ISO-8601 timestamp in the display zone.
    pub date: String,
    /// `%d %b %Y`
    pub display_date: String,
    /// `%I:%M %p`
    pub time: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub event_name: String,
    /// `"<sign> D° M' S\""` of the event longitude.
    pub degree: String,
}

impl CalendarEntry {
    pub fn from_event(event: &Event, tz: Tz) -> Result<Self, SearchError> {
        let local = LocalTimestamp::new(event.time(), tz)?;
        Ok(Self {
            date: local.iso8601(),
            display_date: local.display_date(),
            time: local.display_clock(),
            event_type: event.type_label().to_string(),
            event_name: event.name(),
            degree: SignPosition::from_longitude(event.longitude_deg()).display(),
        })
    }
}

/// One rendered row of a yearly transit list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitEntry {
    pub planet: Body,
    pub from_sign: ZodiacSign,
    pub to_sign: ZodiacSign,
    pub iso_time: String,
    /// `%d %b %Y, %I:%M %p`
    pub display_time: String,
}

impl TransitEntry {
    pub fn from_ingress(ingress: &SignIngress, tz: Tz) -> Result<Self, SearchError> {
        let local = LocalTimestamp::new(ingress.time, tz)?;
        Ok(Self {
            planet: ingress.body,
            from_sign: ingress.from_sign,
            to_sign: ingress.to_sign,
            iso_time: local.iso8601(),
            display_time: local.display_date_time(),
        })
    }
}

/// Events of one calendar month, merged and time-ordered.
pub fn month_events(
    oracle: &PositionOracle<'_>,
    year: i32,
    month: u32,
    config: &CalendarConfig,
) -> Result<Vec<Event>, SearchError> {
    let window = ScanWindow::month(year, month)?;
    collect_events(oracle, window, &config.month_jobs(), config.parallel)
}

/// The monthly calendar: stations, aspects, and transits of one month.
pub fn calendar_month(
    oracle: &PositionOracle<'_>,
    year: i32,
    month: u32,
    config: &CalendarConfig,
) -> Result<Vec<CalendarEntry>, SearchError> {
    month_events(oracle, year, month, config)?
        .iter()
        .map(|e| CalendarEntry::from_event(e, config.display_tz))
        .collect()
}

/// Sign ingresses over one calendar year.
///
/// With `body`, only that body is scanned, at its own preset step (finer
/// for the Moon). Without it, every tracked body not in
/// `transit_exclude` is scanned at the transit step.
pub fn transits_year(
    oracle: &PositionOracle<'_>,
    year: i32,
    body: Option<&str>,
    config: &CalendarConfig,
) -> Result<Vec<TransitEntry>, SearchError> {
    let jobs = match body {
        Some(name) => {
            let body = Body::from_name(name)?;
            vec![ScanJob::Transit {
                body,
                scan: ScanConfig::for_body(body),
            }]
        }
        None => config.transit_jobs(),
    };
    let window = ScanWindow::year(year)?;
    collect_events(oracle, window, &jobs, config.parallel)?
        .iter()
        .filter_map(|e| match e {
            Event::SignIngress(ingress) => Some(TransitEntry::from_ingress(ingress, config.display_tz)),
            _ => None,
        })
        .collect()
}
