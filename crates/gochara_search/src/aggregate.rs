//! Event aggregation over independent scan jobs.
//!
//! A request is a list of [`ScanJob`]s. Every job is validated before any
//! scanning starts, then jobs run independently (optionally in parallel)
//! and their events are merged into one list ordered by time. The sort is
//! stable and job results are concatenated in job order, so simultaneous
//! events keep detector-emission order. No deduplication across kinds.

use gochara_core::{Body, PositionOracle};
use gochara_time::ScanWindow;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::aspect::{aspects_for_pair, validate_pair};
use crate::config::{AspectConfig, ScanConfig};
use crate::error::SearchError;
use crate::event::Event;
use crate::station::{stations, validate_station_body};
use crate::transit::sign_ingresses;

/// One (body | pair, detector) scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanJob {
    Transit { body: Body, scan: ScanConfig },
    Station { body: Body, scan: ScanConfig },
    Aspects { a: Body, b: Body, config: AspectConfig },
}

impl ScanJob {
    fn validate(&self) -> Result<(), SearchError> {
        match self {
            Self::Transit { scan, .. } => scan.validate().map_err(SearchError::InvalidConfig),
            Self::Station { body, scan } => {
                scan.validate().map_err(SearchError::InvalidConfig)?;
                validate_station_body(*body)
            }
            Self::Aspects { a, b, config } => {
                config.validate().map_err(SearchError::InvalidConfig)?;
                validate_pair(*a, *b)
            }
        }
    }

    /// Run this job's scan.
    pub fn run(
        &self,
        oracle: &PositionOracle<'_>,
        window: ScanWindow,
    ) -> Result<Vec<Event>, SearchError> {
        Ok(match self {
            Self::Transit { body, scan } => sign_ingresses(oracle, *body, window, scan)?
                .into_iter()
                .map(Event::from)
                .collect(),
            Self::Station { body, scan } => stations(oracle, *body, window, scan)?
                .into_iter()
                .map(Event::from)
                .collect(),
            Self::Aspects { a, b, config } => aspects_for_pair(oracle, *a, *b, window, config)?
                .into_iter()
                .map(Event::from)
                .collect(),
        })
    }
}

/// Run all jobs over `window` and merge their events by time.
///
/// Fails as a whole if any job fails.
pub fn collect_events(
    oracle: &PositionOracle<'_>,
    window: ScanWindow,
    jobs: &[ScanJob],
    parallel: bool,
) -> Result<Vec<Event>, SearchError> {
    for job in jobs {
        job.validate()?;
    }

    let per_job: Vec<Vec<Event>> = if parallel {
        jobs.par_iter()
            .map(|job| job.run(oracle, window))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        jobs.iter()
            .map(|job| job.run(oracle, window))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut events: Vec<Event> = per_job.into_iter().flatten().collect();
    events.sort_by(|x, y| x.time().total_cmp(&y.time()));

    info!(
        start_jd = window.start.jd(),
        end_jd = window.end.jd(),
        frame = oracle.frame().name(),
        jobs = jobs.len(),
        events = events.len(),
        parallel,
        "event scan complete"
    );
    debug!(first = ?events.first().map(|e| e.time().jd()), "earliest event");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gochara_core::{Motion, ReferenceFrame, SyntheticSource};
    use gochara_time::TimeInstant;

    fn window(start: f64, end: f64) -> ScanWindow {
        ScanWindow::new(TimeInstant::from_jd(start), TimeInstant::from_jd(end)).unwrap()
    }

    fn source() -> SyntheticSource {
        SyntheticSource::new(TimeInstant::from_jd(0.0))
            .with(Body::Sun, Motion::Linear { lon0: 25.0, rate: 1.0 })
            .with(Body::Mars, Motion::Linear { lon0: 10.0, rate: -1.0 })
    }

    fn jobs() -> Vec<ScanJob> {
        vec![
            ScanJob::Transit {
                body: Body::Mars,
                scan: ScanConfig::slow_body(),
            },
            ScanJob::Transit {
                body: Body::Sun,
                scan: ScanConfig::slow_body(),
            },
            ScanJob::Aspects {
                a: Body::Sun,
                b: Body::Mars,
                config: AspectConfig::default(),
            },
        ]
    }

    #[test]
    fn merged_events_are_sorted() {
        let src = source();
        let oracle = PositionOracle::new(&src, ReferenceFrame::Tropical);
        let events = collect_events(&oracle, window(0.0, 60.0), &jobs(), false).unwrap();
        assert!(!events.is_empty());
        for pair in events.windows(2) {
            assert!(pair[0].time() <= pair[1].time());
        }
        // Sun enters Taurus at t=5, Mars enters Pisces just after t=10
        assert!(matches!(events[0], Event::SignIngress(e) if e.body == Body::Sun));
    }

    #[test]
    fn parallel_matches_sequential() {
        let src = source();
        let oracle = PositionOracle::new(&src, ReferenceFrame::Tropical);
        let seq = collect_events(&oracle, window(0.0, 200.0), &jobs(), false).unwrap();
        let par = collect_events(&oracle, window(0.0, 200.0), &jobs(), true).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn unsupported_body_rejected_before_scanning() {
        // No motion laws: any sample would fail with MissingBody.
        let src = SyntheticSource::new(TimeInstant::from_jd(0.0));
        let oracle = PositionOracle::new(&src, ReferenceFrame::Tropical);
        let jobs = vec![
            ScanJob::Transit {
                body: Body::Mars,
                scan: ScanConfig::slow_body(),
            },
            ScanJob::Station {
                body: Body::Moon,
                scan: ScanConfig::slow_body(),
            },
        ];
        let err = collect_events(&oracle, window(0.0, 10.0), &jobs, true).unwrap_err();
        assert_eq!(
            err,
            SearchError::UnsupportedBody {
                body: Body::Moon,
                detector: "retrograde station"
            }
        );
    }

    #[test]
    fn node_axis_job_rejected_before_scanning() {
        let src = SyntheticSource::new(TimeInstant::from_jd(0.0));
        let oracle = PositionOracle::new(&src, ReferenceFrame::Tropical);
        let jobs = vec![ScanJob::Aspects {
            a: Body::Rahu,
            b: Body::Ketu,
            config: AspectConfig::default(),
        }];
        let err = collect_events(&oracle, window(0.0, 10.0), &jobs, false).unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidConfig("aspect pair has a fixed separation")
        );
    }

    #[test]
    fn any_failed_job_fails_the_request() {
        let src = source();
        let oracle = PositionOracle::new(&src, ReferenceFrame::Tropical);
        let mut jobs = jobs();
        jobs.push(ScanJob::Transit {
            body: Body::Saturn,
            scan: ScanConfig::slow_body(),
        });
        let err = collect_events(&oracle, window(0.0, 10.0), &jobs, true).unwrap_err();
        assert!(matches!(err, SearchError::Oracle(_)));
    }
}
