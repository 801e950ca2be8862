use std::f64::consts::PI;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gochara_core::{
    ALL_BODIES, Body, Motion, PositionOracle, ReferenceFrame, SyntheticSource, TableSource,
};
use gochara_search::{CalendarConfig, ScanConfig, calendar_month, sign_ingresses};
use gochara_time::{ScanWindow, TimeInstant};

fn looping(lon0: f64, rate: f64, amplitude: f64, period_days: f64) -> Motion {
    Motion::Looping {
        lon0,
        rate,
        amplitude,
        omega: 2.0 * PI / period_days,
    }
}

fn sky() -> SyntheticSource {
    SyntheticSource::new(TimeInstant::from_jd(2_460_310.5))
        .with(Body::Sun, Motion::Linear { lon0: 280.0, rate: 0.9856 })
        .with(Body::Moon, Motion::Linear { lon0: 10.0, rate: 13.176 })
        .with(Body::Mars, looping(300.0, 0.52, 0.9, 780.0))
        .with(Body::Mercury, looping(290.0, 0.9856, 2.2, 116.0))
        .with(Body::Jupiter, looping(30.0, 0.083, 0.2, 399.0))
        .with(Body::Venus, looping(250.0, 1.2, 1.5, 584.0))
        .with(Body::Saturn, looping(330.0, 0.034, 0.1, 378.0))
        .with(Body::Rahu, Motion::Linear { lon0: 15.0, rate: -0.053 })
        .with(Body::Uranus, looping(50.0, 0.0117, 0.04, 370.0))
        .with(Body::Neptune, looping(355.0, 0.006, 0.03, 367.0))
        .with(Body::Pluto, looping(300.0, 0.004, 0.03, 367.0))
}

fn calendar_bench(c: &mut Criterion) {
    let truth = sky();
    let year = ScanWindow::year(2024).expect("valid year");
    let table = TableSource::tabulate(
        &truth,
        &ALL_BODIES,
        year.start.plus_days(-2.0),
        year.end.plus_days(2.0),
        1.0,
    )
    .expect("tabulation should succeed");
    let oracle = PositionOracle::new(&table, ReferenceFrame::default());

    let mut group = c.benchmark_group("calendar_month");
    group.sample_size(20);
    for (label, config) in [
        ("parallel", CalendarConfig::default()),
        ("sequential", CalendarConfig::default().sequential()),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| {
                calendar_month(black_box(&oracle), 2024, 3, black_box(&config))
                    .expect("calendar should succeed")
            })
        });
    }
    group.finish();
}

fn transit_bench(c: &mut Criterion) {
    let truth = sky();
    let oracle = PositionOracle::new(&truth, ReferenceFrame::Tropical);
    let year = ScanWindow::year(2024).expect("valid year");

    let mut group = c.benchmark_group("sign_ingresses");
    group.bench_function("moon_year", |b| {
        b.iter(|| {
            sign_ingresses(
                black_box(&oracle),
                Body::Moon,
                year,
                &ScanConfig::fast_body(),
            )
            .expect("scan should succeed")
        })
    });
    group.finish();
}

criterion_group!(benches, calendar_bench, transit_bench);
criterion_main!(benches);
