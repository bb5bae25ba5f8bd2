use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use nh3_drydep::deposition::{ModelConfig, WetCanopyMode};
use nh3_drydep::models::{ConcentrationRecord, MeteoRecord, MeteoSeries, StationSeries};
use nh3_drydep::processors::DepositionProcessor;

// Create synthetic hourly data for benchmarking
fn create_test_data(days: usize, station_count: usize) -> (MeteoSeries, Vec<StationSeries>) {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let hours = days * 24;

    let meteo = MeteoSeries::new(
        (0..hours)
            .map(|h| {
                let hour = (h % 24) as f64;
                MeteoRecord::new(
                    start + Duration::hours(h as i64),
                    (400.0 * (std::f64::consts::PI * (hour - 6.0) / 12.0).sin()).max(0.0),
                    10.0 + 8.0 * (std::f64::consts::PI * (hour - 9.0) / 12.0).sin(),
                    70.0,
                    1.5 + (h % 7) as f64 * 0.3,
                    if h % 37 == 0 { 0.8 } else { 0.0 },
                    [0.2, 0.22, 0.25, 0.3],
                )
            })
            .collect(),
    );

    let stations = (0..station_count)
        .map(|s| {
            StationSeries::new(
                format!("station_{}", s),
                (0..hours)
                    .map(|h| {
                        ConcentrationRecord::new(
                            start + Duration::hours(h as i64),
                            5.0 + s as f64 + (h % 11) as f64 * 0.4,
                        )
                    })
                    .collect(),
            )
        })
        .collect();

    (meteo, stations)
}

fn benchmark_resistance(c: &mut Criterion) {
    let mut group = c.benchmark_group("resistance_series");

    for days in [30, 365] {
        let (meteo, _) = create_test_data(days, 0);
        let config = ModelConfig {
            enable_f2: true,
            enable_f3: true,
            enable_f4: true,
            wet_canopy_mode: WetCanopyMode::RowWindow,
            ..Default::default()
        };
        let processor = DepositionProcessor::new(config);

        group.bench_with_input(BenchmarkId::from_parameter(days), &meteo, |b, meteo| {
            b.iter(|| processor.compute_resistance(black_box(meteo)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    for station_count in [1, 3] {
        let (meteo, stations) = create_test_data(365, station_count);
        let processor = DepositionProcessor::new(ModelConfig::default()).with_max_workers(2);

        group.bench_with_input(
            BenchmarkId::from_parameter(station_count),
            &(meteo, stations),
            |b, (meteo, stations)| {
                b.iter(|| {
                    processor
                        .process(black_box(meteo), black_box(stations), None)
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_resistance, benchmark_full_pipeline);
criterion_main!(benches);
