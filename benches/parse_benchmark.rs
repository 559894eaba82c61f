use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use csv::StringRecord;
use ghcn_loader::models::ObservationRecord;
use ghcn_loader::readers::StationReader;

// Create test data for benchmarking
fn create_test_rows(rows: usize) -> Vec<StringRecord> {
    let stations = ["US1FLDA0001", "US1MTGL0001", "CA006105887", "USW00094728"];
    let types = ["TMAX", "TMIN", "PRCP"];

    (0..rows)
        .map(|i| {
            let station = stations[i % stations.len()].to_string();
            let date = format!("202301{:02}", (i % 28) + 1);
            let kind = types[i % types.len()].to_string();
            let value = format!("{:.1}", (i % 400) as f64 / 10.0 - 20.0);

            if i % 3 == 0 {
                StringRecord::from(vec![
                    station,
                    date,
                    kind,
                    value,
                    String::new(),
                    String::new(),
                    "H".to_string(),
                    "0700".to_string(),
                ])
            } else {
                StringRecord::from(vec![station, date, kind, value])
            }
        })
        .collect()
}

fn benchmark_row_classification(c: &mut Criterion) {
    let rows = create_test_rows(1_000);

    c.bench_function("observation_row_classification", |b| {
        b.iter(|| {
            let mut accepted = 0;
            for row in &rows {
                if let Ok(Some(_)) = ObservationRecord::from_record(row) {
                    accepted += 1;
                }
            }
            black_box(accepted)
        })
    });
}

fn benchmark_station_line_parsing(c: &mut Criterion) {
    let reader = StationReader::new();
    let lines = [
        "US1FLPB0002  26.5287  -80.0963    3.0 FL BOYNTON BEACH 3.2 SSW",
        "USW00094728  40.7789  -73.9692   39.6 NY NEW YORK CNTRL PK TWR",
        "US1MTGL0001  48.7372 -113.4392  963.8 MT WEST GLACIER 7.0 WSW",
        "CA006105887  45.4000  -75.7167   79.2 ON OTTAWA",
    ];

    c.bench_function("station_line_parsing", |b| {
        b.iter(|| {
            let mut parsed = 0;
            for line in &lines {
                if let Ok(Some(_)) = reader.parse_station_line(line) {
                    parsed += 1;
                }
            }
            black_box(parsed)
        })
    });
}

fn benchmark_varying_batch_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification_by_batch_size");

    for &size in &[100, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::new("rows", size), &size, |b, &rows| {
            let data = create_test_rows(rows);
            b.iter(|| {
                let mut accepted = 0;
                for row in &data {
                    if let Ok(Some(_)) = ObservationRecord::from_record(row) {
                        accepted += 1;
                    }
                }
                black_box(accepted)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_row_classification,
    benchmark_station_line_parsing,
    benchmark_varying_batch_sizes
);
criterion_main!(benches);
