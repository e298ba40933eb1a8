use chrono::{DateTime, Duration};
use criterion::{criterion_group, criterion_main, Criterion};
use glucostat::{GlucoseService, Reading, ReadingStore, Record, RecordType};

fn readings(days: i64) -> Vec<Reading> {
    let start = DateTime::parse_from_rfc3339("2024-05-01T00:00:00+02:00").unwrap();

    (0..days * 96)
        .map(|idx| {
            let value = if idx % 50 == 49 {
                None
            } else {
                Some(80 + (idx * 7919) % 150)
            };
            Reading::new(start + Duration::minutes(idx * 15), value)
        })
        .collect()
}

fn percentile(c: &mut Criterion) {
    let data = (0..1_000).map(|x| (x * 7919) % 400).collect::<Vec<i64>>();

    c.bench_function("percentile (1000)", |b| {
        b.iter(|| glucostat::percentile(&data, 95));
    });

    c.bench_function("sorted readings (1000)", |b| {
        b.iter(|| {
            let sorted = glucostat::SortedReadings::new(data.clone());
            (sorted.percentile(5), sorted.percentile(95), sorted.average())
        });
    });
}

fn summarize(c: &mut Criterion) {
    let two_weeks = readings(14);
    let ninety_days = readings(90);

    c.bench_function("collate (14 days)", |b| {
        b.iter(|| glucostat::collate(&two_weeks));
    });

    c.bench_function("summarize (14 days)", |b| {
        b.iter(|| glucostat::summarize_readings(&two_weeks));
    });

    c.bench_function("summarize (90 days)", |b| {
        b.iter(|| glucostat::summarize_readings(&ninety_days));
    });
}

fn service(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let store = ReadingStore::builder().open(&dir).unwrap();

    let records = readings(90)
        .into_iter()
        .map(|reading| Record {
            serial_number: "0M0000BENCH".into(),
            record_type: RecordType::HISTORIC,
            reading,
        })
        .collect::<Vec<_>>();
    store.insert_batch(&records).unwrap();

    let service = GlucoseService::new(store).zone("+02:00".parse().unwrap());

    c.bench_function("service summary (14 of 90 days)", |b| {
        b.iter(|| service.summary("2024-06-01", "2024-06-14").unwrap());
    });

    c.bench_function("service raw (14 of 90 days)", |b| {
        b.iter(|| service.raw("2024-06-01", "2024-06-14").unwrap());
    });
}

criterion_group!(benches, percentile, summarize, service);
criterion_main!(benches);
