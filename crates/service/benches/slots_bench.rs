use chrono::{NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use service::booking::slots::{available_slots, Schedule};

fn schedule(duration: u32) -> Schedule {
    Schedule {
        start: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
        duration_minutes: duration,
        working_days: (0..=6).collect(),
    }
}

fn benchmark_available_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("available_slots");
    let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

    group.bench_function("empty_day_15min", |b| {
        let s = schedule(15);
        b.iter(|| available_slots(black_box(&s), date, std::iter::empty::<&str>()))
    });

    group.bench_function("half_booked_15min", |b| {
        let s = schedule(15);
        let taken: Vec<String> = s.candidate_slots().into_iter().step_by(2).collect();
        b.iter(|| available_slots(black_box(&s), date, taken.iter().map(String::as_str)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_available_slots);
criterion_main!(benches);
