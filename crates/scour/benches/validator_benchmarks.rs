//! Validator performance benchmarks.
//!
//! Measures the full scan and the individual checks over synthetic messy data.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scour::{Dataset, Validator, Value};

const CATEGORIES: &[&str] = &["Electronics", "Clothing", "Books", "Home"];
const SHIPPED: &[&str] = &["True", "False", "yes", "no", "1", "0"];

/// Generate a sales-like dataset with gaps, bad emails, outliers and repeats.
fn generate_dataset(rows: usize) -> Dataset {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = Vec::with_capacity(rows);

    for row in 0..rows {
        if row > 0 && rng.gen_ratio(1, 50) {
            let copy: Vec<Value> = data[rng.gen_range(0..row)].clone();
            data.push(copy);
            continue;
        }
        let email = if rng.gen_ratio(1, 40) {
            Value::from("invalid_email")
        } else {
            Value::from(format!("user{}@example.com", row))
        };
        let amount = if rng.gen_ratio(1, 30) {
            Value::Null
        } else if rng.gen_ratio(1, 200) {
            Value::from(rng.gen_range(10_000.0..50_000.0))
        } else {
            Value::from(rng.gen_range(20.0..400.0))
        };
        let date = if rng.gen_ratio(1, 40) {
            Value::from("invalid_date")
        } else {
            Value::from(format!(
                "2024-{:02}-{:02}",
                rng.gen_range(1..=12),
                rng.gen_range(1..=28)
            ))
        };
        data.push(vec![
            Value::from(row as i64),
            email,
            Value::from(rng.gen_range(18..80i64)),
            amount,
            date,
            Value::from(CATEGORIES[rng.gen_range(0..CATEGORIES.len())]),
            Value::from(SHIPPED[rng.gen_range(0..SHIPPED.len())]),
        ]);
    }

    Dataset::from_rows(
        [
            "order id",
            "customer-email",
            "Age",
            "order_amount",
            "order date",
            "Product Category",
            "is_shipped",
        ],
        data,
    )
}

/// Benchmark the full validation pass at several sizes.
fn bench_validate_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_all");

    for rows in [100, 1_000, 10_000] {
        let dataset = generate_dataset(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &dataset, |b, ds| {
            b.iter(|| black_box(Validator::new(ds).validate_all()))
        });
    }

    group.finish();
}

/// Benchmark the checks one at a time on a single dataset.
fn bench_individual_checks(c: &mut Criterion) {
    let dataset = generate_dataset(10_000);
    let mut group = c.benchmark_group("checks");

    group.bench_function("duplicates", |b| {
        b.iter(|| {
            let mut v = Validator::new(&dataset);
            v.check_duplicates();
            black_box(v.issues().duplicates.len())
        })
    });
    group.bench_function("outliers", |b| {
        b.iter(|| {
            let mut v = Validator::new(&dataset);
            v.check_numeric_outliers(3.0);
            black_box(v.issues().outliers.len())
        })
    });
    group.bench_function("email_format", |b| {
        b.iter(|| {
            let mut v = Validator::new(&dataset);
            v.check_email_format();
            black_box(v.issues().format_errors.len())
        })
    });
    group.bench_function("date_format", |b| {
        b.iter(|| {
            let mut v = Validator::new(&dataset);
            v.check_date_format();
            black_box(v.issues().format_errors.len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_validate_all, bench_individual_checks);
criterion_main!(benches);
