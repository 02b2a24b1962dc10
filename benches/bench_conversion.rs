use std::hint::black_box;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use criterion::{Criterion, criterion_group, criterion_main};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use scaledec::{Decimal6f, Decimal18f, RoundingMode};

// ============================================================================
// Strings
// ============================================================================

fn bench_parsing(c: &mut Criterion) {
    c.bench_function("decimal6f_parsing", |b| {
        b.iter(|| black_box(Decimal6f::from_str(black_box("123.456789")).unwrap()));
    });
}

fn bench_parsing_with_rounding(c: &mut Criterion) {
    c.bench_function("decimal6f_parsing_surplus_digits", |b| {
        b.iter(|| {
            black_box(Decimal6f::from_str_with(
                black_box("123.4567891234"),
                RoundingMode::HalfEven,
            ))
        });
    });
}

fn bench_formatting(c: &mut Criterion) {
    c.bench_function("decimal6f_formatting", |b| {
        let d = Decimal6f::from_str("123.456789").unwrap();
        b.iter(|| black_box(format!("{}", d)));
    });
}

// ============================================================================
// Floats
// ============================================================================

fn bench_from_f64(c: &mut Criterion) {
    c.bench_function("decimal6f_from_f64", |b| {
        b.iter(|| black_box(Decimal6f::from_f64(black_box(123.456789))));
    });
}

fn bench_to_f64(c: &mut Criterion) {
    c.bench_function("decimal6f_to_f64", |b| {
        let d = Decimal6f::from_str("123.456789").unwrap();
        b.iter(|| black_box(black_box(d).to_f64()));
    });
}

fn bench_to_f64_scale_18(c: &mut Criterion) {
    c.bench_function("decimal18f_to_f64", |b| {
        let d = Decimal18f::from_str("1.234567890123456789").unwrap();
        b.iter(|| black_box(black_box(d).to_f64()));
    });
}

// ============================================================================
// Arbitrary Precision
// ============================================================================

fn bench_to_big_decimal(c: &mut Criterion) {
    c.bench_function("decimal6f_to_big_decimal", |b| {
        let d = Decimal6f::from_str("123.456789").unwrap();
        b.iter(|| black_box(black_box(d).to_big_decimal()));
    });
}

fn bench_from_big_decimal(c: &mut Criterion) {
    c.bench_function("decimal6f_from_big_decimal", |b| {
        let big = BigDecimal::from_str("123.45678912345").unwrap();
        b.iter(|| black_box(Decimal6f::from_big_decimal(black_box(&big), RoundingMode::HalfUp)));
    });
}

fn bench_rescale(c: &mut Criterion) {
    c.bench_function("decimal6f_rescale_to_2", |b| {
        let d = Decimal6f::from_str("123.456789").unwrap();
        b.iter(|| black_box(black_box(d).rescale::<2>(RoundingMode::HalfEven)));
    });
}

// ============================================================================
// rust_decimal Baseline
// ============================================================================

fn bench_rust_decimal_parsing(c: &mut Criterion) {
    c.bench_function("rust_decimal_parsing", |b| {
        b.iter(|| black_box(Decimal::from_str(black_box("123.456789")).unwrap()));
    });
}

fn bench_rust_decimal_from_f64(c: &mut Criterion) {
    c.bench_function("rust_decimal_from_f64", |b| {
        b.iter(|| black_box(Decimal::from_f64(black_box(123.456789))));
    });
}

fn bench_rust_decimal_to_f64(c: &mut Criterion) {
    c.bench_function("rust_decimal_to_f64", |b| {
        let d = Decimal::from_str("123.456789").unwrap();
        b.iter(|| black_box(black_box(d).to_f64()));
    });
}

criterion_group!(strings, bench_parsing, bench_parsing_with_rounding, bench_formatting);

criterion_group!(floats, bench_from_f64, bench_to_f64, bench_to_f64_scale_18);

criterion_group!(
    arbitrary_precision,
    bench_to_big_decimal,
    bench_from_big_decimal,
    bench_rescale,
);

criterion_group!(
    baseline,
    bench_rust_decimal_parsing,
    bench_rust_decimal_from_f64,
    bench_rust_decimal_to_f64,
);

criterion_main!(strings, floats, arbitrary_precision, baseline);
