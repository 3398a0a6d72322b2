use bufint::radix::decimal_text_to_hex_text;
use bufint::{divide, Bbi};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const CAP: usize = 64;

/// A decimal operand with `digits` digits.
fn operand(digits: usize) -> Bbi<[u8; CAP]> {
    let text: String = (0..digits).map(|i| (b'1' + (i % 9) as u8) as char).collect();
    let mut b = Bbi::new([0u8; CAP]);
    b.load_from_decimal(&text).unwrap();
    b
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    for digits in [10, 40, 70] {
        let (a, b) = (operand(digits), operand(digits));
        group.bench_with_input(BenchmarkId::from_parameter(digits), &digits, |bench, _| {
            let mut sum = Bbi::new([0u8; CAP]);
            bench.iter(|| sum.add(black_box(&a), black_box(&b)).unwrap());
        });
    }
    group.finish();
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    for digits in [10, 40, 70] {
        let (a, b) = (operand(digits), operand(digits));
        group.bench_with_input(BenchmarkId::from_parameter(digits), &digits, |bench, _| {
            let mut product = Bbi::new([0u8; CAP]);
            bench.iter(|| product.multiply(black_box(&a), black_box(&b)).unwrap());
        });
    }
    group.finish();
}

fn bench_divide(c: &mut Criterion) {
    let mut group = c.benchmark_group("divide");
    for digits in [20, 80, 140] {
        let (n, d) = (operand(digits), operand(digits / 2));
        group.bench_with_input(BenchmarkId::from_parameter(digits), &digits, |bench, _| {
            let mut q = Bbi::new([0u8; CAP]);
            let mut r = Bbi::new([0u8; CAP]);
            bench.iter(|| divide(&mut q, &mut r, black_box(&n), black_box(&d)).unwrap());
        });
    }
    group.finish();
}

fn bench_radix(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimal_to_hex");
    for digits in [10, 40, 140] {
        let text: String = (0..digits).map(|i| (b'1' + (i % 9) as u8) as char).collect();
        group.bench_with_input(BenchmarkId::from_parameter(digits), &text, |bench, text| {
            let mut out = [0u8; 2 * CAP + 4];
            bench.iter(|| decimal_text_to_hex_text(black_box(text), &mut out).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add, bench_multiply, bench_divide, bench_radix);
criterion_main!(benches);
