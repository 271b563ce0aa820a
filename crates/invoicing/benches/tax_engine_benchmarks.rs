use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use gstinvoice_invoicing::{LineItem, compute_totals, to_words};

fn items(n: usize) -> Vec<LineItem> {
    (0..n)
        .map(|i| LineItem::new(format!("Item {i}"), (i % 7 + 1) as f64, 99.5 + i as f64))
        .collect()
}

/// Recalculation runs on every keystroke; it should stay flat for realistic
/// invoice sizes.
fn bench_compute_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_totals");
    for n in [1usize, 10, 100, 1_000] {
        let lines = items(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("intra_state", n), &lines, |b, lines| {
            b.iter(|| compute_totals(black_box(lines), "Maharashtra", "Maharashtra"))
        });
        group.bench_with_input(BenchmarkId::new("inter_state", n), &lines, |b, lines| {
            b.iter(|| compute_totals(black_box(lines), "Maharashtra", "Karnataka"))
        });
    }
    group.finish();
}

fn bench_to_words(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_words");
    for amount in [7u64, 1_234_567, 987_654_321_012] {
        group.bench_with_input(BenchmarkId::from_parameter(amount), &amount, |b, &amount| {
            b.iter(|| to_words(black_box(amount)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_totals, bench_to_words);
criterion_main!(benches);
