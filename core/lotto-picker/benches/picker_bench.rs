use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lotto_picker::{select, Item, RngSource};

fn build_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| Item::new(format!("item_{}", i), format!("Item {}", i)).with_weight((i % 7 + 1) as u32))
        .collect()
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");

    for item_count in [10, 100, 1000, 10000].iter() {
        let items = build_items(*item_count);

        group.bench_with_input(BenchmarkId::new("uniform", item_count), &items, |b, items| {
            let mut rng = RngSource::seeded(1);
            b.iter(|| select(black_box(items), false, &mut rng).map(|item| item.weight))
        });

        group.bench_with_input(BenchmarkId::new("weighted", item_count), &items, |b, items| {
            let mut rng = RngSource::seeded(1);
            b.iter(|| select(black_box(items), true, &mut rng).map(|item| item.weight))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_select);
criterion_main!(benches);
