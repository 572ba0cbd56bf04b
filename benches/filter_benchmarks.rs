use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tablefilter::*;

fn make_records(size: i64) -> Vec<Record> {
    (0..size)
        .map(|i| {
            record([
                ("key", FieldValue::Int(i)),
                ("name", FieldValue::String(format!("Name {}", i))),
                ("age", FieldValue::Int(18 + (i * 13) % 60)),
                ("gender", FieldValue::from(if i % 2 == 0 { "Female" } else { "Male" })),
            ])
        })
        .collect()
}

fn bench_search_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_filter");

    for size in [100, 1000, 10000].iter() {
        let records = make_records(*size);
        let filters = FilterMapping::new()
            .with_column(ColumnFilterState::empty("name").set_search_query("name 1"));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| apply_filters(black_box(&records), black_box(&filters)));
        });
    }
    group.finish();
}

fn bench_numeric_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("numeric_sort");

    for size in [100, 1000, 10000].iter() {
        let records = make_records(*size);
        let filters = FilterMapping::new()
            .with_column(ColumnFilterState::empty("age").set_sort(SortDirection::Descending));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| apply_filters(black_box(&records), black_box(&filters)));
        });
    }
    group.finish();
}

fn bench_selection_then_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection_then_sort");

    for size in [100, 1000, 10000].iter() {
        let records = make_records(*size);
        let filters = FilterMapping::new()
            .with_column(ColumnFilterState::empty("gender").set_selection(vec![FieldValue::from("Male")]))
            .with_column(ColumnFilterState::empty("name").set_sort(SortDirection::Ascending));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| apply_filters(black_box(&records), black_box(&filters)));
        });
    }
    group.finish();
}

fn bench_selection_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection_candidates");

    for size in [100, 1000, 10000].iter() {
        let records = make_records(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| selection_candidates(black_box(&records), "age", black_box("")));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_search_filter,
    bench_numeric_sort,
    bench_selection_then_sort,
    bench_selection_candidates,
);

criterion_main!(benches);
