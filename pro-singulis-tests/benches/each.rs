use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pprof::criterion::{Output, PProfProfiler};
use serde_json::Value;

fn keep_even(n: &u64) -> Option<u64> {
    (n % 2 == 0).then_some(n / 2)
}

fn bench_each(criterion: &mut Criterion) {
    let sizes = [1024, 1024 * 1024];

    let mut group = criterion.benchmark_group("keep_even");

    for size in sizes {
        let input: Vec<u64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("filter_map", size), &input, |b, input| {
            b.iter(|| input.iter().filter_map(keep_even).collect::<Vec<_>>())
        });

        group.bench_with_input(BenchmarkId::new("each", size), &input, |b, input| {
            b.iter(|| pro_singulis::each(input, |n, _| keep_even(n)))
        });

        let json = Value::from(input.clone());
        group.bench_with_input(BenchmarkId::new("each_json", size), &json, |b, json| {
            b.iter(|| {
                pro_singulis_json::each(
                    json,
                    |_, args| args[0].as_u64().as_ref().and_then(keep_even).map(Value::from),
                    &Value::Null,
                    None,
                )
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_profiler(
            PProfProfiler::new(100, Output::Flamegraph(None))
        );
    targets = bench_each
}
criterion_main!(benches);
