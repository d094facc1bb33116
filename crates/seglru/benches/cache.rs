use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use seglru::SegmentedCache;

fn bench_protected_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("protected_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hot_key", |b| {
        let mut cache = SegmentedCache::new(1000, 1000).unwrap();

        // Warm: insert then read once so every key sits in protected
        for key in 0..100u64 {
            cache.set(key, vec![b'x'; 1024]);
            cache.get(&key);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_with_eviction", |b| {
        let mut cache = SegmentedCache::new(100, 100).unwrap();
        let data = vec![b'x'; 1024];

        let mut counter = 0u64;
        b.iter(|| {
            // Monotonic keys keep probationary at capacity, so every
            // insert pays for one eviction
            cache.set(black_box(counter), data.clone());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_scan_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("hot_reads_under_scan", |b| {
        let mut cache = SegmentedCache::new(100, 100).unwrap();
        let data = vec![b'x'; 1024];

        // Hot working set in protected
        for key in 0..100u64 {
            cache.set(key, data.clone());
            cache.get(&key);
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter % 2 == 0 {
                black_box(cache.get(&(counter / 2 % 100)));
            } else {
                // Scan traffic: one-shot keys churning probationary
                cache.set(1_000_000 + counter, data.clone());
            }
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_protected_get,
    bench_insert,
    bench_scan_mixed
);
criterion_main!(benches);
