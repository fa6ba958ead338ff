//! List workload benchmarks
//!
//! Compares the global-allocator strategy against the chunked pool on
//! list-shaped workloads.

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fastalloc::{LinkedList, PoolAllocator, PoolConfig};

/// Build a list of 1000 elements and tear it down.
fn bench_build_and_drop(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_drop");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("system_list", |b| {
        b.iter(|| {
            let mut list = LinkedList::new().unwrap();
            for n in 0..1000u64 {
                list.push_back(n).unwrap();
            }
            black_box(&list);
        });
    });

    group.bench_function("pooled_list", |b| {
        b.iter(|| {
            let mut list = LinkedList::new_in(PoolAllocator::new()).unwrap();
            for n in 0..1000u64 {
                list.push_back(n).unwrap();
            }
            black_box(&list);
        });
    });

    group.bench_function("pooled_list_big_chunks", |b| {
        let config = PoolConfig::default().with_chunk_capacity(16 * 1024);
        b.iter(|| {
            let mut list =
                LinkedList::new_in(PoolAllocator::with_config(config).unwrap()).unwrap();
            for n in 0..1000u64 {
                list.push_back(n).unwrap();
            }
            black_box(&list);
        });
    });

    group.finish();
}

/// Queue-style churn: push at the back, pop at the front.
///
/// Each batch starts from a fresh list because the pool hands back released
/// nodes only at teardown, so a long-lived pooled queue would keep growing.
fn bench_queue_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_churn");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("system_churn", |b| {
        b.iter_batched(
            || LinkedList::new().unwrap(),
            |mut list| {
                for n in 0..1000u64 {
                    list.push_back(n).unwrap();
                    black_box(list.pop_front());
                }
                list
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("pooled_churn", |b| {
        b.iter_batched(
            || LinkedList::new_in(PoolAllocator::new()).unwrap(),
            |mut list| {
                for n in 0..1000u64 {
                    list.push_back(n).unwrap();
                    black_box(list.pop_front());
                }
                list
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Walk a prebuilt list front to back.
fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("sum_forward", |b| {
        let mut list = LinkedList::new_in(PoolAllocator::new()).unwrap();
        for n in 0..1000u64 {
            list.push_back(n).unwrap();
        }
        b.iter(|| black_box(list.iter().sum::<u64>()));
    });

    group.bench_function("sum_reverse", |b| {
        let mut list = LinkedList::new_in(PoolAllocator::new()).unwrap();
        for n in 0..1000u64 {
            list.push_back(n).unwrap();
        }
        b.iter(|| black_box(list.iter().rev().sum::<u64>()));
    });

    group.finish();
}

/// Cursor editing in the middle of the list.
fn bench_cursor_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursor_edit");
    group.throughput(Throughput::Elements(1));

    group.bench_function("mid_insert_remove", |b| {
        let mut list = LinkedList::new().unwrap();
        for n in 0..1000u64 {
            list.push_back(n).unwrap();
        }
        b.iter(|| {
            let mut cursor = list.cursor_front_mut();
            for _ in 0..500 {
                cursor.move_next();
            }
            cursor.insert_after(9999).unwrap();
            cursor.move_next();
            black_box(cursor.remove_current());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_build_and_drop,
    bench_queue_churn,
    bench_iteration,
    bench_cursor_edit
);

criterion_main!(benches);
