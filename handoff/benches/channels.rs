//! Benchmarks for the blocking channels.
//!
//! Compares the monitor-based ring against crossbeam-channel's bounded
//! channel, plus slot hand-off latency on its own.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use handoff::{ReadStatus, Ring, Slot};
use std::sync::Arc;
use std::thread;

// ============================================================================
// Single-threaded hand-off latency
// ============================================================================

fn bench_single_thread_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_thread_latency");

    group.bench_function("handoff_slot/u64", |b| {
        let slot = Slot::<u64>::new();
        b.iter(|| {
            slot.write(black_box(42)).unwrap();
            black_box(slot.read())
        });
    });

    group.bench_function("handoff_ring/u64", |b| {
        let ring = Ring::<u64>::with_capacity(1024).unwrap();
        b.iter(|| {
            ring.write(black_box(42)).unwrap();
            black_box(ring.read())
        });
    });

    group.bench_function("crossbeam_bounded/u64", |b| {
        let (tx, rx) = crossbeam_channel::bounded::<u64>(1024);
        b.iter(|| {
            tx.send(black_box(42)).unwrap();
            black_box(rx.recv().unwrap())
        });
    });

    group.finish();
}

// ============================================================================
// Burst throughput (fill then drain)
// ============================================================================

fn bench_burst_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("burst_throughput");

    for batch in [100usize, 1000] {
        group.throughput(Throughput::Elements(batch as u64));

        group.bench_with_input(BenchmarkId::new("handoff_ring", batch), &batch, |b, &n| {
            let ring = Ring::<u64>::with_capacity(n).unwrap();
            b.iter(|| {
                for i in 0..n {
                    ring.write(black_box(i as u64)).unwrap();
                }
                for _ in 0..n {
                    black_box(ring.read());
                }
            });
        });

        group.bench_with_input(
            BenchmarkId::new("crossbeam_bounded", batch),
            &batch,
            |b, &n| {
                let (tx, rx) = crossbeam_channel::bounded::<u64>(n);
                b.iter(|| {
                    for i in 0..n {
                        tx.send(black_box(i as u64)).unwrap();
                    }
                    for _ in 0..n {
                        black_box(rx.recv().unwrap());
                    }
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Cross-thread throughput
// ============================================================================

fn bench_cross_thread_throughput(c: &mut Criterion) {
    const MESSAGES: usize = 100_000;

    let mut group = c.benchmark_group("cross_thread_throughput");
    group.throughput(Throughput::Elements(MESSAGES as u64));
    group.sample_size(10);

    group.bench_function("handoff_ring", |b| {
        b.iter(|| {
            let ring = Arc::new(Ring::<u64>::with_capacity(1024).unwrap());
            let producer = Arc::clone(&ring);

            let handle = thread::spawn(move || {
                for i in 0..MESSAGES {
                    producer.write(i as u64).unwrap();
                }
                producer.close();
            });

            let mut sum = 0u64;
            while let ReadStatus::Success(v) = ring.read() {
                sum = sum.wrapping_add(v);
            }
            handle.join().unwrap();
            black_box(sum)
        });
    });

    group.bench_function("crossbeam_bounded", |b| {
        b.iter(|| {
            let (tx, rx) = crossbeam_channel::bounded::<u64>(1024);

            let handle = thread::spawn(move || {
                for i in 0..MESSAGES {
                    tx.send(i as u64).unwrap();
                }
            });

            let mut sum = 0u64;
            while let Ok(v) = rx.recv() {
                sum = sum.wrapping_add(v);
            }
            handle.join().unwrap();
            black_box(sum)
        });
    });

    group.finish();
}

// ============================================================================
// Cross-thread ping-pong (slot alternation)
// ============================================================================

fn bench_slot_pingpong(c: &mut Criterion) {
    const ROUNDS: usize = 10_000;

    let mut group = c.benchmark_group("slot_pingpong");
    group.throughput(Throughput::Elements(ROUNDS as u64));
    group.sample_size(10);

    group.bench_function("handoff_slot", |b| {
        b.iter(|| {
            let request = Arc::new(Slot::<u64>::new());
            let reply = Arc::new(Slot::<u64>::new());
            let (req, rep) = (Arc::clone(&request), Arc::clone(&reply));

            let handle = thread::spawn(move || {
                for _ in 0..ROUNDS {
                    if let ReadStatus::Success(v) = req.read() {
                        rep.write(v).unwrap();
                    }
                }
            });

            for i in 0..ROUNDS {
                request.write(i as u64).unwrap();
                black_box(reply.read());
            }
            handle.join().unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_thread_latency,
    bench_burst_throughput,
    bench_cross_thread_throughput,
    bench_slot_pingpong,
);

criterion_main!(benches);
