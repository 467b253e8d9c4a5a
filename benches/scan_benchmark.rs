use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use freq_rs::job;
use freq_rs::scan;
use freq_rs::table::IdCounter;

fn generate_text(lines: usize, words_per_line: usize) -> Vec<u8> {
    const WORDS: [&[u8]; 6] = [b"alpha", b"beta", b"gamma", b"delta", b"epsilon", b"zeta"];
    let mut data = Vec::new();
    for i in 0..lines {
        for j in 0..words_per_line {
            if j > 0 {
                data.push(b' ');
            }
            data.extend_from_slice(WORDS[(i + j) % WORDS.len()]);
        }
        data.push(b'\n');
    }
    data
}

fn bench_scan_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_segment");
    for size_mb in [1, 10] {
        let lines = size_mb * 1024 * 1024 / 40; // ~40 bytes per line
        let data = generate_text(lines, 6);
        group.bench_with_input(
            BenchmarkId::new("sequential", format!("{}MB", size_mb)),
            &data,
            |b, data| {
                b.iter(|| {
                    scan::scan_segment(
                        black_box(data),
                        IdCounter::seeded(0, data.len()),
                        false,
                        false,
                    )
                })
            },
        );
    }
    group.finish();
}

fn bench_partitioned_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("partitioned_run");
    let data = generate_text(10 * 1024 * 1024 / 40, 6);
    for workers in [1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("workers", workers),
            &workers,
            |b, &workers| b.iter(|| job::run(black_box(&data), workers).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_scan_segment, bench_partitioned_run);
criterion_main!(benches);
