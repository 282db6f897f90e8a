use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::io::Write;
use std::time::Duration;
use yaz0::{compress_bytes, CompressionLevel, Yaz0Writer};

const LEVELS: [(CompressionLevel, &str); 3] = [
    (CompressionLevel::Fast, "fast"),
    (CompressionLevel::Default, "default"),
    (CompressionLevel::Best, "best"),
];

fn generate_test_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. "
            .iter()
            .cycle()
            .take(size)
            .copied()
            .collect(),
        "binary" => (0..size).map(|i| ((i * 17 + 11) % 256) as u8).collect(),
        "repetitive" => b"ABCDEFGHIJ".iter().cycle().take(size).copied().collect(),
        "random" => (0..size)
            .map(|i| {
                let x = i as u32;
                (x.wrapping_mul(1664525).wrapping_add(1013904223) >> 24) as u8
            })
            .collect(),
        _ => panic!("Unknown pattern: {}", pattern),
    }
}

fn compression_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_throughput");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    for size in [1024, 10240, 102400, 1048576].iter() {
        let size_label = match *size {
            1024 => "1KB",
            10240 => "10KB",
            102400 => "100KB",
            1048576 => "1MB",
            _ => "unknown",
        };

        for pattern in ["text", "binary", "repetitive", "random"].iter() {
            let data = generate_test_data(*size, pattern);

            for (level, level_str) in LEVELS {
                let benchmark_id = BenchmarkId::from_parameter(format!(
                    "{}/{}/{}",
                    size_label, pattern, level_str
                ));

                group.throughput(Throughput::Bytes(*size as u64));
                group.bench_with_input(benchmark_id, &data, |b, data| {
                    b.iter(|| {
                        compress_bytes(black_box(data), black_box(level))
                            .expect("Compression failed")
                    });
                });
            }
        }
    }

    group.finish();
}

fn compression_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_ratio");
    group.measurement_time(Duration::from_secs(5));

    for size in [10240, 102400] {
        for pattern in ["text", "binary", "repetitive", "random"].iter() {
            let data = generate_test_data(size, pattern);

            for (level, level_str) in LEVELS {
                let compressed = compress_bytes(&data, level).expect("Compression failed");
                let ratio = compressed.len() as f64 / data.len() as f64;

                let benchmark_id = BenchmarkId::from_parameter(format!(
                    "{}KB/{}/{} (ratio: {:.3})",
                    size / 1024,
                    pattern,
                    level_str,
                    ratio
                ));

                group.throughput(Throughput::Bytes(size as u64));
                group.bench_with_input(benchmark_id, &data, |b, data| {
                    b.iter(|| compress_bytes(black_box(data), level).expect("Compression failed"));
                });
            }
        }
    }

    group.finish();
}

fn writer_chunked_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("writer_chunked_input");
    group.measurement_time(Duration::from_secs(5));

    let data = generate_test_data(262144, "text");

    for chunk_size in [64, 4096, 65536] {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("chunk_{}", chunk_size)),
            &data,
            |b, data| {
                b.iter_batched(
                    || Yaz0Writer::new(Vec::with_capacity(data.len()), CompressionLevel::Default),
                    |mut writer| {
                        for chunk in data.chunks(chunk_size) {
                            writer.write_all(chunk).expect("Write failed");
                        }
                        writer.finish().expect("Compression failed")
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    compression_throughput,
    compression_ratio,
    writer_chunked_input
);
criterion_main!(benches);
