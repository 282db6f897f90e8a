//! Async performance benchmarks for yaz0
//!
//! Compares the blocking API against the async entry points and the batch
//! processor on multi-file workloads.

#![cfg(feature = "async")]

use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use futures::future::try_join_all;
use std::hint::black_box;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use yaz0::{
    compress_bytes, compress_bytes_async, decompress_bytes, decompress_bytes_async,
    AsyncBatchProcessor, CompressionLevel,
};

fn generate_test_data(size: usize) -> Vec<u8> {
    b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. "
        .iter()
        .cycle()
        .take(size)
        .copied()
        .collect()
}

/// Blocking calls versus the async byte API for single buffers
fn async_bytes_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("async_bytes");
    group.measurement_time(Duration::from_secs(10));

    for (size, size_label) in [(1048576, "1MB"), (10485760, "10MB")] {
        let data = generate_test_data(size);
        let compressed = Bytes::from(
            compress_bytes(&data, CompressionLevel::Default).expect("Compression failed"),
        );

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_sync", size_label)),
            &compressed,
            |b, compressed| {
                b.iter(|| decompress_bytes(black_box(compressed)).expect("Decompression failed"));
            },
        );

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_async", size_label)),
            &compressed,
            |b, compressed| {
                b.iter(|| {
                    rt.block_on(decompress_bytes_async(black_box(compressed.clone())))
                        .expect("Decompression failed")
                });
            },
        );
    }

    group.finish();
}

/// Sequential compression versus concurrent async compression of many buffers
fn async_concurrent_compression_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("async_concurrent_compression");
    group.measurement_time(Duration::from_secs(15));

    for (file_count, file_size) in [(50, 10240), (20, 51200)] {
        let files: Vec<Bytes> = (0..file_count)
            .map(|_| Bytes::from(generate_test_data(file_size)))
            .collect();
        let total_size = file_count * file_size;

        group.throughput(Throughput::Bytes(total_size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!(
                "{}files_{}KB_sequential",
                file_count,
                file_size / 1024
            )),
            &files,
            |b, files| {
                b.iter(|| {
                    files
                        .iter()
                        .map(|file| {
                            compress_bytes(black_box(file), CompressionLevel::Default)
                                .expect("Compression failed")
                        })
                        .collect::<Vec<_>>()
                });
            },
        );

        group.throughput(Throughput::Bytes(total_size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!(
                "{}files_{}KB_concurrent",
                file_count,
                file_size / 1024
            )),
            &files,
            |b, files| {
                b.iter(|| {
                    rt.block_on(try_join_all(files.iter().map(|file| {
                        compress_bytes_async(file.clone(), CompressionLevel::Default)
                    })))
                    .expect("Compression failed")
                });
            },
        );
    }

    group.finish();
}

/// Batch decompression of files on disk at different concurrency limits
fn async_batch_processing_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("async_batch_processing");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(20);

    let dir = TempDir::new().unwrap();
    let file_count = 24;
    let file_size = yaz0::archive::AVATAR_IMAGE_SIZE;
    let data = generate_test_data(file_size);
    let compressed = compress_bytes(&data, CompressionLevel::Default).expect("Compression failed");

    let paths: Vec<PathBuf> = (0..file_count)
        .map(|i| {
            let path = dir.path().join(format!("chara_{i:02}.szs"));
            std::fs::write(&path, &compressed).unwrap();
            path
        })
        .collect();

    for concurrency in [1, 2, 4, 8] {
        let processor = AsyncBatchProcessor::new().with_concurrency(concurrency);

        group.throughput(Throughput::Bytes((file_count * file_size) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}files_concurrency_{}", file_count, concurrency)),
            &paths,
            |b, paths| {
                b.iter(|| {
                    rt.block_on(processor.decompress_files(paths.clone()))
                        .expect("Batch decompression failed")
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    async_benches,
    async_bytes_benchmark,
    async_concurrent_compression_benchmark,
    async_batch_processing_benchmark
);
criterion_main!(async_benches);
