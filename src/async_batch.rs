//! Async batch processing module
//!
//! This module decodes or encodes many files concurrently. Each file is an
//! independent job with its own input and output buffers; nothing is shared
//! between jobs beyond the concurrency limit.

#[cfg(feature = "async")]
/// Concurrent file processing with a configurable concurrency limit
pub mod processor {
    use crate::async_convenience::functions::run_blocking;
    use crate::{CompressionLevel, CompressionStats, Result, Yaz0Error};
    use futures::stream::{self, Stream, StreamExt, TryStreamExt};
    use std::path::{Path, PathBuf};

    /// Concurrent file processor
    #[derive(Debug, Clone)]
    pub struct AsyncBatchProcessor {
        concurrency_limit: usize,
    }

    impl AsyncBatchProcessor {
        /// Create a new batch processor with one job per CPU
        pub fn new() -> Self {
            Self {
                concurrency_limit: num_cpus::get(),
            }
        }

        /// Set the concurrency limit (at least one job)
        pub fn with_concurrency(mut self, limit: usize) -> Self {
            self.concurrency_limit = limit.max(1);
            self
        }

        /// Current concurrency limit
        pub fn concurrency_limit(&self) -> usize {
            self.concurrency_limit
        }

        /// Decompress files concurrently, failing on the first error
        ///
        /// Results arrive in completion order.
        pub async fn decompress_files<P: AsRef<Path> + Send + Sync>(
            &self,
            files: Vec<P>,
        ) -> Result<Vec<(PathBuf, Vec<u8>)>> {
            stream::iter(files.into_iter().map(|path| {
                let path = path.as_ref().to_path_buf();
                async move {
                    let output = decompress_single_file(&path).await?;
                    Ok::<_, Yaz0Error>((path, output))
                }
            }))
            .buffer_unordered(self.concurrency_limit)
            .try_collect()
            .await
        }

        /// Decompress files concurrently, keeping a result per file
        ///
        /// Use this when one bad entry must not hide the others.
        pub async fn decompress_files_lenient<P: AsRef<Path> + Send + Sync>(
            &self,
            files: Vec<P>,
        ) -> Vec<(PathBuf, Result<Vec<u8>>)> {
            self.decompress_files_streaming(files).collect().await
        }

        /// Stream per-file decode results as they complete
        pub fn decompress_files_streaming<P: AsRef<Path> + Send + Sync>(
            &self,
            files: Vec<P>,
        ) -> impl Stream<Item = (PathBuf, Result<Vec<u8>>)> {
            stream::iter(files.into_iter().map(|path| {
                let path = path.as_ref().to_path_buf();
                async move {
                    let result = decompress_single_file(&path).await;
                    if let Err(e) = &result {
                        log::warn!("{}: could not be decoded: {e}", path.display());
                    }
                    (path, result)
                }
            }))
            .buffer_unordered(self.concurrency_limit)
        }

        /// Compress files concurrently
        pub async fn compress_files<P: AsRef<Path> + Send + Sync>(
            &self,
            files: Vec<P>,
            level: CompressionLevel,
        ) -> Result<Vec<(PathBuf, Vec<u8>, CompressionStats)>> {
            stream::iter(files.into_iter().map(|path| {
                let path = path.as_ref().to_path_buf();
                async move {
                    let data = tokio::fs::read(&path).await?;
                    let (compressed, stats) =
                        run_blocking(move || crate::compress_with_stats(&data, level)).await?;
                    Ok::<_, Yaz0Error>((path, compressed, stats))
                }
            }))
            .buffer_unordered(self.concurrency_limit)
            .try_collect()
            .await
        }
    }

    impl Default for AsyncBatchProcessor {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Decompress a single file
    async fn decompress_single_file(path: &Path) -> Result<Vec<u8>> {
        let data = tokio::fs::read(path).await?;
        log::debug!("decoding {} ({} bytes)", path.display(), data.len());
        run_blocking(move || crate::decompress_bytes(&data)).await
    }
}

#[cfg(feature = "async")]
pub use processor::AsyncBatchProcessor;
