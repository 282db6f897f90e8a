//! Async convenience functions
//!
//! This module provides async entry points for common compression and
//! decompression operations. Decoding and encoding are CPU-bound, so they run
//! on tokio's blocking pool while I/O stays on the async reactor.

#[cfg(feature = "async")]
/// Async wrappers over the blocking API
pub mod functions {
    use crate::{CompressionLevel, CompressionStats, Result, Yaz0Error};
    use bytes::Bytes;
    use std::path::Path;
    use tokio::io::{AsyncRead, AsyncReadExt};

    /// Run a blocking job on tokio's blocking pool
    pub(crate) async fn run_blocking<T, F>(job: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(job)
            .await
            .map_err(|e| Yaz0Error::Io(std::io::Error::other(e)))?
    }

    /// Decompress a Yaz0 stream from an async reader
    pub async fn decompress_async<R: AsyncRead + Unpin>(mut reader: R) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        run_blocking(move || crate::decompress_bytes(&data)).await
    }

    /// Compress everything an async reader yields
    pub async fn compress_async<R: AsyncRead + Unpin>(
        mut reader: R,
        level: CompressionLevel,
    ) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        run_blocking(move || crate::compress_bytes(&data, level)).await
    }

    /// Decompress shared bytes
    pub async fn decompress_bytes_async(data: Bytes) -> Result<Bytes> {
        run_blocking(move || crate::decompress_bytes(&data).map(Bytes::from)).await
    }

    /// Compress shared bytes
    pub async fn compress_bytes_async(data: Bytes, level: CompressionLevel) -> Result<Bytes> {
        run_blocking(move || crate::compress_bytes(&data, level).map(Bytes::from)).await
    }

    /// Compress a file asynchronously
    pub async fn compress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
        level: CompressionLevel,
    ) -> Result<CompressionStats> {
        let data = tokio::fs::read(input_path).await?;
        let (compressed, stats) =
            run_blocking(move || crate::compress_with_stats(&data, level)).await?;
        tokio::fs::write(output_path, compressed).await?;
        Ok(stats)
    }

    /// Decompress a file asynchronously
    pub async fn decompress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
    ) -> Result<CompressionStats> {
        let data = tokio::fs::read(input_path).await?;
        let (decompressed, stats) =
            run_blocking(move || crate::decompress_with_stats(&data)).await?;
        tokio::fs::write(output_path, decompressed).await?;
        Ok(stats)
    }
}

#[cfg(feature = "async")]
pub use functions::*;
