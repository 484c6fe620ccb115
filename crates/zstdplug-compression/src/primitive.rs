//! Zstandard codec primitive
//!
//! Single-shot block compression through the `zstd` bulk API. Each call produces or
//! consumes one complete zstd frame.

use zstd::zstd_safe;
use zstdplug_types::{CodecPrimitive, Error, Result};

/// Zstandard implementation of [`CodecPrimitive`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ZstdPrimitive;

impl ZstdPrimitive {
    /// Create a new zstd primitive
    pub fn new() -> Self {
        Self
    }
}

impl CodecPrimitive for ZstdPrimitive {
    fn compress(&self, dst: &mut [u8], src: &[u8], level: i32) -> Result<usize> {
        zstd::bulk::compress_to_buffer(src, dst, level)
            .map_err(|e| Error::compression(format!("Zstd compression failed: {}", e)))
    }

    fn decompress(&self, dst: &mut [u8], src: &[u8]) -> Result<usize> {
        zstd::bulk::decompress_to_buffer(src, dst)
            .map_err(|e| Error::compression(format!("Zstd decompression failed: {}", e)))
    }

    fn compress_bound(&self, src_len: usize) -> usize {
        zstd_safe::compress_bound(src_len)
    }

    fn min_level(&self) -> i32 {
        zstd_safe::min_c_level()
    }

    fn max_level(&self) -> i32 {
        zstd_safe::max_c_level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_range() {
        let primitive = ZstdPrimitive::new();
        assert!(primitive.min_level() < 1);
        assert_eq!(primitive.max_level(), 22);
        assert!(primitive.level_range().contains(&10));
    }

    #[test]
    fn test_roundtrip() {
        let primitive = ZstdPrimitive::new();
        let data = b"Hello, world! This is a test string for compression.".repeat(10);

        let mut compressed = vec![0u8; primitive.compress_bound(data.len())];
        let compressed_size = primitive.compress(&mut compressed, &data, 3).unwrap();
        assert!(compressed_size < data.len());

        let mut decompressed = vec![0u8; data.len()];
        let decompressed_size = primitive
            .decompress(&mut decompressed, &compressed[..compressed_size])
            .unwrap();
        assert_eq!(&decompressed[..decompressed_size], data.as_slice());
    }

    #[test]
    fn test_compress_into_undersized_buffer_fails() {
        let primitive = ZstdPrimitive::new();
        let data: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8).collect();

        let mut compressed = vec![0u8; 8];
        assert!(primitive.compress(&mut compressed, &data, 3).is_err());
    }
}
