//! Zstandard compression format
//!
//! [`ZstdCompressionFormat`] is the capability a host finds in the feature registry. It
//! is built once per module activation with a fixed level and never mutated afterwards.

use crate::primitive::ZstdPrimitive;
use tracing::{debug, warn};
use zstdplug_types::{
    CodecPrimitive, CompressionFormat, CompressionLevel, Error, Result, ZSTD_FORMAT_NAME,
    ZSTD_FORMAT_VERSION,
};

/// Block compression format backed by a zstd codec primitive
#[derive(Debug, Clone)]
pub struct ZstdCompressionFormat<P = ZstdPrimitive> {
    primitive: P,
    level: CompressionLevel,
}

impl ZstdCompressionFormat<ZstdPrimitive> {
    /// Create a format using the zstd library at `level`, clamped to the supported range
    pub fn new(level: i32) -> Self {
        Self::with_primitive(ZstdPrimitive::new(), level)
    }
}

impl<P: CodecPrimitive> ZstdCompressionFormat<P> {
    /// Create a format over an arbitrary primitive
    ///
    /// `level` is clamped into the primitive's level range, so an out-of-range level
    /// never reaches the codec.
    pub fn with_primitive(primitive: P, level: i32) -> Self {
        let level = CompressionLevel::clamped(level, primitive.level_range());
        Self { primitive, level }
    }

    /// Effective compression level
    pub fn level(&self) -> CompressionLevel {
        self.level
    }

    /// Underlying codec primitive
    pub fn primitive(&self) -> &P {
        &self.primitive
    }
}

impl<P: CodecPrimitive> CompressionFormat for ZstdCompressionFormat<P> {
    fn format_name(&self) -> &'static str {
        ZSTD_FORMAT_NAME
    }

    fn version(&self) -> u32 {
        ZSTD_FORMAT_VERSION
    }

    fn cache_key_suffix(&self) -> String {
        format!(
            "{}_CL_{}_v{}",
            self.format_name(),
            self.level,
            self.version()
        )
    }

    fn compressed_bound(&self, uncompressed_size: usize) -> usize {
        self.primitive.compress_bound(uncompressed_size)
    }

    fn compress(&self, dst: &mut [u8], src: &[u8]) -> Result<usize> {
        let produced = self.primitive.compress(dst, src, self.level.get())?;
        if produced == 0 {
            return Err(Error::compression("Zstd compression produced no output"));
        }

        // The caller sized `dst` from the bound; anything larger may have overrun it.
        let bound = self.compressed_bound(src.len()).min(dst.len());
        if produced > bound {
            warn!(produced, bound, "compressed size exceeds the declared bound");
            return Err(Error::bound_violation(produced, bound));
        }

        debug!(
            input = src.len(),
            output = produced,
            level = self.level.get(),
            "compressed block"
        );
        Ok(produced)
    }

    fn decompress(&self, dst: &mut [u8], src: &[u8]) -> Result<usize> {
        let produced = self.primitive.decompress(dst, src)?;
        if produced == 0 {
            return Err(Error::compression("Zstd decompression produced no output"));
        }

        if produced > dst.len() {
            warn!(
                produced,
                capacity = dst.len(),
                "decompressed size exceeds the destination capacity"
            );
            return Err(Error::bound_violation(produced, dst.len()));
        }

        debug!(input = src.len(), output = produced, "decompressed block");
        Ok(produced)
    }

    fn owns_worth_decompressing_check(&self) -> bool {
        false
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;

    /// Primitive that reports fixed sizes without touching the buffers
    #[derive(Debug, Clone)]
    pub(crate) struct StubPrimitive {
        pub compressed_size: usize,
        pub decompressed_size: usize,
        pub bound_overhead: usize,
    }

    impl StubPrimitive {
        pub(crate) fn reporting(compressed_size: usize, decompressed_size: usize) -> Self {
            Self {
                compressed_size,
                decompressed_size,
                bound_overhead: 16,
            }
        }
    }

    impl CodecPrimitive for StubPrimitive {
        fn compress(&self, _dst: &mut [u8], _src: &[u8], _level: i32) -> Result<usize> {
            Ok(self.compressed_size)
        }

        fn decompress(&self, _dst: &mut [u8], _src: &[u8]) -> Result<usize> {
            Ok(self.decompressed_size)
        }

        fn compress_bound(&self, src_len: usize) -> usize {
            src_len + self.bound_overhead
        }

        fn min_level(&self) -> i32 {
            1
        }

        fn max_level(&self) -> i32 {
            22
        }
    }

    /// Primitive whose codec always fails
    #[derive(Debug, Clone, Copy)]
    struct FailingPrimitive;

    impl CodecPrimitive for FailingPrimitive {
        fn compress(&self, _dst: &mut [u8], _src: &[u8], _level: i32) -> Result<usize> {
            Err(Error::compression("stub failure"))
        }

        fn decompress(&self, _dst: &mut [u8], _src: &[u8]) -> Result<usize> {
            Err(Error::compression("stub failure"))
        }

        fn compress_bound(&self, src_len: usize) -> usize {
            src_len
        }

        fn min_level(&self) -> i32 {
            1
        }

        fn max_level(&self) -> i32 {
            22
        }
    }

    #[test]
    fn test_identity() {
        let format = ZstdCompressionFormat::new(10);
        assert_eq!(format.format_name(), "zstd");
        assert_eq!(format.version(), 1);
        assert_eq!(format.cache_key_suffix(), "zstd_CL_10_v1");
        assert!(!format.owns_worth_decompressing_check());
    }

    #[rstest]
    #[case(22, 22)]
    #[case(99, 22)]
    #[case(0, 1)]
    #[case(-40, 1)]
    fn test_level_is_clamped(#[case] requested: i32, #[case] expected: i32) {
        let format = ZstdCompressionFormat::with_primitive(StubPrimitive::reporting(1, 1), requested);
        assert_eq!(format.level().get(), expected);
        assert_eq!(
            format.cache_key_suffix(),
            format!("zstd_CL_{}_v1", expected)
        );
    }

    #[test]
    fn test_cache_key_suffix_tracks_level() {
        let low = ZstdCompressionFormat::new(3);
        let high = ZstdCompressionFormat::new(19);
        assert_ne!(low.cache_key_suffix(), high.cache_key_suffix());
        assert_eq!(low.cache_key_suffix(), ZstdCompressionFormat::new(3).cache_key_suffix());
    }

    #[test]
    fn test_compress_rejects_size_above_bound() {
        let src = [7u8; 64];
        let format = ZstdCompressionFormat::with_primitive(StubPrimitive::reporting(81, 64), 10);
        let mut dst = vec![0u8; 1024];

        let error = format.compress(&mut dst, &src).unwrap_err();
        assert!(matches!(
            error,
            Error::BoundViolation {
                produced: 81,
                bound: 80
            }
        ));
    }

    #[test]
    fn test_compress_accepts_size_at_bound() {
        let src = [7u8; 64];
        let format = ZstdCompressionFormat::with_primitive(StubPrimitive::reporting(80, 64), 10);
        let mut dst = vec![0u8; 80];

        assert_eq!(format.compress(&mut dst, &src).unwrap(), 80);
    }

    #[test]
    fn test_compress_rejects_size_above_destination() {
        let src = [7u8; 64];
        let format = ZstdCompressionFormat::with_primitive(StubPrimitive::reporting(40, 64), 10);
        let mut dst = vec![0u8; 32];

        assert!(matches!(
            format.compress(&mut dst, &src),
            Err(Error::BoundViolation { produced: 40, bound: 32 })
        ));
    }

    #[test]
    fn test_zero_sized_results_fail() {
        let format = ZstdCompressionFormat::with_primitive(StubPrimitive::reporting(0, 0), 10);
        let mut dst = vec![0u8; 128];

        assert!(matches!(
            format.compress(&mut dst, b"payload"),
            Err(Error::Compression { .. })
        ));
        assert!(matches!(
            format.decompress(&mut dst, b"payload"),
            Err(Error::Compression { .. })
        ));
    }

    #[test]
    fn test_codec_errors_propagate() {
        let format = ZstdCompressionFormat::with_primitive(FailingPrimitive, 10);
        let mut dst = vec![0u8; 128];

        assert!(format.compress(&mut dst, b"payload").is_err());
        assert!(format.decompress(&mut dst, b"payload").is_err());
    }

    #[test]
    fn test_decompress_rejects_size_above_destination() {
        let format = ZstdCompressionFormat::with_primitive(StubPrimitive::reporting(8, 300), 10);
        let mut dst = vec![0u8; 256];

        assert!(matches!(
            format.decompress(&mut dst, b"frame"),
            Err(Error::BoundViolation { produced: 300, bound: 256 })
        ));
    }

    #[test]
    fn test_decompress_trusts_reported_size_within_capacity() {
        let format = ZstdCompressionFormat::with_primitive(StubPrimitive::reporting(8, 100), 10);
        let mut dst = vec![0u8; 256];

        assert_eq!(format.decompress(&mut dst, b"frame").unwrap(), 100);
    }

    #[test]
    fn test_zstd_roundtrip() {
        let format = ZstdCompressionFormat::new(10);
        let data = b"Hello, world! This is a test string for compression.".repeat(10);

        let mut compressed = vec![0u8; format.compressed_bound(data.len())];
        let compressed_size = format.compress(&mut compressed, &data).unwrap();
        assert!(compressed_size < data.len());

        let mut decompressed = vec![0u8; data.len()];
        let decompressed_size = format
            .decompress(&mut decompressed, &compressed[..compressed_size])
            .unwrap();

        assert_eq!(&decompressed[..decompressed_size], data.as_slice());
    }
}
