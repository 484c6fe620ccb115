//! Minimal host that drives the plugin module lifecycle
//!
//! The host owns the feature registry, starts the module against it, and looks the
//! compression format up by feature name the same way any other consumer would.

use anyhow::{anyhow, bail, Context, Result};
use std::sync::Arc;
use tracing::{debug, info};
use zstd::zstd_safe;
use zstdplug_config::CommandLine;
use zstdplug_module::ZstdPluginModule;
use zstdplug_registry::ModularFeatures;
use zstdplug_types::{
    CompressionFormat, CompressionLevel, FeatureRegistry, COMPRESSION_FORMAT_FEATURE_NAME,
    ZSTD_FORMAT_NAME,
};

/// A running plugin module together with the registry it publishes to
pub struct Host {
    registry: Arc<ModularFeatures<dyn CompressionFormat>>,
    module: ZstdPluginModule,
}

impl Host {
    /// Create a registry and start the module against it
    pub fn start(command_line: &CommandLine) -> Result<Self> {
        let registry = Arc::new(ModularFeatures::<dyn CompressionFormat>::new());
        let mut module = ZstdPluginModule::new();
        module
            .startup(command_line, registry.clone())
            .context("Failed to start the zstd module")?;

        info!(command_line = %command_line, "zstd module started");
        Ok(Self { registry, module })
    }

    /// Discover the zstd format through the registry
    pub fn compression_format(&self) -> Result<Arc<dyn CompressionFormat>> {
        self.registry
            .features(COMPRESSION_FORMAT_FEATURE_NAME)
            .into_iter()
            .find(|format| format.format_name() == ZSTD_FORMAT_NAME)
            .ok_or_else(|| anyhow!("No '{}' compression format is registered", ZSTD_FORMAT_NAME))
    }

    /// Effective compression level of the running module
    pub fn level(&self) -> Option<CompressionLevel> {
        self.module.level()
    }

    /// Shut the module down
    pub fn stop(mut self) -> Result<()> {
        self.module
            .shutdown()
            .context("Failed to shut down the zstd module")?;
        debug!(
            remaining = self.registry.feature_count(COMPRESSION_FORMAT_FEATURE_NAME),
            "zstd module stopped"
        );
        Ok(())
    }
}

/// Compress `data` into a freshly allocated, bound-sized buffer
pub fn compress_bytes(format: &dyn CompressionFormat, data: &[u8]) -> Result<Vec<u8>> {
    let mut compressed = vec![0u8; format.compressed_bound(data.len())];
    let size = format
        .compress(&mut compressed, data)
        .context("Compression failed")?;
    compressed.truncate(size);
    Ok(compressed)
}

/// Decompress `frame` into a buffer of `capacity` bytes
pub fn decompress_bytes(
    format: &dyn CompressionFormat,
    frame: &[u8],
    capacity: usize,
) -> Result<Vec<u8>> {
    let mut decompressed = vec![0u8; capacity];
    let size = format
        .decompress(&mut decompressed, frame)
        .context("Decompression failed")?;
    decompressed.truncate(size);
    Ok(decompressed)
}

/// Output buffer size for decompressing `frame`
///
/// An explicit size wins, then the content size recorded in the frame header, then
/// `max_output_size`. Sizes above `max_output_size` are rejected before anything is
/// allocated, since the header is untrusted input.
pub fn output_capacity(
    frame: &[u8],
    explicit: Option<usize>,
    max_output_size: usize,
) -> Result<usize> {
    if let Some(size) = explicit {
        if size > max_output_size {
            bail!(
                "Requested output size {} exceeds the {} byte decompression limit",
                size,
                max_output_size
            );
        }
        return Ok(size);
    }

    match zstd_safe::get_frame_content_size(frame) {
        Ok(Some(size)) if size > max_output_size as u64 => bail!(
            "Frame declares {} decompressed bytes, exceeding the {} byte decompression limit",
            size,
            max_output_size
        ),
        Ok(Some(size)) => Ok(usize::try_from(size).unwrap_or(max_output_size)),
        _ => Ok(max_output_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_host_lifecycle() {
        let host = Host::start(&CommandLine::new("-ZstdLevel=4")).unwrap();
        let format = host.compression_format().unwrap();
        assert_eq!(format.cache_key_suffix(), "zstd_CL_4_v1");
        assert_eq!(host.level().map(CompressionLevel::get), Some(4));
        drop(format);

        host.stop().unwrap();
    }

    #[test]
    fn test_roundtrip_with_recorded_content_size() {
        let host = Host::start(&CommandLine::default()).unwrap();
        let format = host.compression_format().unwrap();
        let data = b"host round trip payload ".repeat(100);

        let frame = compress_bytes(format.as_ref(), &data).unwrap();
        let capacity = output_capacity(&frame, None, 64 * 1024).unwrap();
        assert_eq!(capacity, data.len());

        let restored = decompress_bytes(format.as_ref(), &frame, capacity).unwrap();
        assert_eq!(restored, data);
    }

    #[rstest]
    #[case(Some(42), 42)]
    #[case(None, 1024)]
    fn test_output_capacity_for_garbage(#[case] explicit: Option<usize>, #[case] expected: usize) {
        assert_eq!(
            output_capacity(b"not a zstd frame", explicit, 1024).unwrap(),
            expected
        );
    }

    #[test]
    fn test_explicit_size_above_limit_is_rejected() {
        let error = output_capacity(b"not a zstd frame", Some(4096), 1024).unwrap_err();
        assert!(error.to_string().contains("decompression limit"));
    }

    #[test]
    fn test_declared_size_above_limit_is_rejected() {
        // Single-segment frame header declaring 2^60 bytes of content.
        let header = [
            0x28, 0xB5, 0x2F, 0xFD, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0x10, 0, 0, 0,
        ];
        let max_output_size = 256 * 1024 * 1024;

        let error = output_capacity(&header, None, max_output_size).unwrap_err();
        assert!(error.to_string().contains("1152921504606846976"));
    }

    #[test]
    fn test_declared_size_within_limit_is_used() {
        let host = Host::start(&CommandLine::default()).unwrap();
        let format = host.compression_format().unwrap();
        let data = vec![7u8; 4096];

        let frame = compress_bytes(format.as_ref(), &data).unwrap();
        assert_eq!(output_capacity(&frame, None, 4096).unwrap(), 4096);
        assert!(output_capacity(&frame, None, 4095).is_err());
    }

    #[test]
    fn test_undersized_capacity_fails() {
        let host = Host::start(&CommandLine::default()).unwrap();
        let format = host.compression_format().unwrap();
        let data = b"0123456789".repeat(100);

        let frame = compress_bytes(format.as_ref(), &data).unwrap();
        assert!(decompress_bytes(format.as_ref(), &frame, 10).is_err());
    }
}
