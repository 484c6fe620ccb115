//! Shared utilities for zstdplug tests and benchmarks

use std::sync::Arc;
use zstdplug_config::CommandLine;
use zstdplug_module::ZstdPluginModule;
use zstdplug_registry::ModularFeatures;
use zstdplug_types::{CompressionFormat, FeatureRegistry, COMPRESSION_FORMAT_FEATURE_NAME};

/// Registry type used by the fixtures
pub type FormatRegistry = ModularFeatures<dyn CompressionFormat>;

/// Test data generation patterns
#[derive(Debug, Clone, Copy)]
pub enum TestDataPattern {
    /// All zeros - highly compressible
    Zeros,
    /// Deterministic pseudo-random bytes - incompressible
    Random,
    /// Mixed compressible/incompressible data
    Mixed,
    /// Repeated English text
    Text,
}

/// All data patterns
pub const ALL_PATTERNS: [TestDataPattern; 4] = [
    TestDataPattern::Zeros,
    TestDataPattern::Random,
    TestDataPattern::Mixed,
    TestDataPattern::Text,
];

/// Generate test data with the given pattern
///
/// Output is deterministic so benchmark runs are comparable.
pub fn generate_test_data(size: usize, pattern: TestDataPattern) -> Vec<u8> {
    match pattern {
        TestDataPattern::Zeros => vec![0u8; size],
        TestDataPattern::Random => {
            // xorshift64
            let mut state = 0x9E37_79B9_7F4A_7C15u64;
            (0..size)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    (state >> 56) as u8
                })
                .collect()
        }
        TestDataPattern::Mixed => (0..size)
            .map(|i| match i % 1000 {
                0..=99 => 0,
                100..=199 => 255,
                _ => (i % 256) as u8,
            })
            .collect(),
        TestDataPattern::Text => b"The quick brown fox jumps over the lazy dog. "
            .iter()
            .copied()
            .cycle()
            .take(size)
            .collect(),
    }
}

/// A module started against its own fresh registry
pub struct ModuleFixture {
    /// Registry the module publishes to
    pub registry: Arc<FormatRegistry>,
    /// The running module
    pub module: ZstdPluginModule,
}

impl ModuleFixture {
    /// Start a zstd module with `args` as its command line
    pub fn start(args: &str) -> Self {
        let registry = Arc::new(FormatRegistry::new());
        let mut module = ZstdPluginModule::new();
        module
            .startup(&CommandLine::new(args), registry.clone())
            .expect("module startup");
        Self { registry, module }
    }

    /// The format the host would discover through the registry
    pub fn discovered_format(&self) -> Arc<dyn CompressionFormat> {
        self.registry
            .features(COMPRESSION_FORMAT_FEATURE_NAME)
            .into_iter()
            .next()
            .expect("a registered compression format")
    }
}

/// Compress `data` with `format` into a bound-sized buffer
pub fn compress(format: &dyn CompressionFormat, data: &[u8]) -> zstdplug_types::Result<Vec<u8>> {
    let mut compressed = vec![0u8; format.compressed_bound(data.len())];
    let size = format.compress(&mut compressed, data)?;
    compressed.truncate(size);
    Ok(compressed)
}

/// Decompress `frame` with `format`, expecting `original_len` bytes of output
pub fn decompress(
    format: &dyn CompressionFormat,
    frame: &[u8],
    original_len: usize,
) -> zstdplug_types::Result<Vec<u8>> {
    let mut decompressed = vec![0u8; original_len];
    let size = format.decompress(&mut decompressed, frame)?;
    decompressed.truncate(size);
    Ok(decompressed)
}
