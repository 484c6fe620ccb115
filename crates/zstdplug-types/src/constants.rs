//! Well-known names shared between the plugin and its hosts

/// Feature name under which compression formats are registered
pub const COMPRESSION_FORMAT_FEATURE_NAME: &str = "CompressionFormat";

/// Command-line option that overrides the default compression level
pub const ZSTD_LEVEL_OPTION: &str = "-ZstdLevel=";

/// Compression level used when no override is given
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 10;

/// Name reported by the zstd compression format
pub const ZSTD_FORMAT_NAME: &str = "zstd";

/// Format revision; bump only when the codec's bitstream compatibility changes
pub const ZSTD_FORMAT_VERSION: u32 = 1;
