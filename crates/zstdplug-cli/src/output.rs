//! Output structures for the zstdplug CLI

use serde::{Deserialize, Serialize};
use std::fmt;
use zstdplug_types::CompressionFormat;

/// Description of the registered compression format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Codec family name
    pub format: String,
    /// Codec format revision
    pub version: u32,
    /// Effective compression level
    pub level: i32,
    /// Cache-key suffix derived from the configuration
    pub cache_key_suffix: String,
    /// Whether the format runs its own worth-decompressing check
    pub owns_worth_decompressing_check: bool,
}

impl FormatInfo {
    /// Describe `format`, which was configured at `level`
    pub fn new(format: &dyn CompressionFormat, level: i32) -> Self {
        Self {
            format: format.format_name().to_string(),
            version: format.version(),
            level,
            cache_key_suffix: format.cache_key_suffix(),
            owns_worth_decompressing_check: format.owns_worth_decompressing_check(),
        }
    }
}

impl fmt::Display for FormatInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Format:           {}", self.format)?;
        writeln!(f, "Version:          {}", self.version)?;
        writeln!(f, "Level:            {}", self.level)?;
        write!(f, "Cache key suffix: {}", self.cache_key_suffix)
    }
}

/// Summary of a compress or decompress run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferSummary {
    /// Operation performed
    pub operation: String,
    /// Bytes read from the input file
    pub input_bytes: usize,
    /// Bytes written to the output file
    pub output_bytes: usize,
}

impl TransferSummary {
    /// Output size relative to input size
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            1.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

impl fmt::Display for TransferSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} bytes ({:.1}%)",
            self.operation,
            self.input_bytes,
            self.output_bytes,
            self.ratio() * 100.0
        )
    }
}
