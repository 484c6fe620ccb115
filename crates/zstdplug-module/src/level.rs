//! Compression level resolution from the command line

use std::ops::RangeInclusive;
use tracing::{debug, warn};
use zstdplug_config::CommandLine;
use zstdplug_types::{CompressionLevel, DEFAULT_COMPRESSION_LEVEL, ZSTD_LEVEL_OPTION};

/// Resolve the compression level for one module activation
///
/// Uses the `-ZstdLevel=` override when present and parseable, otherwise
/// [`DEFAULT_COMPRESSION_LEVEL`]; the result is clamped into `range` either way.
pub fn resolve_level(command_line: &CommandLine, range: RangeInclusive<i32>) -> CompressionLevel {
    let requested = match command_line.parse_value::<i32>(ZSTD_LEVEL_OPTION) {
        Ok(Some(level)) => {
            debug!(level, "compression level override found");
            level
        }
        Ok(None) => DEFAULT_COMPRESSION_LEVEL,
        Err(error) => {
            warn!(
                %error,
                default = DEFAULT_COMPRESSION_LEVEL,
                "ignoring unparsable compression level override"
            );
            DEFAULT_COMPRESSION_LEVEL
        }
    };

    let level = CompressionLevel::clamped(requested, range.clone());
    if level.get() != requested {
        warn!(
            requested,
            effective = level.get(),
            min = *range.start(),
            max = *range.end(),
            "compression level clamped to the supported range"
        );
    }
    level
}
