//! Configuration sources for zstdplug
//!
//! Two layers live here:
//!
//! - [`CommandLine`]: the read-only process argument string the plugin module inspects at
//!   startup. This is the only configuration the module itself reads.
//! - [`HostConfig`]: settings of the reference host binary (logging, the argument string it
//!   hands to the module, decompression limits), loaded by [`ConfigBuilder`] from defaults,
//!   an optional file, and environment variables.
//!
//! # Examples
//!
//! ```rust
//! use zstdplug_config::CommandLine;
//!
//! let command_line = CommandLine::new("-game -ZSTDLEVEL=19 -log");
//! assert!(command_line.has_option("-ZstdLevel="));
//! assert_eq!(command_line.parse_value::<i32>("-ZstdLevel=").unwrap(), Some(19));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};

pub mod builder;
pub mod command_line;
pub mod error;

pub use builder::ConfigBuilder;
pub use command_line::CommandLine;
pub use error::{ConfigError, ConfigResult};

/// Configuration of the reference host binary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Arguments handed to the plugin module
    pub module: ModuleConfig,
    /// Decompression limits
    pub decompression: DecompressionConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Plugin module configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Command-line string the module parses at startup, e.g. `-ZstdLevel=19`
    pub args: String,
}

/// Decompression configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompressionConfig {
    /// Largest output buffer the host will allocate for one frame
    ///
    /// Also the buffer size used when a frame does not record its content size.
    pub max_output_size: usize,
}

impl Default for DecompressionConfig {
    fn default() -> Self {
        Self {
            max_output_size: 256 * 1024 * 1024, // 256MB
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_host_config() {
        let config = HostConfig::default();
        assert_eq!(config.logging.level, "warn");
        assert!(config.module.args.is_empty());
        assert_eq!(config.decompression.max_output_size, 256 * 1024 * 1024);
    }
}
