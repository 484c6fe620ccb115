//! Core type system and error handling for zstdplug
//!
//! This crate provides the foundational types shared by every zstdplug crate:
//!
//! - **Error handling**: a single error enum with kinds and severity levels
//! - **Compression levels**: a clamped integer level type
//! - **Capability traits**: the compression-format contract a host consumes, the codec
//!   primitive the format wraps, and the feature registry formats are published to
//! - **Constants**: well-known feature names and option strings
//!
//! # Features
//!
//! - `serde`: Enable serialization support for [`CompressionLevel`]
//!
//! # Examples
//!
//! ```rust
//! use zstdplug_types::CompressionLevel;
//!
//! let level = CompressionLevel::clamped(99, 1..=22);
//! assert_eq!(level.get(), 22);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod error;
pub mod level;
pub mod result;
pub mod traits;

// Re-export commonly used types
pub use constants::*;
pub use error::{Error, ErrorKind, ErrorSeverity};
pub use level::CompressionLevel;
pub use result::Result;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let codec_error = Error::compression("frame is corrupt");
        assert_eq!(codec_error.severity(), ErrorSeverity::Low);
        assert!(codec_error.is_recoverable());

        let lifecycle_error = Error::lifecycle("module already active");
        assert_eq!(lifecycle_error.severity(), ErrorSeverity::High);
        assert!(!lifecycle_error.is_recoverable());
    }

    #[test]
    fn test_default_level_is_in_zstd_range() {
        let level = CompressionLevel::clamped(DEFAULT_COMPRESSION_LEVEL, 1..=22);
        assert_eq!(level.get(), DEFAULT_COMPRESSION_LEVEL);
    }
}
