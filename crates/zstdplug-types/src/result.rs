//! Result type alias for zstdplug operations

use crate::Error;

/// Result type alias for zstdplug operations
pub type Result<T> = std::result::Result<T, Error>;
