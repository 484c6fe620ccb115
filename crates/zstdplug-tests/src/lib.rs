//! zstdplug testing suite
//!
//! Cross-crate integration tests and benchmarks for the zstd compression module.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Shared test utilities
///
/// Data generators and module fixtures used by the integration tests and benchmarks.
pub mod test_utils;
