//! Plugin module for the zstd compression format
//!
//! [`ZstdPluginModule`] is the single authority that builds, publishes and withdraws the
//! [`ZstdCompressionFormat`](zstdplug_compression::ZstdCompressionFormat). A host drives it
//! through two calls:
//!
//! - [`startup`](ZstdPluginModule::startup) resolves the compression level from the command
//!   line (`-ZstdLevel=<n>`, default 10, clamped to the codec's range), builds the format and
//!   registers it under [`COMPRESSION_FORMAT_FEATURE_NAME`](zstdplug_types::COMPRESSION_FORMAT_FEATURE_NAME)
//! - [`shutdown`](ZstdPluginModule::shutdown) unregisters the format and only then releases it
//!
//! Dropping an active module runs the shutdown sequence.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use zstdplug_config::CommandLine;
//! use zstdplug_module::{SharedRegistry, ZstdPluginModule};
//! use zstdplug_registry::ModularFeatures;
//! use zstdplug_types::{CompressionFormat, FeatureRegistry, COMPRESSION_FORMAT_FEATURE_NAME};
//!
//! let registry: SharedRegistry = Arc::new(ModularFeatures::<dyn CompressionFormat>::new());
//! let mut module = ZstdPluginModule::new();
//!
//! module.startup(&CommandLine::new("-ZstdLevel=19"), Arc::clone(&registry))?;
//! let format = &registry.features(COMPRESSION_FORMAT_FEATURE_NAME)[0];
//! assert_eq!(format.cache_key_suffix(), "zstd_CL_19_v1");
//!
//! module.shutdown()?;
//! assert!(!registry.is_available(COMPRESSION_FORMAT_FEATURE_NAME));
//! # Ok::<(), zstdplug_types::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod level;
pub mod module;

pub use level::resolve_level;
pub use module::{ModuleState, SharedRegistry, ZstdPluginModule};
