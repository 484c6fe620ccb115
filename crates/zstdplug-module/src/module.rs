//! Module lifecycle controller

use crate::level::resolve_level;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use zstdplug_compression::{ZstdCompressionFormat, ZstdPrimitive};
use zstdplug_config::CommandLine;
use zstdplug_types::{
    CodecPrimitive, CompressionFormat, CompressionLevel, Error, FeatureRegistry, Result,
    COMPRESSION_FORMAT_FEATURE_NAME,
};

/// Registry handle injected into the module at startup
pub type SharedRegistry = Arc<dyn FeatureRegistry<dyn CompressionFormat>>;

/// Lifecycle state of a [`ZstdPluginModule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// No format exists
    Unloaded,
    /// A format is built and registered
    Active,
}

/// Format published by an active module, together with where it was published
struct ActiveModule {
    format: Arc<dyn CompressionFormat>,
    level: CompressionLevel,
    registry: SharedRegistry,
}

impl ActiveModule {
    /// Unregister the format, then release it
    fn withdraw(self) {
        let Self {
            format, registry, ..
        } = self;

        registry.unregister_feature(COMPRESSION_FORMAT_FEATURE_NAME, &format);
        drop(format);
    }
}

/// Owns at most one zstd compression format and manages its registration
///
/// The module holds the only strong reference to the format it builds; the registry keeps
/// a weak listing. Handles returned by [`format`](Self::format) must not outlive the
/// active period.
pub struct ZstdPluginModule<P = ZstdPrimitive> {
    primitive: P,
    active: Option<ActiveModule>,
}

impl ZstdPluginModule<ZstdPrimitive> {
    /// Create an unloaded module backed by the zstd library
    pub fn new() -> Self {
        Self::with_primitive(ZstdPrimitive::new())
    }
}

impl Default for ZstdPluginModule<ZstdPrimitive> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: CodecPrimitive + Clone + 'static> ZstdPluginModule<P> {
    /// Create an unloaded module backed by `primitive`
    pub fn with_primitive(primitive: P) -> Self {
        Self {
            primitive,
            active: None,
        }
    }

    /// Build the compression format and register it with `registry`
    ///
    /// The level is resolved from `command_line` once and stays fixed until shutdown.
    pub fn startup(&mut self, command_line: &CommandLine, registry: SharedRegistry) -> Result<()> {
        if self.active.is_some() {
            return Err(Error::lifecycle("startup called while the module is active"));
        }

        let level = resolve_level(command_line, self.primitive.level_range());
        let format: Arc<dyn CompressionFormat> = Arc::new(ZstdCompressionFormat::with_primitive(
            self.primitive.clone(),
            level.get(),
        ));

        registry.register_feature(COMPRESSION_FORMAT_FEATURE_NAME, &format);
        info!(
            level = level.get(),
            cache_key_suffix = %format.cache_key_suffix(),
            "zstd compression format registered"
        );

        self.active = Some(ActiveModule {
            format,
            level,
            registry,
        });
        Ok(())
    }
}

impl<P> ZstdPluginModule<P> {
    /// Unregister the compression format, then release it
    pub fn shutdown(&mut self) -> Result<()> {
        let active = self
            .active
            .take()
            .ok_or_else(|| Error::lifecycle("shutdown called before startup"))?;

        let level = active.level;
        active.withdraw();
        info!(level = level.get(), "zstd compression format unregistered");
        Ok(())
    }

    /// Current lifecycle state
    pub fn state(&self) -> ModuleState {
        if self.active.is_some() {
            ModuleState::Active
        } else {
            ModuleState::Unloaded
        }
    }

    /// Whether the module is active
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The registered format while the module is active
    pub fn format(&self) -> Option<Arc<dyn CompressionFormat>> {
        self.active.as_ref().map(|active| Arc::clone(&active.format))
    }

    /// Effective compression level while the module is active
    pub fn level(&self) -> Option<CompressionLevel> {
        self.active.as_ref().map(|active| active.level)
    }
}

impl<P> Drop for ZstdPluginModule<P> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            debug!("module dropped while active, withdrawing compression format");
            active.withdraw();
        }
    }
}

impl<P> fmt::Debug for ZstdPluginModule<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZstdPluginModule")
            .field("state", &self.state())
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}
