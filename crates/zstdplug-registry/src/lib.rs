//! Modular feature registry for zstdplug hosts
//!
//! [`ModularFeatures`] maps a feature name to the implementations currently published
//! under it. The registry holds only weak references: it indexes capabilities but never
//! keeps them alive, so the module that registered an implementation stays responsible
//! for withdrawing it before dropping it.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use zstdplug_compression::ZstdCompressionFormat;
//! use zstdplug_registry::ModularFeatures;
//! use zstdplug_types::{CompressionFormat, FeatureRegistry, COMPRESSION_FORMAT_FEATURE_NAME};
//!
//! let registry: ModularFeatures<dyn CompressionFormat> = ModularFeatures::new();
//! let format: Arc<dyn CompressionFormat> = Arc::new(ZstdCompressionFormat::new(10));
//!
//! registry.register_feature(COMPRESSION_FORMAT_FEATURE_NAME, &format);
//! assert!(registry.is_available(COMPRESSION_FORMAT_FEATURE_NAME));
//!
//! registry.unregister_feature(COMPRESSION_FORMAT_FEATURE_NAME, &format);
//! assert!(!registry.is_available(COMPRESSION_FORMAT_FEATURE_NAME));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};
use tracing::{debug, warn};
use zstdplug_types::FeatureRegistry;

/// Thread-safe, non-owning feature registry
pub struct ModularFeatures<T: ?Sized> {
    features: RwLock<HashMap<String, Vec<Weak<T>>>>,
}

impl<T: ?Sized> ModularFeatures<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            features: RwLock::new(HashMap::new()),
        }
    }

    /// Names that currently have at least one live implementation
    pub fn feature_names(&self) -> Vec<String> {
        let features = self.features.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = features
            .iter()
            .filter(|(_, entries)| entries.iter().any(|entry| entry.strong_count() > 0))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}

impl<T: ?Sized> Default for ModularFeatures<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ModularFeatures<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModularFeatures")
            .field("features", &self.feature_names())
            .finish()
    }
}

impl<T: ?Sized + Send + Sync> FeatureRegistry<T> for ModularFeatures<T> {
    fn register_feature(&self, name: &str, feature: &Arc<T>) {
        let mut features = self.features.write().unwrap_or_else(PoisonError::into_inner);
        let entries = features.entry(name.to_string()).or_default();

        // Drop listings whose owner released them without unregistering.
        let before = entries.len();
        entries.retain(|entry| entry.strong_count() > 0);
        if entries.len() != before {
            warn!(feature = name, "pruned implementations dropped while still registered");
        }

        let weak = Arc::downgrade(feature);
        if entries.iter().any(|entry| entry.ptr_eq(&weak)) {
            debug!(feature = name, "implementation already registered");
            return;
        }

        entries.push(weak);
        debug!(feature = name, count = entries.len(), "registered implementation");
    }

    fn unregister_feature(&self, name: &str, feature: &Arc<T>) {
        let mut features = self.features.write().unwrap_or_else(PoisonError::into_inner);
        let Some(entries) = features.get_mut(name) else {
            debug!(feature = name, "no implementations registered");
            return;
        };

        let weak = Arc::downgrade(feature);
        entries.retain(|entry| !entry.ptr_eq(&weak) && entry.strong_count() > 0);
        debug!(feature = name, count = entries.len(), "unregistered implementation");

        if entries.is_empty() {
            features.remove(name);
        }
    }

    fn features(&self, name: &str) -> Vec<Arc<T>> {
        let features = self.features.read().unwrap_or_else(PoisonError::into_inner);
        features
            .get(name)
            .map(|entries| entries.iter().filter_map(Weak::upgrade).collect())
            .unwrap_or_default()
    }
}
