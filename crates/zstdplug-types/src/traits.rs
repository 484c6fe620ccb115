//! Capability traits for zstdplug
//!
//! These traits are the seams between the plugin and the outside world: the host consumes
//! a [`CompressionFormat`], the format is built on a [`CodecPrimitive`], and formats are
//! published through a [`FeatureRegistry`].

use crate::Result;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Block compression capability a host discovers through the feature registry
///
/// Implementations are immutable after construction and every method takes `&self`, so
/// a registered format may be shared across threads and called concurrently.
pub trait CompressionFormat: Send + Sync {
    /// Fixed identifier of the codec family
    fn format_name(&self) -> &'static str;

    /// Revision of the codec's bitstream format
    fn version(&self) -> u32;

    /// Deterministic string identifying everything that affects the compressed bytes
    ///
    /// Appended to content-addressed cache keys so cached artifacts are invalidated when
    /// the level or codec version changes.
    fn cache_key_suffix(&self) -> String;

    /// Worst-case compressed size for an input of `uncompressed_size` bytes
    fn compressed_bound(&self, uncompressed_size: usize) -> usize;

    /// Compress `src` into `dst`, returning the number of bytes written
    ///
    /// `dst` should be at least [`compressed_bound`](Self::compressed_bound) bytes long.
    /// On error the contents of `dst` are unspecified.
    fn compress(&self, dst: &mut [u8], src: &[u8]) -> Result<usize>;

    /// Decompress `src` into `dst`, returning the number of bytes written
    fn decompress(&self, dst: &mut [u8], src: &[u8]) -> Result<usize>;

    /// Whether the format runs its own "worth decompressing" check before decompressing
    fn owns_worth_decompressing_check(&self) -> bool;
}

/// Opaque byte-stream codec wrapped by a compression format
///
/// All methods are pure with respect to `self`; sizes are in bytes.
pub trait CodecPrimitive: Send + Sync {
    /// Compress `src` into `dst` at `level`, returning the compressed size
    fn compress(&self, dst: &mut [u8], src: &[u8], level: i32) -> Result<usize>;

    /// Decompress `src` into `dst`, returning the decompressed size
    fn decompress(&self, dst: &mut [u8], src: &[u8]) -> Result<usize>;

    /// Worst-case compressed size for `src_len` input bytes
    fn compress_bound(&self, src_len: usize) -> usize;

    /// Lowest supported compression level
    fn min_level(&self) -> i32;

    /// Highest supported compression level
    fn max_level(&self) -> i32;

    /// Supported compression levels as an inclusive range
    fn level_range(&self) -> RangeInclusive<i32> {
        self.min_level()..=self.max_level()
    }
}

/// Directory by which a host discovers implementations of a named capability
///
/// The registry only indexes implementations; it never keeps them alive. Owners must
/// unregister an implementation before dropping it.
pub trait FeatureRegistry<T: ?Sized>: Send + Sync {
    /// Publish `feature` under `name`; registering the same instance twice is a no-op
    fn register_feature(&self, name: &str, feature: &Arc<T>);

    /// Withdraw `feature` from `name`; unregistering an absent instance is a no-op
    fn unregister_feature(&self, name: &str, feature: &Arc<T>);

    /// Live implementations registered under `name`, in registration order
    fn features(&self, name: &str) -> Vec<Arc<T>>;

    /// Number of live implementations registered under `name`
    fn feature_count(&self, name: &str) -> usize {
        self.features(name).len()
    }

    /// Whether at least one implementation is registered under `name`
    fn is_available(&self, name: &str) -> bool {
        self.feature_count(name) > 0
    }
}
