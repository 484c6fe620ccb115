//! Zstandard compression format for zstdplug
//!
//! This crate provides the block compression format a host discovers through the feature
//! registry. It includes:
//!
//! - **Codec primitive**: [`ZstdPrimitive`], a thin wrapper over the `zstd` bulk API
//! - **Compression format**: [`ZstdCompressionFormat`], which pins one compression level,
//!   derives the cache-key suffix from it, and refuses to report output that exceeds the
//!   buffer-size contract the caller relied on
//!
//! # Examples
//!
//! ```rust
//! use zstdplug_compression::ZstdCompressionFormat;
//! use zstdplug_types::CompressionFormat;
//!
//! let format = ZstdCompressionFormat::new(10);
//! let data = b"Hello, world! This is test data for compression.".repeat(8);
//!
//! let mut compressed = vec![0u8; format.compressed_bound(data.len())];
//! let compressed_size = format.compress(&mut compressed, &data)?;
//!
//! let mut decompressed = vec![0u8; data.len()];
//! let decompressed_size = format.decompress(&mut decompressed, &compressed[..compressed_size])?;
//!
//! assert_eq!(&decompressed[..decompressed_size], data.as_slice());
//! assert_eq!(format.cache_key_suffix(), "zstd_CL_10_v1");
//! # Ok::<(), zstdplug_types::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod format;
pub mod primitive;


// Re-export main types
pub use format::ZstdCompressionFormat;
pub use primitive::ZstdPrimitive;
