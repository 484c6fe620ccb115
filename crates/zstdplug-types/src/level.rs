//! Compression level type

use std::fmt;
use std::ops::RangeInclusive;

/// A codec compression level that has been clamped into the codec's supported range
///
/// The only way to build one is [`CompressionLevel::clamped`], so a level held by a
/// compression format can never lie outside the range it was validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressionLevel(i32);

impl CompressionLevel {
    /// Clamp `level` into `range`
    pub fn clamped(level: i32, range: RangeInclusive<i32>) -> Self {
        let (min, max) = range.into_inner();
        // An inverted range would make `clamp` panic; the upper bound wins.
        if min > max {
            return Self(max);
        }
        Self(level.clamp(min, max))
    }

    /// Get the compression level value
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
