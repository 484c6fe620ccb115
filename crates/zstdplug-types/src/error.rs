//! Error types and handling for zstdplug
//!
//! Every fallible operation in the plugin reports failure through [`Error`]. Nothing is
//! retried internally; [`Error::is_recoverable`] only tells the host whether trying again
//! with different buffers or settings could make sense.

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Low severity - the host can fall back to the uncompressed form
    Low,
    /// Medium severity - the operation may succeed with different inputs
    Medium,
    /// High severity - the host is misusing the plugin
    High,
}

/// Main error type for zstdplug operations
#[derive(thiserror::Error, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// The codec primitive reported an error or produced no output
    #[error("Compression error: {message}")]
    Compression {
        /// Error message describing the codec failure
        message: String,
    },

    /// The codec reported more output than the caller's buffer was sized for
    #[error("Codec reported {produced} bytes, exceeding the {bound} byte bound")]
    BoundViolation {
        /// Size reported by the codec primitive
        produced: usize,
        /// Bound the caller relied on when sizing the destination
        bound: usize,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Module startup/shutdown called out of order
    #[error("Lifecycle error: {message}")]
    Lifecycle {
        /// Error message describing the invalid transition
        message: String,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Codec failures
    Compression,
    /// Output size exceeded the declared bound
    BoundViolation,
    /// Configuration errors
    Config,
    /// Lifecycle ordering errors
    Lifecycle,
    /// I/O related errors
    Io,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Compression { .. } => ErrorKind::Compression,
            Self::BoundViolation { .. } => ErrorKind::BoundViolation,
            Self::Config { .. } => ErrorKind::Config,
            Self::Lifecycle { .. } => ErrorKind::Lifecycle,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Get the error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Compression { .. } => ErrorSeverity::Low,
            Self::BoundViolation { .. } => ErrorSeverity::Medium,
            Self::Config { .. } => ErrorSeverity::High,
            Self::Lifecycle { .. } => ErrorSeverity::High,
            Self::Io { .. } => ErrorSeverity::Medium,
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Compression { .. } | Self::BoundViolation { .. } | Self::Io { .. } => true,
            Self::Config { .. } | Self::Lifecycle { .. } => false,
        }
    }

    /// Create a new compression error
    pub fn compression<S: Into<String>>(message: S) -> Self {
        Self::Compression {
            message: message.into(),
        }
    }

    /// Create a new bound violation error
    pub fn bound_violation(produced: usize, bound: usize) -> Self {
        Self::BoundViolation { produced, bound }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new lifecycle error
    pub fn lifecycle<S: Into<String>>(message: S) -> Self {
        Self::Lifecycle {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
