//! Error types for shingle.
//!
//! Chunking itself never fails. These errors come from the fallible edges:
//! building a configuration from untrusted values and loading it from TOML.

/// Errors that can occur while configuring a chunker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk size (must be > 0).
    #[error("invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(usize),

    /// Invalid minimum chunk size (must be > 0).
    #[error("invalid minimum chunk size: {0} (must be > 0)")]
    InvalidMinChunkSize(usize),

    /// Minimum chunk size exceeds the chunk size.
    #[error("minimum chunk size {min} exceeds chunk size {size}")]
    MinExceedsSize {
        /// The chunk size.
        size: usize,
        /// The minimum that exceeded the size.
        min: usize,
    },

    /// The configuration could not be parsed.
    #[error("invalid chunker config: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read chunker config: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for shingle operations.
pub type Result<T> = std::result::Result<T, Error>;
