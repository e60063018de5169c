//! Chunker configuration.
//!
//! Three numbers control the chunker:
//!
//! - `chunk_size`: the target ceiling, in characters, for each chunk before
//!   overlap is added.
//! - `chunk_overlap`: how many characters of each neighbor are copied into a
//!   chunk. Never more than half of `chunk_size`.
//! - `min_chunk_size`: chunks smaller than this are merged with their
//!   neighbors when the merged result still fits.
//!
//! ```text
//! chunk_size = 1000, chunk_overlap = 200, min_chunk_size = 700
//!
//!   [ ...200 chars of previous ]\n[ chunk text, <= ~1000 ]\n[ 200 chars of next... ]
//!   \_____________________________ at most 1500 chars _____________________________/
//! ```
//!
//! ## Preconditions
//!
//! `min_chunk_size` should not exceed `chunk_size`. Chunking still terminates
//! when it does, but nearly every chunk ends up below the minimum. Loading a
//! config with that shape logs a warning; [`ChunkerConfig::validate`] turns it
//! into an error for callers who prefer to reject it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_min_chunk_size() -> usize {
    700
}

/// Size settings for the chunker, counted in Unicode code points.
///
/// # Examples
///
/// ```rust
/// use shingle::ChunkerConfig;
///
/// let config = ChunkerConfig::default();
/// assert_eq!(config.chunk_size(), 1000);
/// assert_eq!(config.chunk_overlap(), 200);
/// assert_eq!(config.min_chunk_size(), 700);
///
/// // Overlap is clamped to half the chunk size
/// let config = ChunkerConfig::new(100, 80, 50);
/// assert_eq!(config.chunk_overlap(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChunkerConfig")]
pub struct ChunkerConfig {
    chunk_size: usize,
    chunk_overlap: usize,
    min_chunk_size: usize,
}

/// The config as written by a user, before clamping and validation.
#[derive(Debug, Deserialize)]
struct RawChunkerConfig {
    #[serde(default = "default_chunk_size")]
    chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    chunk_overlap: usize,
    #[serde(default = "default_min_chunk_size")]
    min_chunk_size: usize,
}

impl TryFrom<RawChunkerConfig> for ChunkerConfig {
    type Error = Error;

    fn try_from(raw: RawChunkerConfig) -> Result<Self> {
        let config = Self::try_new(raw.chunk_size, raw.chunk_overlap, raw.min_chunk_size)?;
        if config.min_chunk_size > config.chunk_size {
            tracing::warn!(
                chunk_size = config.chunk_size,
                min_chunk_size = config.min_chunk_size,
                "min_chunk_size exceeds chunk_size; most chunks will stay below the minimum"
            );
        }
        Ok(config)
    }
}

impl ChunkerConfig {
    /// Create a configuration, clamping `chunk_overlap` to `chunk_size / 2`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size == 0` or `min_chunk_size == 0`.
    #[must_use]
    pub fn new(chunk_size: usize, chunk_overlap: usize, min_chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be > 0");
        assert!(min_chunk_size > 0, "min_chunk_size must be > 0");
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size / 2),
            min_chunk_size,
        }
    }

    /// Fallible variant of [`ChunkerConfig::new`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] or [`Error::InvalidMinChunkSize`]
    /// when the corresponding size is zero.
    pub fn try_new(
        chunk_size: usize,
        chunk_overlap: usize,
        min_chunk_size: usize,
    ) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidChunkSize(chunk_size));
        }
        if min_chunk_size == 0 {
            return Err(Error::InvalidMinChunkSize(min_chunk_size));
        }
        Ok(Self::new(chunk_size, chunk_overlap, min_chunk_size))
    }

    /// Parse a configuration from a TOML table. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML or zero sizes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shingle::ChunkerConfig;
    ///
    /// let config = ChunkerConfig::from_toml_str("chunk_size = 500").unwrap();
    /// assert_eq!(config.chunk_size(), 500);
    /// assert_eq!(config.chunk_overlap(), 200);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise the same
    /// errors as [`ChunkerConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject the degenerate `min_chunk_size > chunk_size` shape.
    ///
    /// The chunker never calls this; it is for hosts that want strictness.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MinExceedsSize`].
    pub fn validate(&self) -> Result<()> {
        if self.min_chunk_size > self.chunk_size {
            return Err(Error::MinExceedsSize {
                size: self.chunk_size,
                min: self.min_chunk_size,
            });
        }
        Ok(())
    }

    /// Target maximum characters per chunk, before overlap.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Characters copied from each neighbor.
    #[must_use]
    pub const fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Minimum characters a chunk should reach after merging.
    #[must_use]
    pub const fn min_chunk_size(&self) -> usize {
        self.min_chunk_size
    }

    /// Whether content of `len` code points is over the overlay budget of
    /// exactly `3 * chunk_size / 2`, compared without rounding: `len` is over
    /// when `2 * len > 3 * chunk_size`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shingle::ChunkerConfig;
    ///
    /// // Odd sizes keep the half: 3 * 11 / 2 = 16.5
    /// let config = ChunkerConfig::new(11, 0, 1);
    /// assert!(!config.exceeds_overlay_budget(16));
    /// assert!(config.exceeds_overlay_budget(17));
    /// ```
    #[must_use]
    pub fn exceeds_overlay_budget(&self, len: usize) -> bool {
        len.saturating_mul(2) > self.chunk_size.saturating_mul(3)
    }
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self::new(
            default_chunk_size(),
            default_chunk_overlap(),
            default_min_chunk_size(),
        )
    }
}
