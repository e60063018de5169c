//! # shingle
//!
//! Overlapping, size-bounded text chunking for embedding pipelines.
//!
//! ## The Problem
//!
//! Embedding models take bounded input. Documents don't fit. Split them too
//! small and each piece loses its context; split them too large and the
//! embedding smears several topics together. And wherever you cut, the
//! sentence straddling the cut is only half-visible to each side.
//!
//! Shingles on a roof solve the same problem: fixed-size pieces, each
//! overlapping its neighbor so nothing falls through the gap.
//!
//! ## The Algorithm
//!
//! ```text
//! 1. Normalize   CRLF -> LF, collapse spaces/tabs, cap blank lines, trim
//! 2. Split       on blank lines (paragraphs)
//! 3. Optimize    paragraphs > chunk_size are split into sentences and
//!                greedily repacked up to chunk_size
//! 4. Merge       pieces < min_chunk_size are folded into neighbors
//! 5. Overlap     each chunk gets the tail of the previous chunk and the
//!                head of the next one, unless that pushes it past
//!                1.5 x chunk_size
//! ```
//!
//! All sizes are Unicode code points, not bytes. A chunk boundary never
//! lands inside a character.
//!
//! ```text
//! chunk_size = 1000, chunk_overlap = 200
//!
//! segment 0: [================ 950 ================]
//! segment 1:                                          [============= 800 =============]
//!
//! chunk 0:   [================ 950 ================]\n[200 of seg 1]
//! chunk 1:                          [200 of seg 0]\n[============= 800 =============]
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use shingle::{Chunker, ChunkerConfig, Metadata, OverlapChunker};
//!
//! let chunker = OverlapChunker::new(ChunkerConfig::default()); // 1000 / 200 / 700
//!
//! let text = "A short post.\n\nWith two paragraphs.";
//! let chunks = chunker.split_text(text, &Metadata::new());
//!
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].content, "A short post. With two paragraphs.");
//! assert_eq!(chunks[0].metadata["total_chunks"], 1);
//! ```
//!
//! ## Configuration
//!
//! [`ChunkerConfig`] deserializes from TOML (or anything serde reads), with
//! every key optional:
//!
//! ```rust
//! use shingle::ChunkerConfig;
//!
//! let config = ChunkerConfig::from_toml_str(r#"
//!     chunk_size = 800
//!     chunk_overlap = 600   # clamped to chunk_size / 2
//! "#).unwrap();
//!
//! assert_eq!(config.chunk_overlap(), 400);
//! assert_eq!(config.min_chunk_size(), 700);
//! ```
//!
//! ## Errors and Logging
//!
//! Chunking is total: any string in, a (possibly empty) list of chunks out.
//! Only configuration loading returns [`Result`].
//!
//! The crate logs through [`tracing`] and never installs a subscriber. Each
//! `split_text` call emits one `debug` summary plus `trace` events per pass.

mod chunk;
mod chunker;
mod config;
mod error;
mod merge;
mod normalize;
mod overlap;
mod split;

pub use chunk::{keys, Chunk, Metadata};
pub use chunker::OverlapChunker;
pub use config::ChunkerConfig;
pub use error::{Error, Result};
pub use normalize::{decode_lossy, normalize};

/// A text chunking strategy.
///
/// Host pipelines program against this trait:
///
/// ```rust
/// use shingle::{Chunk, Chunker, Metadata, OverlapChunker};
///
/// fn ingest(chunker: &dyn Chunker, body: &str, post_id: u64) -> Vec<Chunk> {
///     let mut metadata = Metadata::new();
///     metadata.insert("post_id".into(), post_id.into());
///     chunker.split_text(body, &metadata)
/// }
///
/// let chunks = ingest(&OverlapChunker::default(), "Hello world.", 7);
/// assert_eq!(chunks[0].metadata["post_id"], 7);
/// ```
pub trait Chunker: Send + Sync {
    /// Split text into chunks, merging `metadata` into each one.
    ///
    /// Computed keys (see [`keys`]) take precedence over caller keys.
    fn split_text(&self, text: &str, metadata: &Metadata) -> Vec<Chunk>;

    /// Split raw bytes, replacing malformed UTF-8 instead of failing.
    fn split_bytes(&self, bytes: &[u8], metadata: &Metadata) -> Vec<Chunk> {
        self.split_text(&decode_lossy(bytes), metadata)
    }

    /// Estimate the number of chunks for a given text length.
    ///
    /// Useful for pre-allocation. May be approximate.
    fn estimate_chunks(&self, text_len: usize) -> usize {
        // Conservative default
        (text_len / 500).max(1)
    }
}
