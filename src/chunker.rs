//! The overlap chunker: normalize, split, merge, then inject overlap.
//!
//! ## Pipeline
//!
//! ```text
//! raw text
//!    │ normalize        line endings, whitespace runs, blank-line cap
//!    ▼
//! paragraphs            split on blank lines
//!    │ optimize         oversized paragraphs -> packed sentences
//!    ▼
//! pieces                each <= chunk_size (+1 for a joining space)
//!    │ merge            fold pieces below min_chunk_size into neighbors
//!    ▼
//! segments
//!    │ assemble         neighbor overlap + metadata
//!    ▼
//! chunks
//! ```
//!
//! Every pass is a pure function; the chunker holds nothing but its config.

use crate::chunk::{Chunk, Metadata};
use crate::split::{self, Piece};
use crate::{merge, normalize, overlap, Chunker, ChunkerConfig};

/// Paragraph- and sentence-aware chunker with neighbor overlap.
///
/// ## Example
///
/// ```rust
/// use shingle::{Chunker, ChunkerConfig, Metadata, OverlapChunker};
/// use serde_json::json;
///
/// let chunker = OverlapChunker::new(ChunkerConfig::new(60, 10, 30));
/// let text = "The first paragraph is long enough to stand on its own.\n\n\
///             The second one is as well, give or take a word or two.";
///
/// let mut metadata = Metadata::new();
/// metadata.insert("post_id".into(), json!(42));
///
/// let chunks = chunker.split_text(text, &metadata);
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].metadata["post_id"], 42);
/// assert!(chunks[0].content.ends_with("\nThe second"));
/// assert!(chunks[1].content.starts_with("n its own.\n"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapChunker {
    config: ChunkerConfig,
}

impl OverlapChunker {
    /// Create a chunker from a configuration.
    #[must_use]
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// The configuration this chunker was built with.
    #[must_use]
    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// The merged segments, before overlap is injected.
    ///
    /// Useful for storing overlap-free text alongside the chunks, or for
    /// checking that nothing was lost:
    ///
    /// ```rust
    /// use shingle::OverlapChunker;
    ///
    /// let chunker = OverlapChunker::default();
    /// let segments = chunker.segments("One.\n\n\n\nTwo.");
    /// assert_eq!(segments, ["One. Two."]);
    /// ```
    #[must_use]
    pub fn segments(&self, text: &str) -> Vec<String> {
        self.plan(text).into_iter().map(|p| p.text).collect()
    }

    fn plan(&self, text: &str) -> Vec<Piece> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            tracing::trace!("nothing to chunk after normalization");
            return Vec::new();
        }

        let paragraphs: Vec<&str> = split::paragraphs(&normalized).collect();
        tracing::trace!(paragraphs = paragraphs.len(), "split paragraphs");

        let pieces = split::optimize(paragraphs, self.config.chunk_size());
        tracing::trace!(pieces = pieces.len(), "optimized piece sizes");

        let segments = merge::merge_small(pieces, &self.config);
        tracing::trace!(segments = segments.len(), "merged small pieces");

        segments
    }
}

impl Chunker for OverlapChunker {
    fn split_text(&self, text: &str, metadata: &Metadata) -> Vec<Chunk> {
        let segments = self.plan(text);
        let chunks = overlap::assemble(&segments, metadata, &self.config);

        tracing::debug!(
            input_bytes = text.len(),
            segments = segments.len(),
            chunks = chunks.len(),
            chunk_size = self.config.chunk_size(),
            chunk_overlap = self.config.chunk_overlap(),
            min_chunk_size = self.config.min_chunk_size(),
            "split text"
        );

        chunks
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        if text_len == 0 {
            return 0;
        }
        text_len.div_ceil(self.config.chunk_size())
    }
}
