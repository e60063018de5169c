//! The Chunk type: a piece of text ready for embedding, with its metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied metadata, merged into every chunk.
pub type Metadata = Map<String, Value>;

/// Metadata keys computed by the chunker.
///
/// These override caller metadata with the same name.
pub mod keys {
    /// Zero-based position of the chunk.
    pub const CHUNK_INDEX: &str = "chunk_index";
    /// Number of chunks produced from the document.
    pub const TOTAL_CHUNKS: &str = "total_chunks";
    /// Whether a chunk precedes this one.
    pub const HAS_PREVIOUS: &str = "has_previous";
    /// Whether a chunk follows this one.
    pub const HAS_NEXT: &str = "has_next";
    /// Characters in the final content, overlap included.
    pub const SIZE: &str = "size";
    /// Characters in the chunk before overlap was added.
    pub const ORIGINAL_SIZE: &str = "original_size";
    /// Whether trailing text of the previous chunk was available as overlap.
    pub const HAS_OVERLAP_PREV: &str = "has_overlap_prev";
    /// Whether leading text of the next chunk was available as overlap.
    pub const HAS_OVERLAP_NEXT: &str = "has_overlap_next";
}

/// A chunk of text plus positional metadata.
///
/// `content` already includes whatever neighbor text was injected as overlap:
///
/// ```text
/// Chunk 1 content:
///   "...tail of chunk 0\n"      <- prev overlap
///   "Text of chunk 1."          <- original_size counts only this part
///   "\nHead of chunk 2..."      <- next overlap
/// ```
///
/// Persist chunks ordered by [`Chunk::index`]. All sizes are code point
/// counts:
///
/// ```rust
/// use shingle::{Chunker, Metadata, OverlapChunker};
///
/// let chunker = OverlapChunker::default();
/// let chunks = chunker.split_text("日本語のテキスト。", &Metadata::new());
///
/// assert_eq!(chunks[0].size(), 9);
/// assert_eq!(chunks[0].content.len(), 27); // bytes
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// The chunk text, overlap included.
    pub content: String,
    /// Caller metadata merged with the computed keys in [`keys`].
    pub metadata: Metadata,
}

impl Chunk {
    /// Create a chunk from content and fully assembled metadata.
    #[must_use]
    pub fn new(content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    fn usize_key(&self, key: &str) -> usize {
        self.metadata
            .get(key)
            .and_then(Value::as_u64)
            .map_or(0, |v| v as usize)
    }

    fn bool_key(&self, key: &str) -> bool {
        self.metadata
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Zero-based position of this chunk.
    #[must_use]
    pub fn index(&self) -> usize {
        self.usize_key(keys::CHUNK_INDEX)
    }

    /// Number of chunks in the sequence this chunk belongs to.
    #[must_use]
    pub fn total(&self) -> usize {
        self.usize_key(keys::TOTAL_CHUNKS)
    }

    /// Character count of [`Chunk::content`].
    #[must_use]
    pub fn size(&self) -> usize {
        self.usize_key(keys::SIZE)
    }

    /// Character count before overlap injection.
    #[must_use]
    pub fn original_size(&self) -> usize {
        self.usize_key(keys::ORIGINAL_SIZE)
    }

    /// Whether a chunk precedes this one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.bool_key(keys::HAS_PREVIOUS)
    }

    /// Whether a chunk follows this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.bool_key(keys::HAS_NEXT)
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ index: {}/{}, size: {}, original_size: {} }}",
            self.index(),
            self.total(),
            self.size(),
            self.original_size()
        )
    }
}
