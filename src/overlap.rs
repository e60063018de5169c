//! Overlap injection and metadata assembly.
//!
//! ## How It Works
//!
//! ```text
//! overlap = 4
//!
//! segments:  "alpha beta"   "gamma delta"   "epsilon"
//!
//! chunk 0:   "alpha beta\ngamm"
//! chunk 1:   "beta\ngamma delta\nepsi"
//! chunk 2:   "elta\nepsilon"
//! ```
//!
//! Overlap is taken in characters, so a slice never starts or ends inside a
//! multi-byte character. If the result would exceed 1.5x `chunk_size` the
//! overlap is dropped and the bare segment is emitted instead.

use serde_json::Value;

use crate::chunk::{keys, Chunk, Metadata};
use crate::split::Piece;
use crate::ChunkerConfig;

/// The last `n` characters of `s` (all of `s` if shorter).
pub(crate) fn tail_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// The first `n` characters of `s` (all of `s` if shorter).
pub(crate) fn head_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

pub(crate) fn assemble(
    segments: &[Piece],
    metadata: &Metadata,
    config: &ChunkerConfig,
) -> Vec<Chunk> {
    let total = segments.len();
    let overlap = config.chunk_overlap();

    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let (prev, prev_chars) = match i.checked_sub(1).map(|p| &segments[p]) {
                Some(p) => (tail_chars(&p.text, overlap), overlap.min(p.chars)),
                None => ("", 0),
            };
            let (next, next_chars) = match segments.get(i + 1) {
                Some(n) => (head_chars(&n.text, overlap), overlap.min(n.chars)),
                None => ("", 0),
            };

            let mut content =
                String::with_capacity(prev.len() + segment.text.len() + next.len() + 2);
            let mut size = segment.chars;
            if !prev.is_empty() {
                content.push_str(prev);
                content.push('\n');
                size += prev_chars + 1;
            }
            content.push_str(&segment.text);
            if !next.is_empty() {
                content.push('\n');
                content.push_str(next);
                size += next_chars + 1;
            }

            if config.exceeds_overlay_budget(size) {
                tracing::trace!(
                    chunk_index = i,
                    size,
                    chunk_size = config.chunk_size(),
                    "overlap dropped, chunk over budget"
                );
                content.clone_from(&segment.text);
                size = segment.chars;
            }

            let mut meta = metadata.clone();
            meta.insert(keys::CHUNK_INDEX.into(), Value::from(i));
            meta.insert(keys::TOTAL_CHUNKS.into(), Value::from(total));
            meta.insert(keys::HAS_PREVIOUS.into(), Value::from(i > 0));
            meta.insert(keys::HAS_NEXT.into(), Value::from(i + 1 < total));
            meta.insert(keys::SIZE.into(), Value::from(size));
            meta.insert(keys::ORIGINAL_SIZE.into(), Value::from(segment.chars));
            meta.insert(keys::HAS_OVERLAP_PREV.into(), Value::from(!prev.is_empty()));
            meta.insert(keys::HAS_OVERLAP_NEXT.into(), Value::from(!next.is_empty()));

            Chunk::new(content, meta)
        })
        .collect()
}
