//! Merging undersized pieces into their neighbors.
//!
//! ```text
//! chunk_size = 100, min_chunk_size = 60
//!
//! pieces:  [30] [20] [70] [90] [10]
//!           \___/
//!          acc=51 (< 60, fits)  +[70] would be 121 > 100 -> emit [51]
//!                 acc=[70] >= 60                         -> emit [70]
//!                       acc=[90] >= 60                   -> emit [90]
//!                             acc=[10] < 60 at the end   -> 90 + 10 <= 100,
//!                                                           back-merge [101]
//! out:     [51] [70] [101]
//! ```
//!
//! Like packing, the joining space is not counted against `chunk_size`.
//! The back-merge at the end compares against `chunk_size`, not the 1.5x
//! overlay budget.

use crate::split::Piece;
use crate::ChunkerConfig;

pub(crate) fn merge_small(pieces: Vec<Piece>, config: &ChunkerConfig) -> Vec<Piece> {
    let chunk_size = config.chunk_size();
    let min_chunk_size = config.min_chunk_size();

    let mut merged = Vec::with_capacity(pieces.len());
    let mut acc = Piece::default();

    for piece in pieces {
        if !acc.is_empty() && acc.chars >= min_chunk_size {
            merged.push(std::mem::replace(&mut acc, piece));
        } else if acc.chars + piece.chars <= chunk_size {
            acc.join(&piece.text, piece.chars);
        } else {
            if !acc.is_empty() {
                merged.push(acc);
            }
            acc = piece;
        }
    }

    if acc.is_empty() {
        return merged;
    }

    if acc.chars < min_chunk_size {
        if let Some(mut last) = merged.pop() {
            if last.chars + acc.chars <= chunk_size {
                last.join(&acc.text, acc.chars);
                merged.push(last);
            } else {
                merged.push(last);
                merged.push(acc);
            }
            return merged;
        }
    }

    merged.push(acc);
    merged
}
