//! Paragraph splitting and size optimization.
//!
//! ## The Algorithm
//!
//! ```text
//! 1. Split normalized text on blank lines (paragraphs)
//! 2. Paragraphs <= chunk_size pass through untouched
//! 3. Longer paragraphs are split after ". ", "! ", "? " (sentences)
//!    and the sentences are greedily packed back up to chunk_size
//! 4. A sentence that alone exceeds chunk_size is packed along word
//!    boundaries first; a word that alone exceeds it is cut between
//!    grapheme clusters, and a cluster that alone exceeds it between
//!    code points
//! ```
//!
//! Packing is greedy: keep appending while `buffer + next <= chunk_size`,
//! then flush. The joining space is not counted, so a packed piece can be one
//! character over `chunk_size`.
//!
//! Sentence detection here is deliberately plain punctuation-plus-whitespace.
//! "Dr. Smith" splits after "Dr." and that is fine: sentences only matter as
//! candidate cut points, and packing glues short ones back together.

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

/// Text with a cached character count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Piece {
    pub(crate) text: String,
    pub(crate) chars: usize,
}

impl Piece {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().count();
        Self { text, chars }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append `text` (of `chars` characters), space-joined unless empty.
    pub(crate) fn join(&mut self, text: &str, chars: usize) {
        if !self.text.is_empty() {
            self.text.push(' ');
            self.chars += 1;
        }
        self.text.push_str(text);
        self.chars += chars;
    }
}

/// Trimmed, non-empty paragraphs of normalized text.
pub(crate) fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

/// Sentences of a paragraph, terminal punctuation kept.
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(text) {
        // The punctuation is a single ASCII byte
        let end = m.start() + 1;
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            out.push(sentence);
        }
        start = m.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        out.push(rest);
    }

    out
}

/// Bring every paragraph within `chunk_size`, splitting the ones that aren't.
pub(crate) fn optimize<'a>(
    paragraphs: impl IntoIterator<Item = &'a str>,
    chunk_size: usize,
) -> Vec<Piece> {
    let mut out = Vec::new();

    for paragraph in paragraphs {
        let piece = Piece::new(paragraph);
        if piece.chars <= chunk_size {
            out.push(piece);
        } else {
            pack_sentences(paragraph, chunk_size, &mut out);
        }
    }

    out
}

fn pack_sentences(paragraph: &str, chunk_size: usize, out: &mut Vec<Piece>) {
    let mut buffer = Piece::default();

    for sentence in sentences(paragraph) {
        let chars = sentence.chars().count();
        if chars <= chunk_size {
            push_greedy(&mut buffer, sentence, chars, chunk_size, out);
        } else {
            for part in split_oversized(sentence, chunk_size) {
                push_greedy(&mut buffer, &part.text, part.chars, chunk_size, out);
            }
        }
    }

    if !buffer.is_empty() {
        out.push(buffer);
    }
}

fn push_greedy(
    buffer: &mut Piece,
    text: &str,
    chars: usize,
    chunk_size: usize,
    out: &mut Vec<Piece>,
) {
    if !buffer.is_empty() && buffer.chars + chars > chunk_size {
        out.push(std::mem::take(buffer));
    }
    buffer.join(text, chars);
}

/// Break a sentence longer than `chunk_size` into pieces of at most
/// `chunk_size` characters.
///
/// Cuts fall on UAX #29 word boundaries, which also gives sane cut points
/// in scripts written without spaces. A single word longer than
/// `chunk_size` is cut between grapheme clusters, so an emoji sequence or a
/// letter with combining marks stays whole. The one exception is a cluster
/// that is itself longer than `chunk_size` (a base letter buried under
/// dozens of combining marks); it is cut between code points.
fn split_oversized(sentence: &str, chunk_size: usize) -> Vec<Piece> {
    let mut out = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0;

    let mut flush = |buffer: &mut String, buffer_chars: &mut usize| {
        let trimmed = buffer.trim();
        if !trimmed.is_empty() {
            out.push(Piece::new(trimmed));
        }
        buffer.clear();
        *buffer_chars = 0;
    };

    for word in sentence.split_word_bounds() {
        let chars = word.chars().count();

        if chars > chunk_size {
            for grapheme in word.graphemes(true) {
                let g_chars = grapheme.chars().count();
                if g_chars <= chunk_size {
                    if buffer_chars > 0 && buffer_chars + g_chars > chunk_size {
                        flush(&mut buffer, &mut buffer_chars);
                    }
                    buffer.push_str(grapheme);
                    buffer_chars += g_chars;
                    continue;
                }

                // Cluster longer than a whole chunk: cut between code points
                for c in grapheme.chars() {
                    if buffer_chars >= chunk_size {
                        flush(&mut buffer, &mut buffer_chars);
                    }
                    buffer.push(c);
                    buffer_chars += 1;
                }
            }
            continue;
        }

        if buffer_chars > 0 && buffer_chars + chars > chunk_size {
            flush(&mut buffer, &mut buffer_chars);
        }
        if buffer_chars == 0 && word.trim().is_empty() {
            continue;
        }
        buffer.push_str(word);
        buffer_chars += chars;
    }
    flush(&mut buffer, &mut buffer_chars);

    out
}
