//! End-to-end scenarios with hand-checked chunk layouts.

use serde_json::{json, Value};
use shingle::{Chunker, ChunkerConfig, Metadata, OverlapChunker};

// =============================================================================
// Fixtures
// =============================================================================

/// Prose-looking filler of exactly `n` characters, no sentence punctuation.
fn filler(n: usize) -> String {
    let mut s: String = "lorem ipsum dolor sit amet ".chars().cycle().take(n).collect();
    if s.ends_with(' ') {
        s.pop();
        s.push('x');
    }
    s
}

/// Sentence `i` of exactly 99 characters, ending in a period.
fn sentence(i: usize) -> String {
    let mut s = format!("Sentence {i:02}");
    while s.len() < 98 {
        s.push_str(" word");
    }
    s.truncate(98);
    s.push('.');
    s
}

fn metadata(value: Value) -> Metadata {
    match value {
        Value::Object(map) => map,
        _ => panic!("metadata fixture must be an object"),
    }
}

// =============================================================================
// Paragraph merging
// =============================================================================

#[test]
fn short_trailing_paragraph_merges_backward() {
    let p1 = filler(900);
    let p2 = filler(50);
    let text = format!("{p1}\n\n{p2}");

    let chunker = OverlapChunker::new(ChunkerConfig::new(1000, 200, 700));
    let chunks = chunker.split_text(&text, &Metadata::new());

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, format!("{p1} {p2}"));
    assert_eq!(chunks[0].original_size(), 951);
    assert_eq!(chunks[0].size(), 951);
    assert_eq!(chunks[0].metadata["has_overlap_prev"], false);
    assert_eq!(chunks[0].metadata["has_overlap_next"], false);
}

#[test]
fn short_trailing_paragraph_kept_when_too_big_to_merge() {
    let p1 = filler(980);
    let p2 = filler(50);
    let text = format!("{p1}\n\n{p2}");

    let chunker = OverlapChunker::new(ChunkerConfig::new(1000, 200, 700));
    let chunks = chunker.split_text(&text, &Metadata::new());

    assert_eq!(chunks.len(), 2);
    let originals: Vec<usize> = chunks.iter().map(|c| c.original_size()).collect();
    assert_eq!(originals, [980, 50]);
    assert_eq!(originals.iter().sum::<usize>(), 1030);

    // The whole short paragraph fits in the overlap
    assert_eq!(chunks[0].content, format!("{p1}\n{p2}"));
    assert_eq!(chunks[0].size(), 1031);

    let tail: String = p1.chars().skip(780).collect();
    assert_eq!(chunks[1].content, format!("{tail}\n{p2}"));
    assert_eq!(chunks[1].size(), 251);
    assert!(chunks[0].original_size() >= 700);
}

// =============================================================================
// Sentence splitting
// =============================================================================

#[test]
fn long_paragraph_split_on_sentences() {
    let text = (0..30).map(sentence).collect::<Vec<_>>().join(" ");
    assert_eq!(text.chars().count(), 2999);

    let chunker = OverlapChunker::default();
    let segments = chunker.segments(&text);
    let chunks = chunker.split_text(&text, &Metadata::new());

    assert!((3..=4).contains(&chunks.len()));
    assert_eq!(chunks.len(), 3);
    for (i, chunk) in chunks.iter().enumerate() {
        assert!(chunk.original_size() <= 1000);
        assert_eq!(chunk.original_size(), 999);
        assert!(segments[i].starts_with(&format!("Sentence {:02}", i * 10)));
        assert!(segments[i].ends_with('.'));
    }

    let flags: Vec<(bool, bool)> = chunks
        .iter()
        .map(|c| {
            (
                c.metadata["has_overlap_prev"] == true,
                c.metadata["has_overlap_next"] == true,
            )
        })
        .collect();
    assert_eq!(flags, [(false, true), (true, true), (true, false)]);

    let sizes: Vec<usize> = chunks.iter().map(|c| c.size()).collect();
    assert_eq!(sizes, [1200, 1401, 1200]);

    let prev_tail: String = segments[0].chars().skip(799).collect();
    assert!(chunks[1].content.starts_with(&format!("{prev_tail}\n")));
    let next_head: String = segments[2].chars().take(200).collect();
    assert!(chunks[1].content.ends_with(&format!("\n{next_head}")));
}

// =============================================================================
// Metadata
// =============================================================================

#[test]
fn caller_metadata_is_merged_and_computed_keys_win() {
    let text = format!("{}\n\n{}", filler(120), filler(120));
    let caller = metadata(json!({
        "post_id": 42,
        "source": "post",
        "size": "bogus",
        "chunk_index": -1,
    }));

    let chunker = OverlapChunker::new(ChunkerConfig::new(150, 20, 100));
    let chunks = chunker.split_text(&text, &caller);

    assert_eq!(chunks.len(), 2);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.metadata["post_id"], 42);
        assert_eq!(chunk.metadata["source"], "post");
        assert_eq!(chunk.metadata["chunk_index"], i);
        assert_eq!(chunk.metadata["total_chunks"], 2);
        assert_eq!(chunk.size(), chunk.content.chars().count());
    }
    assert_eq!(chunks[0].metadata["size"], 141);
}

#[test]
fn chunks_serialize_for_storage() {
    let chunker = OverlapChunker::default();
    let chunks = chunker.split_text("Stored as one row.", &metadata(json!({"post_id": 3})));

    let rows = serde_json::to_value(&chunks).unwrap();
    assert_eq!(
        rows,
        json!([{
            "content": "Stored as one row.",
            "metadata": {
                "post_id": 3,
                "chunk_index": 0,
                "total_chunks": 1,
                "has_previous": false,
                "has_next": false,
                "size": 18,
                "original_size": 18,
                "has_overlap_prev": false,
                "has_overlap_next": false,
            }
        }])
    );
}

// =============================================================================
// Multi-byte text
// =============================================================================

#[test]
fn multibyte_boundaries_and_sizes() {
    let paragraph = "日本語のテキストを分割する🦀とても大切な処理です";
    let paragraph_chars = paragraph.chars().count();
    let text = vec![paragraph; 6].join("\n\n");

    let config = ChunkerConfig::new(40, 10, 15);
    let chunker = OverlapChunker::new(config);
    let segments = chunker.segments(&text);
    let chunks = chunker.split_text(&text, &Metadata::new());

    assert_eq!(chunks.len(), 6);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.original_size(), paragraph_chars);
        assert_eq!(chunk.size(), chunk.content.chars().count());
        assert_ne!(chunk.size(), chunk.content.len());
        assert!(chunk.content.contains(segments[i].as_str()));
    }

    let tail: String = paragraph.chars().skip(paragraph_chars - 10).collect();
    let head: String = paragraph.chars().take(10).collect();
    assert_eq!(chunks[2].content, format!("{tail}\n{paragraph}\n{head}"));
}

#[test]
fn stacked_combining_marks_stay_within_budget() {
    // "a" under 40 combining acutes is one 41-code-point grapheme cluster
    let cluster = format!("a{}", "\u{301}".repeat(40));
    let text = format!("Hello there. {cluster} more words here.");
    let config = ChunkerConfig::new(20, 5, 10);
    let chunker = OverlapChunker::new(config);
    let chunks = chunker.split_text(&text, &Metadata::new());

    let sizes: Vec<usize> = chunks.iter().map(|c| c.original_size()).collect();
    assert_eq!(sizes, [12, 20, 20, 18]);
    for chunk in &chunks {
        assert!(
            !config.exceeds_overlay_budget(chunk.size()),
            "chunk {} of {} chars is over budget",
            chunk.index(),
            chunk.size()
        );
        assert_eq!(chunk.size(), chunk.content.chars().count());
    }

    let rejoined: String = chunker.segments(&text).concat();
    let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    assert_eq!(strip(&rejoined), strip(&text));
}

#[test]
fn windows_line_endings_and_tabs() {
    let text = "Title\r\n\r\n\r\n\r\nFirst\tline  here.\r\nSecond line.\r\n";
    let chunker = OverlapChunker::default();
    let chunks = chunker.split_text(text, &Metadata::new());

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "Title First line here.\nSecond line.");
}
