//! Basic Overlap Chunking
//!
//! Chunk a document and print each chunk as a JSON record, the shape a
//! host would store one row per chunk.
//!
//! ```bash
//! cargo run --example basic_chunking
//! ```

use serde_json::json;
use shingle::{Chunker, ChunkerConfig, Metadata, OverlapChunker};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let document = "Machine learning models learn patterns from data. \
        They generalize these patterns to make predictions. \
        This is fundamentally different from traditional programming.\n\n\
        Deep learning extends this with multiple hidden layers. \
        Each layer learns increasingly abstract representations. \
        Early layers pick up edges and textures; later layers pick up objects.\n\n\
        Retrieval pipelines embed chunks of text and search them by similarity.";

    // Small sizes so the demo produces several chunks
    let chunker = OverlapChunker::new(ChunkerConfig::new(160, 40, 100));

    let mut metadata = Metadata::new();
    metadata.insert("post_id".into(), json!(1));
    metadata.insert("source".into(), json!("demo"));

    let chunks = chunker.split_text(document, &metadata);

    println!("Document: {} chars", document.chars().count());
    println!("Chunks: {}\n", chunks.len());

    for chunk in &chunks {
        println!("{chunk}");
        match serde_json::to_string_pretty(chunk) {
            Ok(row) => println!("{row}\n"),
            Err(e) => eprintln!("failed to serialize chunk: {e}"),
        }
    }
}
