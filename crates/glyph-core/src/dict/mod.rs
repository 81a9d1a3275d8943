//! Glyph trie storage.
//!
//! `GlyphTrie` maps sequences of canonical glyphs to dictionary entries. A
//! node reached through edges `g1..gk` holds exactly the entries whose glyph
//! string is `g1..gk`; a lookup collects entries along the walked path, so a
//! single traversal reports matches for every prefix of the query.

mod dedup;
mod entry;
#[cfg(test)]
mod tests;
mod trie;
mod trie_io;

pub use dedup::DedupPolicy;
pub use entry::DictEntry;
pub use trie::{GlyphTrie, InsertOutcome, Iter, TrieNode};
pub use trie_io::TrieFormat;

use std::io;

/// Error type for trie persistence (binary GLDX files and JSON trees).
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected GLDX)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error: {0}")]
    Parse(String),
}
