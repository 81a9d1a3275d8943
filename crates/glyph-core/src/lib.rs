//! Hieroglyph dictionary core.
//!
//! Resolves textual sign codes against a [`catalog::Catalog`], builds a
//! [`dict::GlyphTrie`] from transcription records and answers prefix lookups
//! over sequences of canonical glyphs.

pub mod builder;
pub mod catalog;
pub mod dict;
pub mod resolver;
pub mod settings;
