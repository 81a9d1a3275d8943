//! Sign code → canonical glyph resolution.
//!
//! Codes in transcription sources are noisy: some carry a variant suffix the
//! catalog does not list (`"A1B"`), some were reclassified or mistyped
//! (`"O90A"`). Resolution tries, in order:
//!
//! 1. an exact match of the code within its category,
//! 2. the alias table's correction of the code,
//! 3. the code with its trailing letters stripped.
//!
//! Nothing else is attempted.

mod alias;

pub use alias::AliasTable;

use crate::catalog::{Catalog, CatalogEntry};

/// Which resolution step produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPath {
    Exact,
    Alias,
    Stripped,
}

impl ResolutionPath {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Alias => "alias",
            Self::Stripped => "stripped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub entry: &'a CatalogEntry,
    pub path: ResolutionPath,
}

impl<'a> Resolution<'a> {
    pub fn glyph(&self) -> &'a str {
        &self.entry.symbol
    }
}

#[derive(Clone, Copy)]
pub struct AliasResolver<'a> {
    catalog: &'a Catalog,
    aliases: &'a AliasTable,
}

impl<'a> AliasResolver<'a> {
    pub fn new(catalog: &'a Catalog, aliases: &'a AliasTable) -> Self {
        Self { catalog, aliases }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Canonical glyph for `code`, or `None` if no step matches.
    pub fn resolve(&self, code: &str) -> Option<&'a str> {
        self.resolve_traced(code).map(|r| r.glyph())
    }

    /// Like [`resolve`](Self::resolve), reporting the catalog entry and the
    /// step that matched.
    pub fn resolve_traced(&self, code: &str) -> Option<Resolution<'a>> {
        if let Some(entry) = self.catalog.find(code) {
            return Some(Resolution {
                entry,
                path: ResolutionPath::Exact,
            });
        }

        if let Some(entry) = self.aliases.get(code).and_then(|c| self.catalog.find(c)) {
            return Some(Resolution {
                entry,
                path: ResolutionPath::Alias,
            });
        }

        let stripped = strip_variant_suffix(code);
        if stripped.len() < code.len() {
            if let Some(entry) = self.catalog.find(stripped) {
                return Some(Resolution {
                    entry,
                    path: ResolutionPath::Stripped,
                });
            }
        }

        None
    }
}

/// Drop a trailing run of ASCII letters: `"O90A"` → `"O90"`, `"Aa"` → `""`.
pub fn strip_variant_suffix(code: &str) -> &str {
    code.trim_end_matches(|c: char| c.is_ascii_alphabetic())
}
