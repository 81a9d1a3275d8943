//! Read-only sign catalog grouped by category.
//!
//! The catalog is produced by an external scraper. Both the documented field
//! names (`symbol`, `code`, `unicodeValue`) and the scraper's own names
//! (`glyph`, `gardiner`, `unicode`) are accepted on load.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(default, alias = "glyph")]
    pub symbol: String,
    #[serde(alias = "gardiner")]
    pub code: String,
    #[serde(default, alias = "unicode")]
    pub unicode_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub transliteration: String,
    #[serde(default)]
    pub phonetic: String,
    #[serde(default)]
    pub notes: String,
}

impl CatalogEntry {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Category derived from the sign code, e.g. `"Aa"` for `"Aa15"`.
    pub fn category(&self) -> Option<&str> {
        category_key(&self.code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, alias = "glyphCategories")]
    categories: BTreeMap<String, String>,
    #[serde(default, alias = "glyphMap")]
    glyphs: BTreeMap<String, Vec<CatalogEntry>>,
}

impl Catalog {
    /// Group entries by the category of their code, keeping input order
    /// within each category. Entries whose code has no category are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut glyphs: BTreeMap<String, Vec<CatalogEntry>> = BTreeMap::new();
        for entry in entries {
            let Some(category) = entry.category() else {
                continue;
            };
            glyphs.entry(category.to_string()).or_default().push(entry);
        }
        Self {
            categories: BTreeMap::new(),
            glyphs,
        }
    }

    pub fn with_label(mut self, category: impl Into<String>, label: impl Into<String>) -> Self {
        self.categories.insert(category.into(), label.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let mut catalog: Catalog = serde_json::from_str(json)?;
        catalog.fill_symbols();
        Ok(catalog)
    }

    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Derive a missing symbol from its codepoint. Entries with neither stay
    /// in the catalog but never resolve.
    fn fill_symbols(&mut self) {
        for entry in self.glyphs.values_mut().flatten() {
            if !entry.symbol.is_empty() {
                continue;
            }
            match entry.hex.and_then(char::from_u32) {
                Some(ch) => entry.symbol = ch.to_string(),
                None => warn!(code = %entry.code, "catalog entry has no symbol and no valid codepoint"),
            }
        }
    }

    /// Entries filed under `category`, in catalog order.
    pub fn entries(&self, category: &str) -> &[CatalogEntry] {
        self.glyphs
            .get(category)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    /// Exact lookup of a sign code within its own category. Entries without a
    /// symbol are never returned.
    pub fn find(&self, code: &str) -> Option<&CatalogEntry> {
        let category = category_key(code)?;
        self.entries(category)
            .iter()
            .find(|e| e.code == code && !e.symbol.is_empty())
    }

    pub fn label(&self, category: &str) -> Option<&str> {
        self.categories.get(category).map(|s| s.as_str())
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.glyphs.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.glyphs.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Substring search over sign descriptions and readings.
    ///
    /// Queries shorter than two characters return nothing. The description is
    /// matched case-insensitively; transliteration, phonetic value and notes
    /// are matched against the lowercased query as-is.
    pub fn search(&self, text: &str) -> Vec<&CatalogEntry> {
        if text.chars().count() < 2 {
            return Vec::new();
        }
        let needle = text.to_lowercase();
        self.iter()
            .filter(|e| {
                e.description.to_lowercase().contains(&needle)
                    || e.transliteration.contains(&needle)
                    || e.phonetic.contains(&needle)
                    || e.notes.contains(&needle)
            })
            .collect()
    }
}

/// Leading run of uppercase ASCII letters, optionally followed by lowercase
/// ones: `"NL12"` → `"NL"`, `"Aa15"` → `"Aa"`, `"12"` → `None`.
pub fn category_key(code: &str) -> Option<&str> {
    let upper = code.bytes().take_while(u8::is_ascii_uppercase).count();
    if upper == 0 {
        return None;
    }
    let lower = code[upper..]
        .bytes()
        .take_while(u8::is_ascii_lowercase)
        .count();
    Some(&code[..upper + lower])
}
