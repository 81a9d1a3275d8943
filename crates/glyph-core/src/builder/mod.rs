//! Dictionary build: sign-code normalization, resolution and trie insertion.
//!
//! Records that cannot be fully resolved are skipped, never fatal. Every skip
//! is reported as a [`SkipDiagnostic`] in input order alongside the finished
//! trie.

mod diagnostics;

pub use diagnostics::{BuildStats, SkipDiagnostic, SkipReason};

use std::collections::BTreeMap;

use tracing::{debug, debug_span, info};

use crate::catalog::{category_key, Catalog};
use crate::dict::{DedupPolicy, DictEntry, GlyphTrie, InsertOutcome};
use crate::resolver::AliasResolver;
use crate::settings::Settings;

/// One parsed source row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Delimited sign codes, e.g. `"G17-D36 - N35"`.
    pub glyphs: String,
    pub transliteration: String,
    pub translation: String,
}

impl RawRecord {
    pub fn new(
        glyphs: impl Into<String>,
        transliteration: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            glyphs: glyphs.into(),
            transliteration: transliteration.into(),
            translation: translation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub trie: GlyphTrie,
    pub diagnostics: Vec<SkipDiagnostic>,
    pub stats: BuildStats,
}

/// Incremental trie builder.
///
/// Feed records with [`push`](Self::push) in a fixed order (all files, one
/// after another), then call [`finish`](Self::finish). The same records in the
/// same order always produce the same trie.
pub struct DictionaryBuilder<'a> {
    resolver: AliasResolver<'a>,
    delimiter: &'a str,
    category_remap: &'a BTreeMap<String, String>,
    policy: DedupPolicy,
    trie: GlyphTrie,
    diagnostics: Vec<SkipDiagnostic>,
    stats: BuildStats,
}

impl<'a> DictionaryBuilder<'a> {
    pub fn new(catalog: &'a Catalog, settings: &'a Settings) -> Self {
        Self {
            resolver: AliasResolver::new(catalog, settings.aliases()),
            delimiter: &settings.build.delimiter,
            category_remap: &settings.category_remap,
            policy: settings.build.dedup,
            trie: GlyphTrie::new(),
            diagnostics: Vec::new(),
            stats: BuildStats::default(),
        }
    }

    pub fn with_policy(mut self, policy: DedupPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// One-shot build over `records`.
    pub fn build(
        catalog: &'a Catalog,
        settings: &'a Settings,
        records: impl IntoIterator<Item = RawRecord>,
    ) -> BuildOutput {
        let mut builder = Self::new(catalog, settings);
        builder.extend(records);
        builder.finish()
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = RawRecord>) {
        let _span = debug_span!("build_records", policy = self.policy.as_str()).entered();
        for record in records {
            self.push(record);
        }
    }

    pub fn push(&mut self, record: RawRecord) {
        let ordinal = self.stats.records;
        self.stats.records += 1;

        let codes = normalize_codes(&record.glyphs, self.delimiter, self.category_remap);
        if codes.is_empty() {
            self.skip(ordinal, record.glyphs, SkipReason::EmptyGlyphs);
            return;
        }

        let mut path: Vec<&'a str> = Vec::with_capacity(codes.len());
        for code in &codes {
            match self.resolver.resolve(code) {
                Some(glyph) => path.push(glyph),
                None => {
                    let reason = SkipReason::UnresolvedGlyph {
                        token: code.clone(),
                    };
                    self.skip(ordinal, record.glyphs, reason);
                    return;
                }
            }
        }

        let entry = DictEntry {
            glyphs: path.concat(),
            transliteration: record.transliteration,
            translation: record.translation,
        };
        match self.trie.insert(&path, entry, self.policy) {
            InsertOutcome::Inserted => self.stats.inserted += 1,
            InsertOutcome::Duplicate => {
                self.stats.duplicates += 1;
                self.skip(ordinal, record.glyphs, SkipReason::Duplicate);
            }
            // Unreachable: `codes` is non-empty, so `path` is too.
            InsertOutcome::EmptyPath => {
                self.skip(ordinal, record.glyphs, SkipReason::EmptyGlyphs);
            }
        }
    }

    /// Count a row the ingestion layer could not turn into a [`RawRecord`].
    pub fn skip_malformed(&mut self, raw_glyphs: impl Into<String>, field: &'static str) {
        let ordinal = self.stats.records;
        self.stats.records += 1;
        self.skip(ordinal, raw_glyphs.into(), SkipReason::MissingField { field });
    }

    fn skip(&mut self, record: usize, raw_glyphs: String, reason: SkipReason) {
        debug!(record, glyphs = %raw_glyphs, reason = reason.code(), "skipping record: {reason}");
        self.stats.skipped += 1;
        self.diagnostics.push(SkipDiagnostic {
            record,
            raw_glyphs,
            reason,
        });
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn finish(self) -> BuildOutput {
        let (nodes, entries) = self.trie.stats();
        info!(
            records = self.stats.records,
            inserted = self.stats.inserted,
            skipped = self.stats.skipped,
            duplicates = self.stats.duplicates,
            nodes,
            entries,
            "dictionary build finished"
        );
        BuildOutput {
            trie: self.trie,
            diagnostics: self.diagnostics,
            stats: self.stats,
        }
    }
}

/// Split a sign-code field into codes.
///
/// All whitespace is removed before splitting on `delimiter`, and codes whose
/// category appears in `category_remap` are rewritten to the new category
/// (`J12` → `Aa12`). An empty or all-whitespace field yields no codes.
pub fn normalize_codes(
    field: &str,
    delimiter: &str,
    category_remap: &BTreeMap<String, String>,
) -> Vec<String> {
    let compact: String = field.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Vec::new();
    }
    compact
        .split(delimiter)
        .map(|code| remap_category(code, category_remap))
        .collect()
}

fn remap_category(code: &str, category_remap: &BTreeMap<String, String>) -> String {
    let Some(category) = category_key(code) else {
        return code.to_string();
    };
    match category_remap.get(category) {
        Some(target) => format!("{target}{}", &code[category.len()..]),
        None => code.to_string(),
    }
}
