use serde::Serialize;

/// Why a record contributed nothing to the trie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "code", rename_all = "kebab-case")]
pub enum SkipReason {
    #[error("no sign codes")]
    EmptyGlyphs,

    #[error("missing {field} field")]
    MissingField { field: &'static str },

    #[error("unresolved sign code {token:?}")]
    UnresolvedGlyph { token: String },

    #[error("rejected as duplicate")]
    Duplicate,
}

impl SkipReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyGlyphs => "empty-glyphs",
            Self::MissingField { .. } => "missing-field",
            Self::UnresolvedGlyph { .. } => "unresolved-glyph",
            Self::Duplicate => "duplicate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipDiagnostic {
    /// Zero-based position of the record across all input.
    pub record: usize,
    /// The sign-code field as it appeared in the source.
    pub raw_glyphs: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub records: usize,
    pub inserted: usize,
    /// All skipped records, duplicates included.
    pub skipped: usize,
    pub duplicates: usize,
}
