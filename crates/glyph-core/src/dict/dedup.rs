use serde::{Deserialize, Serialize};

use super::DictEntry;

/// Duplicate check applied at a terminal node before a new entry is appended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupPolicy {
    /// Reject the candidate if some existing entry differs from it in
    /// transliteration, translation *and* glyphs at once.
    ///
    /// This is the behavior the published dataset was built with. All
    /// entries stored at one node share the same glyph string, so in practice
    /// this never rejects anything; exact repeats are kept.
    #[default]
    AllFieldsDiffer,
    /// Reject the candidate if an identical entry is already stored.
    ExactDuplicate,
    /// Append every entry.
    KeepAll,
}

impl DedupPolicy {
    pub fn rejects(self, existing: &[DictEntry], candidate: &DictEntry) -> bool {
        match self {
            Self::AllFieldsDiffer => existing.iter().any(|e| {
                e.translation != candidate.translation
                    && e.transliteration != candidate.transliteration
                    && e.glyphs != candidate.glyphs
            }),
            Self::ExactDuplicate => existing.iter().any(|e| e == candidate),
            Self::KeepAll => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllFieldsDiffer => "all-fields-differ",
            Self::ExactDuplicate => "exact-duplicate",
            Self::KeepAll => "keep-all",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "all-fields-differ" => Some(Self::AllFieldsDiffer),
            "exact-duplicate" => Some(Self::ExactDuplicate),
            "keep-all" => Some(Self::KeepAll),
            _ => None,
        }
    }
}
