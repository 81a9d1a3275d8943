use serde::{Deserialize, Serialize};

/// One dictionary word: its reading, its meaning and the canonical glyphs it
/// is written with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DictEntry {
    pub transliteration: String,
    pub translation: String,
    pub glyphs: String,
}

impl DictEntry {
    pub fn new(
        glyphs: impl Into<String>,
        transliteration: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            transliteration: transliteration.into(),
            translation: translation.into(),
            glyphs: glyphs.into(),
        }
    }
}
