
use super::{DedupPolicy, DictEntry, GlyphTrie};

/// 𓀀 = A1, 𓁐 = B1, 𓅓 = G20, 𓉐 = O8.
pub(super) fn sample_trie() -> GlyphTrie {
    let mut trie = GlyphTrie::new();
    let words: &[(&[&str], &str, &str)] = &[
        (&["𓀀"], "s", "man"),
        (&["𓀀", "𓁐"], "s.t", "couple"),
        (&["𓀀", "𓁐", "𓅓"], "s.t.m", "family"),
        (&["𓀀"], "z", "person"),
        (&["𓉐"], "pr", "house"),
        (&["𓉐", "𓀀"], "pr.s", "householder"),
    ];
    for (glyphs, tr, meaning) in words {
        trie.insert(
            *glyphs,
            DictEntry::new(glyphs.concat(), *tr, *meaning),
            DedupPolicy::KeepAll,
        );
    }
    trie
}

pub(super) fn translations<'a>(entries: &[&'a DictEntry]) -> Vec<&'a str> {
    entries.iter().map(|e| e.translation.as_str()).collect()
}
