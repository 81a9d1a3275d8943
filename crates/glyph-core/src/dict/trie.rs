use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DedupPolicy, DictEntry};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieNode {
    #[serde(default)]
    entries: Vec<DictEntry>,
    #[serde(default, rename = "next")]
    children: BTreeMap<String, TrieNode>,
}

impl TrieNode {
    /// Entries whose glyph string ends exactly at this node, in insertion order.
    pub fn entries(&self) -> &[DictEntry] {
        &self.entries
    }

    pub fn child(&self, glyph: &str) -> Option<&TrieNode> {
        self.children.get(glyph)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &TrieNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Child for `glyph`, inserting an empty node first if there is none.
    fn get_or_create_child(&mut self, glyph: &str) -> &mut TrieNode {
        self.children.entry(glyph.to_string()).or_default()
    }
}

/// Result of [`GlyphTrie::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The dedup policy rejected the entry. Nodes along the path still exist.
    Duplicate,
    /// The path was empty; the root never holds entries.
    EmptyPath,
}

/// Prefix tree over canonical glyphs.
///
/// Built once, then shared read-only: lookups take `&self` and the type is
/// `Send + Sync`, so any number of readers can query one trie concurrently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphTrie {
    root: TrieNode,
}

impl GlyphTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_children(children: BTreeMap<String, TrieNode>) -> Self {
        Self {
            root: TrieNode {
                entries: Vec::new(),
                children,
            },
        }
    }

    pub(crate) fn children_map(&self) -> &BTreeMap<String, TrieNode> {
        &self.root.children
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    /// Walk `path` from the root, creating missing nodes, and return the
    /// node at its end.
    pub fn get_or_create<S: AsRef<str>>(&mut self, path: &[S]) -> &mut TrieNode {
        let mut node = &mut self.root;
        for glyph in path {
            node = node.get_or_create_child(glyph.as_ref());
        }
        node
    }

    /// Append `entry` at the node for `path` unless `policy` rejects it.
    pub fn insert<S: AsRef<str>>(
        &mut self,
        path: &[S],
        entry: DictEntry,
        policy: DedupPolicy,
    ) -> InsertOutcome {
        if path.is_empty() {
            return InsertOutcome::EmptyPath;
        }
        let node = self.get_or_create(path);
        if policy.rejects(&node.entries, &entry) {
            return InsertOutcome::Duplicate;
        }
        node.entries.push(entry);
        InsertOutcome::Inserted
    }

    /// Node reached by following `path` exactly.
    pub fn node<S: AsRef<str>>(&self, path: &[S]) -> Option<&TrieNode> {
        path.iter()
            .try_fold(&self.root, |node, glyph| node.child(glyph.as_ref()))
    }

    /// Every entry whose glyph sequence is a prefix of `query`.
    ///
    /// Entries come grouped by prefix length, shortest first, each group in
    /// insertion order. The walk stops at the first glyph with no edge.
    pub fn lookup<I, S>(&self, query: I) -> Vec<&DictEntry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Vec::new();
        let mut node = &self.root;
        for glyph in query {
            let Some(next) = node.child(glyph.as_ref()) else {
                break;
            };
            result.extend(next.entries.iter());
            node = next;
        }
        result
    }

    /// [`lookup`](Self::lookup) over the characters of `text`.
    pub fn lookup_text(&self, text: &str) -> Vec<&DictEntry> {
        self.lookup(text.chars().map(String::from))
    }

    /// Longest matches first, the order a reader usually wants to see.
    pub fn lookup_longest_first(&self, text: &str) -> Vec<&DictEntry> {
        let mut entries = self.lookup_text(text);
        entries.reverse();
        entries
    }

    /// Returns (node_count, entry_count), not counting the root.
    pub fn stats(&self) -> (usize, usize) {
        let mut nodes = 0usize;
        let mut entries = 0usize;
        let mut stack: Vec<&TrieNode> = self.root.children.values().collect();
        while let Some(node) = stack.pop() {
            nodes += 1;
            entries += node.entries.len();
            stack.extend(node.children.values());
        }
        (nodes, entries)
    }

    /// Depth-first iteration over `(glyphs, entries)` for every node that
    /// holds entries, in key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self
                .root
                .children
                .iter()
                .rev()
                .map(|(k, v)| (k.clone(), v))
                .collect(),
        }
    }
}

pub struct Iter<'a> {
    stack: Vec<(String, &'a TrieNode)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (String, &'a [DictEntry]);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, node)) = self.stack.pop() {
            for (glyph, child) in node.children.iter().rev() {
                self.stack.push((format!("{path}{glyph}"), child));
            }
            if !node.entries.is_empty() {
                return Some((path, &node.entries));
            }
        }
        None
    }
}
