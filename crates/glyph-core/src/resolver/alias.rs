use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fixed corrections for sign codes that are malformed or were reclassified,
/// e.g. `O90A` → `O8`. Immutable once built; handed to the resolver by the
/// caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    map: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn new(map: BTreeMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.map.get(code).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
