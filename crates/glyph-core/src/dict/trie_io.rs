use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use super::trie::{GlyphTrie, TrieNode};
use super::DictError;

const MAGIC: &[u8; 4] = b"GLDX";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 4 + 1 + 3 + 4 + 4; // magic + version + reserved + payload_len + crc32 = 16

/// On-disk representation of a [`GlyphTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieFormat {
    /// GLDX header followed by a bincode payload.
    Binary,
    /// The nested `{ glyph: { entries, next } }` JSON tree.
    Json,
}

impl TrieFormat {
    /// `.json` selects JSON; anything else is binary.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Binary,
        }
    }

    /// Guess the format from file contents.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(MAGIC) {
            return Some(Self::Binary);
        }
        match data.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Json => "json",
        }
    }
}

impl GlyphTrie {
    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let payload = bincode::serialize(self.children_map()).map_err(DictError::Serialize)?;
        let payload_len: u32 = payload
            .len()
            .try_into()
            .map_err(|_| DictError::Parse("payload exceeds u32::MAX".to_string()))?;
        let checksum = crc32fast::hash(&payload);

        let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&[0u8; 3]); // reserved
        buf.extend_from_slice(&payload_len.to_le_bytes());
        buf.extend_from_slice(&checksum.to_le_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        if data.len() < 5 {
            return Err(DictError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(DictError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(DictError::UnsupportedVersion(data[4]));
        }
        if data.len() < HEADER_SIZE {
            return Err(DictError::InvalidHeader);
        }

        let payload_len = read_u32(&data[8..12]) as usize;
        let expected_crc = read_u32(&data[12..16]);
        let payload = data
            .get(HEADER_SIZE..HEADER_SIZE + payload_len)
            .ok_or(DictError::InvalidHeader)?;

        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(DictError::ChecksumMismatch {
                expected: expected_crc,
                actual: actual_crc,
            });
        }

        let children: BTreeMap<String, TrieNode> =
            bincode::deserialize(payload).map_err(DictError::Deserialize)?;
        let trie = GlyphTrie::from_children(children);
        trie.check_paths()?;
        Ok(trie)
    }

    pub fn to_json(&self) -> Result<String, DictError> {
        Ok(serde_json::to_string_pretty(self.children_map())?)
    }

    pub fn from_json(json: &str) -> Result<Self, DictError> {
        Self::from_json_slice(json.as_bytes())
    }

    fn from_json_slice(data: &[u8]) -> Result<Self, DictError> {
        let children: BTreeMap<String, TrieNode> = serde_json::from_slice(data)?;
        let trie = GlyphTrie::from_children(children);
        trie.check_paths()?;
        Ok(trie)
    }

    pub fn encode(&self, format: TrieFormat) -> Result<Vec<u8>, DictError> {
        match format {
            TrieFormat::Binary => self.to_bytes(),
            TrieFormat::Json => Ok(self.to_json()?.into_bytes()),
        }
    }

    pub fn decode(data: &[u8]) -> Result<Self, DictError> {
        match TrieFormat::detect(data) {
            Some(TrieFormat::Binary) => Self::from_bytes(data),
            Some(TrieFormat::Json) => Self::from_json_slice(data),
            None if data.len() < 4 => Err(DictError::InvalidHeader),
            None => Err(DictError::InvalidMagic),
        }
    }

    /// Open a trie file in either format, detected from its contents.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(DictError::InvalidHeader);
        }
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // The Mmap is dropped after decoding completes below.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::decode(&mmap)
    }

    /// Write the trie to `path`.
    ///
    /// The data goes to a temporary sibling file first and is renamed into
    /// place, so a failed save never leaves a partial file at `path`.
    pub fn save(&self, path: &Path, format: TrieFormat) -> Result<(), DictError> {
        let bytes = self.encode(format)?;
        let tmp = tmp_path(path);
        if let Err(e) = fs::write(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    /// Every entry must sit at the node spelled by its glyph string.
    fn check_paths(&self) -> Result<(), DictError> {
        for (path, entries) in self.iter() {
            if let Some(bad) = entries.iter().find(|e| e.glyphs != path) {
                return Err(DictError::Parse(format!(
                    "entry with glyphs {:?} stored under {:?}",
                    bad.glyphs, path
                )));
            }
        }
        Ok(())
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(bytes);
    u32::from_le_bytes(word)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
