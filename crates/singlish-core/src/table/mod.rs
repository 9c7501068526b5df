//! Singlish-to-Sinhala mapping table.
//!
//! Syllable patterns live in a double-array trie and are resolved by longest
//! match.
//! A whole-word lexicon covers irregular spellings. A foreign-word set lists
//! loanwords that stay in Latin script. The table is loaded once (embedded
//! TOML, custom TOML, or a compiled `SGTB` file) and never mutated.

mod config;
mod table_io;

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use lexime_trie::{DoubleArray, TrieSearch};
use tracing::debug;

pub use config::{parse_table_toml, Anchor, MappingEntry, TableSource, SCHEMA_VERSION};
pub use table_io::MAGIC;

pub const DEFAULT_TOML: &str = include_str!("default_table.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("unsupported table schema: {0}")]
    UnsupportedSchema(u32),
    #[error("mapping table is empty")]
    Empty,
    #[error("empty pattern")]
    EmptyPattern,
    #[error("non-ASCII pattern: {0}")]
    NonAsciiPattern(String),
    #[error("empty replacement for: {0}")]
    EmptyReplacement(String),
    #[error("invalid lexicon word: {0}")]
    InvalidWord(String),
    #[error("invalid header (too short)")]
    InvalidHeader,
    #[error("invalid magic bytes (expected SGTB)")]
    InvalidMagic,
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("payload checksum mismatch")]
    ChecksumMismatch,
    #[error("serialization error: {0}")]
    Serialize(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
    #[error("mapping table already initialized")]
    AlreadyInitialized,
}

/// Returns the embedded default table TOML.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// A resolved syllable match.
#[derive(Debug, Clone, Copy)]
pub struct PatternMatch<'t> {
    /// Matched byte length of the input.
    pub len: usize,
    pub index: usize,
    pub entry: &'t MappingEntry,
}

pub struct MappingTable {
    source: TableSource,
    trie: DoubleArray<u8>,
    /// Per trie value id: indices into `source.entries`, in declaration order.
    pattern_entries: Vec<Vec<u32>>,
    words: HashMap<String, String>,
    foreign: HashSet<String>,
}

impl MappingTable {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), TableError> {
        // Validate eagerly
        parse_table_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| TableError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static MappingTable {
        static INSTANCE: OnceLock<MappingTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let source = parse_table_toml(toml_str).expect("mapping table TOML must be valid");
            MappingTable::from_source(source)
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, TableError> {
        Ok(Self::from_source(parse_table_toml(toml_str)?))
    }

    pub fn from_source(source: TableSource) -> Self {
        // BTreeMap sorts and dedups patterns; DoubleArray build needs both
        let mut by_pattern: BTreeMap<&[u8], Vec<u32>> = BTreeMap::new();
        for (id, e) in source.entries.iter().enumerate() {
            by_pattern
                .entry(e.pattern.as_bytes())
                .or_default()
                .push(id as u32);
        }
        let keys: Vec<&[u8]> = by_pattern.keys().copied().collect();
        let trie = DoubleArray::<u8>::build(&keys);
        let pattern_entries: Vec<Vec<u32>> = by_pattern.into_values().collect();
        let words = source
            .words
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let foreign = source.foreign.iter().cloned().collect();
        debug!(
            entries = source.entries.len(),
            patterns = pattern_entries.len(),
            revision = %source.revision,
            "mapping table built"
        );
        Self {
            source,
            trie,
            pattern_entries,
            words,
            foreign,
        }
    }

    /// Load a table file, either TOML or compiled (detected by magic bytes).
    pub fn open(path: &Path) -> Result<Self, TableError> {
        let data = fs::read(path)?;
        if data.starts_with(table_io::MAGIC) {
            return Ok(Self::from_source(table_io::from_bytes(&data)?));
        }
        let text = String::from_utf8(data)
            .map_err(|e| TableError::Parse(format!("table is not UTF-8: {e}")))?;
        Self::from_toml(&text)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, TableError> {
        Ok(Self::from_source(table_io::from_bytes(data)?))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TableError> {
        table_io::to_bytes(&self.source)
    }

    /// Write the compiled form to `path`.
    pub fn save(&self, path: &Path) -> Result<(), TableError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn source(&self) -> &TableSource {
        &self.source
    }

    pub fn revision(&self) -> &str {
        &self.source.revision
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.source.entries
    }

    /// Whole-word lexicon lookup. `word` must already be case-folded.
    pub fn lookup_word(&self, word: &str) -> Option<&str> {
        self.words.get(word).map(|s| s.as_str())
    }

    pub fn is_foreign(&self, word: &str) -> bool {
        self.foreign.contains(word)
    }

    /// Longest pattern matching `word[start..]`.
    ///
    /// Shorter prefixes are tried when no entry at a longer length applies.
    /// Among entries sharing a pattern, a satisfied `WordFinal` anchor wins
    /// over `Anywhere`, then higher priority, then earlier declaration.
    pub fn longest_match(&self, word: &str, start: usize) -> Option<PatternMatch<'_>> {
        let rest = &word.as_bytes()[start..];
        let prefixes: Vec<_> = self.trie.common_prefix_search(rest).collect();
        for m in prefixes.into_iter().rev() {
            let len = m.len;
            let at_end = start + len == word.len();
            let best = self.pattern_entries[m.value_id as usize]
                .iter()
                .map(|&id| id as usize)
                .filter(|&id| at_end || self.source.entries[id].anchor == Anchor::Anywhere)
                .min_by_key(|&id| {
                    let e = &self.source.entries[id];
                    let anchor_rank = match e.anchor {
                        Anchor::WordFinal => 0u8,
                        Anchor::Anywhere => 1u8,
                    };
                    (anchor_rank, Reverse(e.priority), id)
                });
            if let Some(index) = best {
                return Some(PatternMatch {
                    len,
                    index,
                    entry: &self.source.entries[index],
                });
            }
        }
        None
    }
}
