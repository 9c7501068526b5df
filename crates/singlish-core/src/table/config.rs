use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::TableError;

/// Schema version understood by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// Where a mapping entry may match inside a word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    Anywhere,
    /// Only when the match ends the word.
    WordFinal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub pattern: String,
    pub replacement: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub anchor: Anchor,
}

/// Expanded, validated table contents. This is also the compiled payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSource {
    pub revision: String,
    pub entries: Vec<MappingEntry>,
    pub words: BTreeMap<String, String>,
    pub foreign: BTreeSet<String>,
}

#[derive(Deserialize)]
struct TableFile {
    meta: Meta,
    #[serde(default)]
    mapping: Vec<MappingEntry>,
    #[serde(default)]
    vowel: Vec<Vowel>,
    #[serde(default)]
    consonant: Vec<Consonant>,
    #[serde(default)]
    words: BTreeMap<String, String>,
    #[serde(default)]
    foreign: Foreign,
}

#[derive(Deserialize)]
struct Meta {
    schema: u32,
    #[serde(default)]
    revision: String,
}

#[derive(Deserialize)]
struct Vowel {
    pattern: String,
    independent: String,
    sign: String,
    #[serde(default)]
    final_sign: Option<String>,
}

#[derive(Deserialize)]
struct Consonant {
    pattern: String,
    glyph: String,
}

#[derive(Default, Deserialize)]
struct Foreign {
    #[serde(default)]
    words: Vec<String>,
}

const AL_LAKUNA: char = '\u{0DCA}';

/// Parse table TOML and expand it into an ordered entry list.
///
/// Declaration order is explicit `[[mapping]]` entries, then independent
/// vowels, then per consonant: bare form, vowel combinations, word-final
/// combinations.
pub fn parse_table_toml(toml_str: &str) -> Result<TableSource, TableError> {
    let file: TableFile =
        toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;

    if file.meta.schema != SCHEMA_VERSION {
        return Err(TableError::UnsupportedSchema(file.meta.schema));
    }

    let mut entries = file.mapping;

    for v in &file.vowel {
        entries.push(MappingEntry {
            pattern: v.pattern.clone(),
            replacement: v.independent.clone(),
            priority: 0,
            anchor: Anchor::Anywhere,
        });
    }

    for c in &file.consonant {
        let mut bare = c.glyph.clone();
        bare.push(AL_LAKUNA);
        entries.push(MappingEntry {
            pattern: c.pattern.clone(),
            replacement: bare,
            priority: 0,
            anchor: Anchor::Anywhere,
        });
        for v in &file.vowel {
            entries.push(MappingEntry {
                pattern: format!("{}{}", c.pattern, v.pattern),
                replacement: format!("{}{}", c.glyph, v.sign),
                priority: 0,
                anchor: Anchor::Anywhere,
            });
        }
        for v in &file.vowel {
            if let Some(ref final_sign) = v.final_sign {
                entries.push(MappingEntry {
                    pattern: format!("{}{}", c.pattern, v.pattern),
                    replacement: format!("{}{}", c.glyph, final_sign),
                    priority: 0,
                    anchor: Anchor::WordFinal,
                });
            }
        }
    }

    let source = TableSource {
        revision: file.meta.revision,
        entries,
        words: file.words,
        foreign: file.foreign.words.into_iter().collect(),
    };
    validate(&source)?;
    Ok(source)
}

/// Check invariants shared by TOML and compiled tables.
pub fn validate(source: &TableSource) -> Result<(), TableError> {
    if source.entries.is_empty() {
        return Err(TableError::Empty);
    }
    for e in &source.entries {
        if e.pattern.is_empty() {
            return Err(TableError::EmptyPattern);
        }
        if !e.pattern.is_ascii() {
            return Err(TableError::NonAsciiPattern(e.pattern.clone()));
        }
        if e.replacement.is_empty() {
            return Err(TableError::EmptyReplacement(e.pattern.clone()));
        }
    }
    // Words are looked up after case folding, so keys must be lowercase.
    for (word, replacement) in &source.words {
        if word.is_empty()
            || !word.is_ascii()
            || word.bytes().any(|b| b.is_ascii_uppercase())
        {
            return Err(TableError::InvalidWord(word.clone()));
        }
        if replacement.is_empty() {
            return Err(TableError::EmptyReplacement(word.clone()));
        }
    }
    for word in &source.foreign {
        if word.is_empty() || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(TableError::InvalidWord(word.clone()));
        }
    }
    Ok(())
}
