//! Lexical mapping of Singlish words to Sinhala script.
//!
//! A word is looked up in the lexicon first. On a miss, it is walked
//! left to right with longest-match syllable lookup. Positions with no
//! matching pattern copy one character through and mark the token.

use std::borrow::Cow;

use serde::Serialize;
use tracing::debug;

use crate::reassemble::WarningKind;
use crate::settings::MapperSettings;
use crate::table::MappingTable;
use crate::token::{Token, TokenKind};
use crate::unicode::{is_latin, is_sinhala};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    PassThrough,
    Lexicon,
    Syllables,
}

/// One step of the syllable walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Syllable {
    pub source: String,
    pub output: String,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedToken {
    pub output: String,
    pub route: Route,
    pub syllables: Vec<Syllable>,
    /// A character had no mapping and is not Sinhala script.
    pub unmapped: bool,
    /// Latin letters and Sinhala script in one token.
    pub mixed_script: bool,
}

impl MappedToken {
    fn pass_through(text: &str) -> Self {
        Self {
            output: text.to_string(),
            route: Route::PassThrough,
            syllables: Vec::new(),
            unmapped: false,
            mixed_script: false,
        }
    }

    pub fn warning_kinds(&self) -> Vec<WarningKind> {
        let mut kinds = Vec::new();
        if self.unmapped {
            kinds.push(WarningKind::UnmappedToken);
        }
        if self.mixed_script {
            kinds.push(WarningKind::MixedScript);
        }
        kinds
    }
}

pub struct Mapper<'t> {
    table: &'t MappingTable,
    fold_case: bool,
}

impl<'t> Mapper<'t> {
    pub fn new(table: &'t MappingTable, opts: &MapperSettings) -> Self {
        Self {
            table,
            fold_case: opts.fold_case,
        }
    }

    pub fn map_token(&self, token: &Token<'_>) -> MappedToken {
        if token.kind != TokenKind::SinglishWord {
            return MappedToken::pass_through(token.text);
        }

        let word: Cow<'_, str> = if self.fold_case {
            Cow::Owned(token.text.to_ascii_lowercase())
        } else {
            Cow::Borrowed(token.text)
        };

        if let Some(replacement) = self.table.lookup_word(&word) {
            debug!(word = %word, "lexicon hit");
            return MappedToken {
                output: replacement.to_string(),
                route: Route::Lexicon,
                syllables: Vec::new(),
                unmapped: false,
                mixed_script: false,
            };
        }

        self.map_syllables(token.text, &word)
    }

    /// `original` and `word` differ only in ASCII case, so byte offsets agree.
    fn map_syllables(&self, original: &str, word: &str) -> MappedToken {
        let mut output = String::with_capacity(word.len() * 3);
        let mut syllables: Vec<Syllable> = Vec::new();
        let mut any_match = false;
        let mut unmapped = false;
        let mut has_sinhala = false;

        let mut pos = 0;
        while pos < word.len() {
            if let Some(m) = self.table.longest_match(word, pos) {
                output.push_str(&m.entry.replacement);
                syllables.push(Syllable {
                    source: word[pos..pos + m.len].to_string(),
                    output: m.entry.replacement.clone(),
                    matched: true,
                });
                any_match = true;
                pos += m.len;
                continue;
            }

            let Some(c) = original[pos..].chars().next() else {
                break;
            };
            if is_sinhala(c) {
                has_sinhala = true;
            } else {
                unmapped = true;
            }
            output.push(c);
            match syllables.last_mut() {
                Some(last) if !last.matched => {
                    last.source.push(c);
                    last.output.push(c);
                }
                _ => syllables.push(Syllable {
                    source: c.to_string(),
                    output: c.to_string(),
                    matched: false,
                }),
            }
            pos += c.len_utf8();
        }

        let mixed_script = has_sinhala && original.chars().any(is_latin);

        if !any_match {
            // Nothing resolved: emit the token unchanged.
            return MappedToken {
                output: original.to_string(),
                route: Route::PassThrough,
                syllables: Vec::new(),
                unmapped,
                mixed_script,
            };
        }

        MappedToken {
            output,
            route: Route::Syllables,
            syllables,
            unmapped,
            mixed_script,
        }
    }
}
