//! Reassembly of per-token outputs into a `ConversionResult`.

use std::fmt;

use serde::Serialize;

use crate::mapper::MappedToken;

/// Non-fatal degradation categories, in reporting order within a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    UnmappedToken,
    SymbolDisruption,
    EmojiDisruption,
    RepetitionDistortion,
    DigitSubstitution,
    CaseAnomaly,
    JoinedWordAmbiguity,
    MixedScript,
}

impl WarningKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WarningKind::UnmappedToken => "unmapped_token",
            WarningKind::SymbolDisruption => "symbol_disruption",
            WarningKind::EmojiDisruption => "emoji_disruption",
            WarningKind::RepetitionDistortion => "repetition_distortion",
            WarningKind::DigitSubstitution => "digit_substitution",
            WarningKind::CaseAnomaly => "case_anomaly",
            WarningKind::JoinedWordAmbiguity => "joined_word_ambiguity",
            WarningKind::MixedScript => "mixed_script",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        ALL_WARNING_KINDS.into_iter().find(|k| k.as_str() == s)
    }
}

pub const ALL_WARNING_KINDS: [WarningKind; 8] = [
    WarningKind::UnmappedToken,
    WarningKind::SymbolDisruption,
    WarningKind::EmojiDisruption,
    WarningKind::RepetitionDistortion,
    WarningKind::DigitSubstitution,
    WarningKind::CaseAnomaly,
    WarningKind::JoinedWordAmbiguity,
    WarningKind::MixedScript,
];

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Warning {
    pub token_index: usize,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub output: String,
    pub warnings: Vec<Warning>,
}

impl ConversionResult {
    pub fn has(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Distinct warning kinds, in taxonomy order.
    pub fn kinds(&self) -> Vec<WarningKind> {
        let mut kinds: Vec<WarningKind> = self.warnings.iter().map(|w| w.kind).collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

/// Concatenate outputs in token order; warnings are sorted by token index
/// and deduplicated per `(token_index, kind)`.
pub fn reassemble(mapped: &[MappedToken], mut warnings: Vec<Warning>) -> ConversionResult {
    let output: String = mapped.iter().map(|m| m.output.as_str()).collect();
    warnings.sort();
    warnings.dedup();
    ConversionResult { output, warnings }
}
