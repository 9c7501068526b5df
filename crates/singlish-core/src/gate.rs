//! Quality gate: disruption signals over the token stream.
//!
//! Conversion is never refused. The gate only attaches warnings to the
//! tokens that carry a signal.

use tracing::debug;

use crate::mapper::{MappedToken, Route};
use crate::reassemble::{Warning, WarningKind};
use crate::settings::GateSettings;
use crate::token::{Token, TokenKind};

pub fn inspect(tokens: &[Token<'_>], mapped: &[MappedToken], opts: &GateSettings) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let mut push = |token_index: usize, kind: WarningKind| {
        warnings.push(Warning { token_index, kind });
    };

    if symbol_density(tokens) >= opts.symbol_density_threshold {
        for (i, t) in tokens.iter().enumerate() {
            if t.flags.disrupting {
                push(i, WarningKind::SymbolDisruption);
            }
        }
    }

    let all_caps = is_all_caps(tokens, opts.case_anomaly_min_letters);

    for (i, t) in tokens.iter().enumerate() {
        if t.kind == TokenKind::Emoji {
            push(i, WarningKind::EmojiDisruption);
        }
        if t.flags.ambiguous {
            push(i, WarningKind::DigitSubstitution);
        }
        if !t.kind.is_word() {
            continue;
        }
        if longest_letter_run(t.text) >= opts.repetition_min_run {
            push(i, WarningKind::RepetitionDistortion);
        }
        if all_caps && t.text.chars().any(|c| c.is_ascii_alphabetic()) {
            push(i, WarningKind::CaseAnomaly);
        }
        let from_lexicon = mapped.get(i).is_some_and(|m| m.route == Route::Lexicon);
        if t.kind == TokenKind::SinglishWord
            && !from_lexicon
            && t.char_count() >= opts.joined_word_min_len
        {
            push(i, WarningKind::JoinedWordAmbiguity);
        }
    }

    debug!(warning_count = warnings.len());
    warnings
}

/// Disrupting chars over non-whitespace chars; 0.0 for blank input.
pub fn symbol_density(tokens: &[Token<'_>]) -> f64 {
    let (disrupting, total) = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Whitespace)
        .fold((0usize, 0usize), |(d, n), t| {
            let len = t.char_count();
            (d + if t.flags.disrupting { len } else { 0 }, n + len)
        });
    if total == 0 {
        0.0
    } else {
        disrupting as f64 / total as f64
    }
}

/// Longest run of one letter, ignoring ASCII case.
fn longest_letter_run(text: &str) -> usize {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<char> = None;
    for c in text.chars().map(|c| c.to_ascii_lowercase()) {
        if !c.is_alphabetic() {
            prev = None;
            run = 0;
            continue;
        }
        run = if prev == Some(c) { run + 1 } else { 1 };
        prev = Some(c);
        best = best.max(run);
    }
    best
}

fn is_all_caps(tokens: &[Token<'_>], min_letters: usize) -> bool {
    let mut letters = 0;
    for t in tokens.iter().filter(|t| t.kind.is_word()) {
        for c in t.text.chars().filter(|c| c.is_ascii_alphabetic()) {
            if c.is_ascii_lowercase() {
                return false;
            }
            letters += 1;
        }
    }
    letters >= min_letters
}
