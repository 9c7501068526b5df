use tracing::{debug, debug_span};

use crate::settings::TokenizerSettings;
use crate::table::MappingTable;
use crate::unicode::{is_emoji, is_emoji_component, is_punctuation, is_word_char};

use super::{Span, SymbolClass, Token, TokenFlags, TokenKind};

const URL_PREFIXES: [&str; 3] = ["http://", "https://", "www."];

/// Split `input` into classified tokens whose spans cover it exactly.
///
/// The table is consulted only to recognize foreign words.
pub fn tokenize<'a>(
    input: &'a str,
    table: &MappingTable,
    opts: &TokenizerSettings,
) -> Vec<Token<'a>> {
    let _span = debug_span!("tokenize", input_len = input.len()).entered();

    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let byte_at = |idx: usize| chars.get(idx).map_or(input.len(), |&(b, _)| b);

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i].1;
        let chunk_start = i == 0 || chars[i - 1].1.is_whitespace();

        let (end, kind, flags) = if c.is_whitespace() {
            let end = scan_while(&chars, i, |c| c.is_whitespace());
            (end, TokenKind::Whitespace, TokenFlags::default())
        } else if let Some(end) = chunk_start
            .then(|| scan_url(input, &chars, i))
            .flatten()
        {
            (end, TokenKind::Symbol, disrupting(SymbolClass::Url))
        } else if let Some(end) = chunk_start
            .then(|| scan_email(input, &chars, i))
            .flatten()
        {
            (end, TokenKind::Symbol, disrupting(SymbolClass::Email))
        } else if c == '#' && chars.get(i + 1).is_some_and(|&(_, n)| n.is_alphanumeric()) {
            let end = scan_while(&chars, i + 1, is_word_char);
            (end, TokenKind::Symbol, disrupting(SymbolClass::Hashtag))
        } else if is_emoji(c) {
            let end = scan_while(&chars, i, |c| is_emoji(c) || is_emoji_component(c));
            (end, TokenKind::Emoji, TokenFlags::default())
        } else if is_word_char(c) {
            classify_word(input, &chars, i, table)
        } else if is_punctuation(c) {
            let end = scan_while(&chars, i, |x| x == c);
            let run = end - i;
            let ellipsis = c == '.' && run == 3;
            let flags = if run >= opts.punctuation_run_min && !ellipsis {
                disrupting(SymbolClass::Cluster)
            } else {
                TokenFlags::default()
            };
            (end, TokenKind::Punctuation, flags)
        } else {
            let end = scan_while(&chars, i, |x| x == c);
            (end, TokenKind::Symbol, disrupting(SymbolClass::Other))
        };

        let start = byte_at(i);
        let stop = byte_at(end);
        tokens.push(Token {
            text: &input[start..stop],
            kind,
            span: Span {
                start,
                len: stop - start,
            },
            flags,
        });
        i = end;
    }

    debug!(token_count = tokens.len());
    tokens
}

fn disrupting(class: SymbolClass) -> TokenFlags {
    TokenFlags {
        disrupting: true,
        ambiguous: false,
        symbol: Some(class),
    }
}

/// Index of the first char at or after `from` that fails `pred`.
fn scan_while(chars: &[(usize, char)], from: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut j = from;
    while j < chars.len() && pred(chars[j].1) {
        j += 1;
    }
    j
}

/// End of the whitespace-delimited chunk, excluding trailing punctuation.
fn chunk_end(chars: &[(usize, char)], from: usize) -> usize {
    let mut end = scan_while(chars, from, |c| !c.is_whitespace());
    while end > from && is_punctuation(chars[end - 1].1) {
        end -= 1;
    }
    end
}

fn scan_url(input: &str, chars: &[(usize, char)], i: usize) -> Option<usize> {
    let rest = &input[chars[i].0..];
    let prefix = URL_PREFIXES.iter().find(|p| {
        rest.get(..p.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(p))
    })?;
    let end = chunk_end(chars, i);
    // Require something after the prefix.
    (end > i + prefix.len()).then_some(end)
}

fn scan_email(input: &str, chars: &[(usize, char)], i: usize) -> Option<usize> {
    let end = chunk_end(chars, i);
    let stop = chars.get(end).map_or(input.len(), |&(b, _)| b);
    is_email(&input[chars[i].0..stop]).then_some(end)
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'));
    if !local_ok || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|l| {
        !l.is_empty() && l.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld = labels[labels.len() - 1];
    labels_ok && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn classify_word(
    input: &str,
    chars: &[(usize, char)],
    i: usize,
    table: &MappingTable,
) -> (usize, TokenKind, TokenFlags) {
    let mut end = scan_while(chars, i, is_word_char);
    let run = &chars[i..end];
    let all_digits = run.iter().all(|&(_, c)| c.is_numeric());

    if all_digits {
        // Decimal or grouped numbers: 3.14, 1,000
        while end + 1 < chars.len()
            && matches!(chars[end].1, '.' | ',')
            && chars[end + 1].1.is_numeric()
        {
            end = scan_while(chars, end + 1, |c| c.is_numeric());
        }
        return (end, TokenKind::Number, TokenFlags::default());
    }

    let has_digit = run.iter().any(|&(_, c)| c.is_numeric());
    if has_digit {
        let flags = TokenFlags {
            ambiguous: true,
            ..TokenFlags::default()
        };
        return (end, TokenKind::SinglishWord, flags);
    }

    let stop = chars.get(end).map_or(input.len(), |&(b, _)| b);
    let text = &input[chars[i].0..stop];
    let kind = if text.is_ascii() && table.is_foreign(&text.to_ascii_lowercase()) {
        TokenKind::ForeignWord
    } else {
        TokenKind::SinglishWord
    };
    (end, kind, TokenFlags::default())
}
