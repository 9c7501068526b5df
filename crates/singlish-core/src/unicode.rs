//! Character-level classification for mixed Singlish input.

/// Sinhala block (U+0D80..U+0DFF).
pub fn is_sinhala(c: char) -> bool {
    ('\u{0D80}'..='\u{0DFF}').contains(&c)
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Characters that continue a word run: letters, digits and Sinhala script
/// (including its combining vowel signs, which are not `alphabetic`).
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || is_sinhala(c)
}

/// Sentence punctuation. Everything else non-alphanumeric is a symbol.
pub fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | '?' | '!' | ';' | ':' | '\'' | '"' | '(' | ')' | '-' | '…' | '‘' | '’' | '“'
            | '”' | '\u{0DF4}'
    )
}

/// Pictographic emoji. Covers the blocks that appear in chat input; this is
/// not a full UTS #51 property table.
pub fn is_emoji(c: char) -> bool {
    matches!(c as u32,
        0x1F300..=0x1F5FF   // misc symbols and pictographs
        | 0x1F600..=0x1F64F // emoticons
        | 0x1F680..=0x1F6FF // transport and map
        | 0x1F900..=0x1F9FF // supplemental symbols and pictographs
        | 0x1FA70..=0x1FAFF // symbols and pictographs extended-A
        | 0x2600..=0x26FF   // misc symbols
        | 0x2700..=0x27BF   // dingbats
        | 0x1F1E6..=0x1F1FF // regional indicators
        | 0x2B50 | 0x2B55
    )
}

/// Characters that attach to a preceding emoji: ZWJ, variation selectors,
/// skin-tone modifiers, tag characters and the keycap mark.
pub fn is_emoji_component(c: char) -> bool {
    matches!(c as u32,
        0x200D
        | 0xFE0E..=0xFE0F
        | 0x1F3FB..=0x1F3FF
        | 0xE0020..=0xE007F
        | 0x20E3
    )
}
