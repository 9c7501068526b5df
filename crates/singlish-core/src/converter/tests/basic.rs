use crate::converter::{convert, ConvertError, Converter};
use crate::reassemble::WarningKind;
use crate::settings::{parse_settings_toml, settings, DEFAULT_SETTINGS_TOML};
use crate::table::MappingTable;

#[test]
fn test_convert_daily_statement() {
    let r = convert("mama adha wada iwara kala").unwrap();
    assert_eq!(r.output, "මම අද වැඩ ඉවර කළා");
    assert!(r.is_clean(), "unexpected warnings: {:?}", r.warnings);
}

#[test]
fn test_convert_keeps_foreign_word() {
    let r = convert("oyaata puluvannam heta podi call ekak ganna").unwrap();
    assert_eq!(r.output, "ඔයාට පුළුවන්නම් හෙට පොඩි call එකක් ගන්න");
    assert!(r.is_clean());
}

#[test]
fn test_convert_empty() {
    let r = convert("").unwrap();
    assert_eq!(r.output, "");
    assert!(r.is_clean());
}

#[test]
fn test_whitespace_preserved() {
    let r = convert("  mama\tadha\n").unwrap();
    assert_eq!(r.output, "  මම\tඅද\n");
}

#[test]
fn test_joined_words_flagged() {
    let r = convert("mamagihingenaenne").unwrap();
    assert!(r.has(WarningKind::JoinedWordAmbiguity));
    assert_ne!(r.output, "මම ගිහින් ගෙනැන්නේ");
    assert!(!r.output.contains(' '));
}

#[test]
fn test_repetition_flagged() {
    let r = convert("hariiiii lassanaiiii").unwrap();
    assert!(r.has(WarningKind::RepetitionDistortion));
    // Distortion is reported, not normalized away.
    assert!(r.output.starts_with("හරීඊඉ"));
}

#[test]
fn test_symbols_flagged() {
    let r = convert("mata@@@ wada karanna bae!!!").unwrap();
    assert!(r.has(WarningKind::SymbolDisruption));
    assert_eq!(r.output, "මට@@@ වැඩ කරන්න බැහැ!!!");
}

#[test]
fn test_warnings_ordered_by_token() {
    let r = convert("g3dhara 😍 hariiiii").unwrap();
    let indices: Vec<usize> = r.warnings.iter().map(|w| w.token_index).collect();
    let mut sorted = indices.clone();
    sorted.sort();
    assert_eq!(indices, sorted);
    assert_eq!(
        r.kinds(),
        vec![
            WarningKind::UnmappedToken,
            WarningKind::EmojiDisruption,
            WarningKind::RepetitionDistortion,
            WarningKind::DigitSubstitution,
        ]
    );
}

#[test]
fn test_deterministic() {
    let input = "oya email eka test@gmail.com da 😊 MAMA";
    assert_eq!(convert(input).unwrap(), convert(input).unwrap());
}

#[test]
fn test_nul_is_invalid_argument() {
    let err = convert("mama\0adha").unwrap_err();
    assert!(matches!(err, ConvertError::InvalidArgument(_)));
}

#[test]
fn test_input_length_limit() {
    let mut s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
    s.converter.max_input_chars = 4;
    let converter = Converter::new(MappingTable::global(), &s);

    assert!(converter.convert("mama").is_ok());
    // Four chars, twelve bytes.
    assert!(converter.convert("මමමම").is_ok());
    let err = converter.convert("mama ").unwrap_err();
    assert_eq!(
        err,
        ConvertError::InvalidArgument("input exceeds 4 characters".to_string())
    );
}

#[test]
fn test_custom_table_converter() {
    let toml = r#"
[meta]
schema = 1

[[vowel]]
pattern = "a"
independent = "අ"
sign = ""

[[consonant]]
pattern = "m"
glyph = "ම"

[words]
amma = "අම්මා"

[foreign]
words = ["ok"]
"#;
    let table = MappingTable::from_toml(toml).unwrap();
    let converter = Converter::new(&table, settings());
    let r = converter.convert("mama amma OK xyz").unwrap();
    assert_eq!(r.output, "මම අම්මා OK xyz");
    let unmapped: Vec<usize> = r
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::UnmappedToken)
        .map(|w| w.token_index)
        .collect();
    assert_eq!(unmapped, vec![6]);
}

#[test]
fn test_native_digit_numbers_pass_through_clean() {
    let r = convert("෧෨ ١٢٣").unwrap();
    assert_eq!(r.output, "෧෨ ١٢٣");
    assert!(r.is_clean(), "warnings: {:?}", r.warnings);
}
