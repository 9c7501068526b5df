//! Behavioural corpus: literal conversions and the disruption each
//! malformed input must raise.

use crate::converter::convert;
use crate::reassemble::WarningKind;

/// Inputs whose output is fully determined by the default table.
const POSITIVE: &[(&str, &str)] = &[
    // Pos_Fun_0001
    ("mama adha wada iwara kala", "මම අද වැඩ ඉවර කළා"),
    // Pos_Fun_0002
    (
        "oyaata puluvannam heta podi call ekak ganna",
        "ඔයාට පුළුවන්නම් හෙට පොඩි call එකක් ගන්න",
    ),
    // Pos_Fun_0003
    ("oyala Galle yanne kohomadha?", "ඔයාල ගාල්ල යන්නේ කොහොමද?"),
    // Pos_UI_0004
    ("mata swimming karanna bae", "මට swimming කරන්න බැහැ"),
    // Pos_UI_0005
    (
        "adha office giyee naehae mokadha bus late unaa",
        "අද office ගියේ නැහැ මොකද bus late උනා",
    ),
    // Pos_UI_0006
    ("api dinner kanna ready", "අපි dinner කන්න ready"),
    // Pos_UI_0007
    ("meeka balanna", "මේක බලන්න"),
    // Pos_UI_0008
    (
        "adha udhaasana kaalayedi weather report ekata anuva rain thiyenna puluvan kiyala kiwwa. ehema unaoth api trip eka cancel karanna wenne.",
        "අද උදෑසන කාලයේදී weather report එකට අනුව rain තියෙන්න පුළුවන් කියලා කිව්වා. එහෙම උනොත් අපි trip එක cancel කරන්න වෙන්නේ.",
    ),
    // Pos_UI_0012
    ("mama music ahanavaa", "මම music අහනවා"),
    // Pos_UI_0013
    ("mama adha gedhara inne", "මම අද ගෙදර ඉන්නේ"),
    // Pos_UI_0014
    ("api lunch kanna yamu", "අපි lunch කන්න යමු"),
    // Pos_UI_0015
    ("oyata adha vaeda thiyenavada?", "ඔයාට අද වැඩ තියෙනවද?"),
    // Pos_UI_0016
    (
        "karunakarala mage file eka balala reply ekak denna",
        "කරුණාකරලා මගේ file එක බලලා reply එකක් දෙන්න",
    ),
    // Pos_UI_0017
    ("mama adha enne naehae", "මම අද එන්නේ නැහැ"),
    // Pos_UI_0018
    ("eya office giyaa", "එයා office ගියා"),
    // Pos_UI_0020
    (
        "oya enavoth api dinner kanna puluvan",
        "ඔයා එනවොත් අපි dinner කන්න පුළුවන්",
    ),
];

const NEGATIVE: &[(&str, WarningKind)] = &[
    ("mamagihingenaenne", WarningKind::JoinedWordAmbiguity),
    ("hariiiii lassanaiiii", WarningKind::RepetitionDistortion),
    ("mata@@@ wada karanna bae!!!", WarningKind::SymbolDisruption),
    ("mama @@@ gedhara ###", WarningKind::SymbolDisruption),
    ("mama g3dhara y4nav4a", WarningKind::DigitSubstitution),
    ("mama hari lassanai 😍", WarningKind::EmojiDisruption),
    ("mama www.google.com yanavaa", WarningKind::SymbolDisruption),
    ("oya email eka test@gmail.com da", WarningKind::SymbolDisruption),
    ("2 + 2 mama danne naehae", WarningKind::SymbolDisruption),
    ("mama??? gedhara!!! Inne", WarningKind::SymbolDisruption),
    ("mama #happy adha", WarningKind::SymbolDisruption),
    ("mama gෙdhara inne", WarningKind::MixedScript),
    ("mama gedhara yanavaa 😊", WarningKind::EmojiDisruption),
    ("MAMA GEDHARA INNE", WarningKind::CaseAnomaly),
    ("mama 2n gedhara yanne", WarningKind::DigitSubstitution),
    ("mama @ gedhara # inne", WarningKind::SymbolDisruption),
];

#[test]
fn test_positive_corpus() {
    for &(input, expected) in POSITIVE {
        let r = convert(input).unwrap();
        assert_eq!(
            r.output, expected,
            "conversion mismatch: input={input:?}, expected={expected:?}, got={:?}",
            r.output
        );
        assert!(r.is_clean(), "input={input:?} warnings={:?}", r.warnings);
    }
}

#[test]
fn test_negative_corpus() {
    for &(input, kind) in NEGATIVE {
        let r = convert(input).unwrap();
        assert!(
            r.has(kind),
            "input={input:?}: expected {kind}, got {:?}",
            r.kinds()
        );
    }
}

#[test]
fn test_negative_inputs_still_convert_words() {
    let r = convert("mama @ gedhara # inne").unwrap();
    assert_eq!(r.output, "මම @ ගෙදර # ඉන්නේ");

    let r = convert("MAMA GEDHARA INNE").unwrap();
    assert_eq!(r.output, "මම ගෙදර ඉන්නේ");

    let r = convert("mama www.google.com yanavaa").unwrap();
    assert_eq!(r.output, "මම www.google.com යනවා");
}

#[test]
fn test_repeated_words_are_consistent() {
    let r = convert("amma amma amma").unwrap();
    assert_eq!(r.output, "අම්මා අම්මා අම්මා");
    let r = convert("la la la la").unwrap();
    assert_eq!(r.output, "ල ල ල ල");
}
