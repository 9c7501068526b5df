//! Property-based tests for the conversion pipeline.
//!
//! Generates mixed Singlish-like input and verifies reconstruction,
//! pass-through and determinism invariants.

use proptest::prelude::*;

use crate::converter::explain::explain;
use crate::converter::{convert, Converter};
use crate::settings::settings;
use crate::table::MappingTable;
use crate::token::{tokenize, TokenKind};

fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => "[a-z ]{0,30}",
        2 => "[a-zA-Z0-9 @#!?.,+]{0,30}",
        1 => "(mama|adha|call|😍|g3dhara|ෙ|www\\.x\\.lk|a@b\\.com| |!!!)*",
    ]
}

proptest! {
    #[test]
    fn tokens_reconstruct_input(input in arb_input()) {
        let tokens = tokenize(&input, MappingTable::global(), &settings().tokenizer);
        let mut pos = 0;
        for t in &tokens {
            prop_assert_eq!(t.span.start, pos);
            prop_assert!(t.span.len > 0);
            pos = t.span.end();
        }
        prop_assert_eq!(pos, input.len());
        let joined: String = tokens.iter().map(|t| t.text).collect();
        prop_assert_eq!(joined, input);
    }

    #[test]
    fn pass_through_tokens_verbatim(input in arb_input()) {
        let r = explain(&Converter::global(), &input).unwrap();
        for t in &r.tokens {
            if t.kind != TokenKind::SinglishWord {
                prop_assert_eq!(&t.output, &t.text);
            }
        }
        let joined: String = r.tokens.iter().map(|t| t.output.as_str()).collect();
        prop_assert_eq!(joined, r.output);
    }

    #[test]
    fn conversion_is_deterministic(input in arb_input()) {
        let a = convert(&input).unwrap();
        let b = convert(&input).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn warnings_sorted_and_unique(input in arb_input()) {
        let r = convert(&input).unwrap();
        for pair in r.warnings.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }
}
