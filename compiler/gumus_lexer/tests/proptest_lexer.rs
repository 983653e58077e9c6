//! Property-based tests for the lexer.
//!
//! The lexer must never panic, and token positions must never move
//! backwards.

use gumus_ir::TokenKind;
use gumus_lexer::lex;
use proptest::prelude::*;

fn source_fragment() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("değişken ".to_owned()),
            Just("eğer ".to_owned()),
            Just("yazdır ".to_owned()),
            Just("döngü ".to_owned()),
            Just("\n".to_owned()),
            Just("{ ".to_owned()),
            Just("} ".to_owned()),
            Just("( ".to_owned()),
            Just(") ".to_owned()),
            Just("+ ".to_owned()),
            Just("== ".to_owned()),
            Just("// yorum\n".to_owned()),
            Just("\"metin\" ".to_owned()),
            Just("$\"a{x}b\" ".to_owned()),
            "[a-zçğıöşü_][a-z0-9çğıöşü_]{0,6} ",
            "[0-9]{1,5}(\\.[0-9]{1,3})? ",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn never_panics_on_arbitrary_text(source in "\\PC{0,200}") {
        let _ = lex(&source);
    }

    #[test]
    fn positions_are_monotone(source in source_fragment()) {
        if let Ok(tokens) = lex(&source) {
            prop_assert!(matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)));
            for pair in tokens.windows(2) {
                let a = (pair[0].line, pair[0].column);
                let b = (pair[1].line, pair[1].column);
                prop_assert!(a <= b, "{:?} then {:?}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn newline_count_matches_source(source in source_fragment()) {
        if let Ok(tokens) = lex(&source) {
            let newline_tokens = tokens.iter().filter(|t| t.kind == TokenKind::Newline).count();
            // Every newline outside strings and template interpolations is a token.
            prop_assert!(newline_tokens <= source.matches('\n').count());
        }
    }
}
