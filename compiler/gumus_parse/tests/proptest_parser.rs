//! Property-based tests for the parser.
//!
//! Whatever the token stream, the parser must return, and any input it
//! flags as erroneous must come with at least one diagnostic.

use gumus_lexer::lex;
use gumus_parse::parse;
use proptest::prelude::*;

fn source_fragment() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("değişken ".to_owned()),
            Just("eğer ".to_owned()),
            Just("değilse ".to_owned()),
            Just("döngü ".to_owned()),
            Just("fonksiyon ".to_owned()),
            Just("sınıf ".to_owned()),
            Just("modül ".to_owned()),
            Just("deneme ".to_owned()),
            Just("yakala ".to_owned()),
            Just("dön ".to_owned()),
            Just("yazdır ".to_owned()),
            Just("ata.".to_owned()),
            Just("öz".to_owned()),
            Just("\n".to_owned()),
            Just("{ ".to_owned()),
            Just("} ".to_owned()),
            Just("( ".to_owned()),
            Just(") ".to_owned()),
            Just("[ ".to_owned()),
            Just("] ".to_owned()),
            Just(", ".to_owned()),
            Just("; ".to_owned()),
            Just(": ".to_owned()),
            Just(":: ".to_owned()),
            Just("= ".to_owned()),
            Just("+ ".to_owned()),
            Just("< ".to_owned()),
            Just("ve ".to_owned()),
            "[a-z][a-z0-9]{0,4} ",
            "[0-9]{1,4} ",
        ],
        0..60,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn terminates_on_token_soup(source in source_fragment()) {
        if let Ok(tokens) = lex(&source) {
            let output = parse(&tokens);
            if output.had_error {
                prop_assert!(output.errors().next().is_some());
            }
        }
    }

    #[test]
    fn never_panics_on_arbitrary_text(source in "\\PC{0,120}") {
        if let Ok(tokens) = lex(&source) {
            let _ = parse(&tokens);
        }
    }

    #[test]
    fn well_formed_assignments_parse_cleanly(
        names in prop::collection::vec("[a-z][a-z0-9_]{0,5}", 1..10),
        values in prop::collection::vec(0i64..1000, 1..10),
    ) {
        let source: String = names
            .iter()
            .zip(values.iter())
            .map(|(name, value)| format!("değişken v_{name} = {value}\n"))
            .collect();
        let tokens = match lex(&source) {
            Ok(tokens) => tokens,
            Err(err) => return Err(TestCaseError::fail(format!("lex failed: {err}"))),
        };
        let output = parse(&tokens);
        prop_assert!(!output.had_error);
        prop_assert_eq!(output.statements.len(), names.len().min(values.len()));
    }
}
