use pretty_assertions::assert_eq;

use super::*;

#[test]
fn table_is_sorted() {
    for window in MISSPELLINGS.windows(2) {
        assert!(
            window[0].0 < window[1].0,
            "table not sorted: {:?} >= {:?}",
            window[0].0,
            window[1].0
        );
    }
}

#[test]
fn ascii_turkish_spellings() {
    assert_eq!(
        lookup_misspelling("eger"),
        Some(Correction::Keyword {
            shown: "'eger'",
            correct: "eğer"
        })
    );
    assert_eq!(
        lookup_misspelling("yanlis"),
        Some(Correction::Keyword {
            shown: "'yanlis'",
            correct: "yanlış"
        })
    );
}

#[test]
fn grouped_spellings_share_a_message() {
    assert_eq!(lookup_misspelling("null"), lookup_misspelling("none"));
    assert_eq!(lookup_misspelling("var"), lookup_misspelling("let"));
    assert_eq!(lookup_misspelling("func"), lookup_misspelling("function"));
}

#[test]
fn loop_words() {
    for word in ["while", "for", "loop"] {
        assert_eq!(lookup_misspelling(word), Some(Correction::Loop), "{word}");
    }
}

#[test]
fn ordinary_identifiers_pass() {
    for word in ["toplam", "x", "değer", "metin", "dongusu", "iff"] {
        assert_eq!(lookup_misspelling(word), None, "{word}");
    }
}
