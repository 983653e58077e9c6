use pretty_assertions::assert_eq;

use super::*;

#[test]
fn kind_strings() {
    assert_eq!(DiagnosticKind::LexerError.as_str(), "lexer_error");
    assert_eq!(DiagnosticKind::ParserWarning.to_string(), "parser_warning");
    assert_eq!(DiagnosticKind::ImportError.as_str(), "import_error");
}

#[test]
fn json_has_fixed_field_order() {
    let diag = Diagnostic::runtime(4, "Sifira bolunme hatasi.");
    assert_eq!(
        diag.to_json(),
        r#"{"type":"runtime_error","line":4,"message":"Sifira bolunme hatasi."}"#
    );
}

#[test]
fn optional_fields_appear_when_set() {
    let diag = Diagnostic::runtime(2, "Tanimlanmamis degisken: 'toplamm'.")
        .with_file("ana.gd")
        .with_suggestion("toplam");
    let json = diag.to_json();
    assert!(json.ends_with(r#""file":"ana.gd","suggestion":"toplam"}"#));
}

#[test]
fn json_escapes_quotes_and_newlines() {
    let diag = Diagnostic::parser(1, "a \"b\"\nc");
    assert!(diag.to_json().contains(r#""a \"b\"\nc""#));
}

#[test]
fn round_trips_through_serde() {
    let diag = Diagnostic::syntax(7, "x").with_file("m.gd");
    let back: Diagnostic = serde_json::from_str(&diag.to_json()).unwrap_or_else(|_| Diagnostic::lexer(0, ""));
    assert_eq!(back, diag);
}

#[test]
fn or_file_keeps_existing() {
    let diag = Diagnostic::runtime(1, "x").with_file("a.gd").or_file("b.gd");
    assert_eq!(diag.file.as_deref(), Some("a.gd"));
    let diag = Diagnostic::runtime(1, "x").or_file("b.gd");
    assert_eq!(diag.file.as_deref(), Some("b.gd"));
}

#[test]
fn warnings_are_not_errors() {
    assert!(!Diagnostic::new(DiagnosticKind::ParserWarning, 1, "w").is_error());
    assert!(Diagnostic::lexer(1, "e").is_error());
}

#[test]
fn display_mentions_suggestion() {
    let text = Diagnostic::runtime(3, "m").with_suggestion("toplam").to_string();
    assert_eq!(text, "[runtime_error] satir 3: m (Bunu mu demek istediniz: 'toplam'?)");
}
