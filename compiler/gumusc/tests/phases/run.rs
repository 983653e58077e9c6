//! Running units and files.

use std::path::Path;

use gumus_diagnostic::DiagnosticKind;
use gumusc::{Outcome, RunOptions};
use pretty_assertions::assert_eq;

use crate::common::{run, run_file_in, run_in, script, session};

#[test]
fn program_output_and_success() {
    let result = run(r#"
fonksiyon selam(ad) { dön "Merhaba " + ad }
yazdır selam("Dünya")
"#);
    assert_eq!(result.outcome, Outcome::Completed);
    assert_eq!(result.output, "Merhaba Dünya\n");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn runtime_error_keeps_earlier_output() {
    let result = run("yazdır 1\nyazdır 1 / 0\nyazdır 2\n");
    assert_eq!(result.outcome, Outcome::Failed);
    assert_eq!(result.output, "1\n");
    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::RuntimeError);
    assert_eq!(diagnostic.line, 2);
    assert_eq!(diagnostic.message, "Sifira bolunme hatasi.");
}

#[test]
fn runtime_error_carries_the_suggestion() {
    let result = run("değişken bakiye = 1\nyazdır bakiy\n");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].suggestion.as_deref(), Some("bakiye"));
    assert_eq!(
        result.diagnostics[0].to_json(),
        r#"{"type":"runtime_error","line":2,"message":"Tanimlanmamis degisken: 'bakiy'.","suggestion":"bakiye"}"#
    );
}

#[test]
fn uncaught_throw_reports_the_value() {
    let result = run("firlat([1, 2])\n");
    assert_eq!(result.outcome, Outcome::Failed);
    assert_eq!(result.diagnostics[0].message, "[1, 2]");
}

#[test]
fn lexical_error_stops_the_unit() {
    let result = run("yazdır 1\nyazdır 2 @ 3\n");
    assert_eq!(result.outcome, Outcome::Failed);
    assert_eq!(result.output, "");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::LexerError);
    assert_eq!(result.diagnostics[0].line, 2);
}

#[test]
fn parse_errors_prevent_the_run() {
    let result = run("yazdır \"önce\"\nyazdır\n");
    assert_eq!(result.outcome, Outcome::Failed);
    assert_eq!(result.output, "");
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::ParserError && d.message == "Ifade bekleniyor."));
}

#[test]
fn byte_order_mark_is_ignored() {
    let result = run("\u{feff}yazdır 7\n");
    assert_eq!(result.outcome, Outcome::Completed);
    assert_eq!(result.output, "7\n");
}

#[test]
fn state_survives_a_failed_unit() {
    let mut session = session(RunOptions::empty());
    assert!(run_in(&mut session, "değişken x = 1\n").outcome.is_success());
    assert_eq!(run_in(&mut session, "x = x + 1\nyazdır yok\n").outcome, Outcome::Failed);
    let result = run_in(&mut session, "yazdır x\n");
    assert_eq!(result.output, "2\n");
    assert_eq!(session.interpreter().current_env(), session.interpreter().globals());
}

#[test]
fn files_run_and_report_their_outcome() {
    let (_dir, path) = script("ana.tr", "\u{feff}değişken n = 3\nyazdır n * n\n");
    let mut session = session(RunOptions::empty());
    let result = run_file_in(&mut session, &path);
    assert_eq!(result.outcome, Outcome::Completed);
    assert_eq!(result.outcome.exit_code(), 0);
    assert_eq!(result.output, "9\n");
}

#[test]
fn missing_file_is_a_file_error() {
    let mut session = session(RunOptions::empty());
    let result = run_file_in(&mut session, Path::new("yok/boyle/bir.tr"));
    assert_eq!(result.outcome.exit_code(), 1);
    assert_eq!(result.output, "");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::FileError);
    assert_eq!(result.diagnostics[0].message, "Dosya okunamadi: yok/boyle/bir.tr");
}

#[test]
fn includes_resolve_next_to_the_search_paths() {
    let (dir, path) = script("yardim.tr", "fonksiyon kare(x) { dön x * x }\n");
    let mut session = session(RunOptions::empty());
    session.interpreter_mut().prepend_search_path(dir.path());
    let result = run_in(&mut session, "dahil_et(\"yardim.tr\")\nyazdır kare(4)\n");
    assert_eq!(result.output, "16\n");
    assert!(result.diagnostics.is_empty());
    assert!(path.is_file());
}

#[test]
fn include_failures_surface_as_import_errors() {
    let result = run("yazdır dahil_et(\"kayip.tr\")\n");
    assert_eq!(result.outcome, Outcome::Completed);
    assert_eq!(result.output, "yanlis\n");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ImportError);
    assert_eq!(result.diagnostics[0].file.as_deref(), Some("kayip.tr"));
}
