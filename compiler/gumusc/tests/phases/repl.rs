//! The interactive prompt.

use std::io::Cursor;

use gumus_diagnostic::{CollectingEmitter, DiagnosticKind};
use gumusc::{run_prompt, RunOptions, BANNER, PROMPT};
use pretty_assertions::assert_eq;

use crate::common::session;

#[test]
fn lines_share_state_and_errors_do_not_end_the_loop() {
    let mut session = session(RunOptions::empty());
    let mut emitter = CollectingEmitter::new();
    let input = Cursor::new("değişken a = 2\n\nyazdır a / 0\nyazdır a * 21\n");
    if let Err(err) = run_prompt(&mut session, input, &mut emitter) {
        panic!("prompt failed: {err}");
    }

    let expected = format!("{BANNER}\n{PROMPT}{PROMPT}{PROMPT}{PROMPT}42\n{PROMPT}\n");
    assert_eq!(session.interpreter().print_handler().output(), expected);

    let diagnostics = emitter.take();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::RuntimeError);
    assert_eq!(diagnostics[0].line, 1);
}

#[test]
fn lexical_errors_are_reported_per_line() {
    let mut session = session(RunOptions::empty());
    let mut emitter = CollectingEmitter::new();
    let input = Cursor::new("yazdır \"açık\nyazdır 5\n");
    if let Err(err) = run_prompt(&mut session, input, &mut emitter) {
        panic!("prompt failed: {err}");
    }
    assert!(session.interpreter().print_handler().output().contains("5\n"));
    let diagnostics = emitter.take();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::LexerError);
    assert_eq!(diagnostics[0].message, "Sonlandirilmamis Metin (Tirnak isareti eksik)");
}
