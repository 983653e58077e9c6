//! Whole-program evaluator tests and operator tests.
//!
//! Programs go through the real lexer, parser and resolver, then run
//! against an interpreter that prints into a buffer.

mod natives_tests;

use crate::errors::{EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::print_handler::buffer_handler;

pub(crate) fn interpreter() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

/// Lex, parse, resolve and run `source` in `interpreter`.
pub(crate) fn run_in(interpreter: &mut Interpreter, source: &str) -> EvalResult<()> {
    let tokens = match gumus_lexer::lex(source) {
        Ok(tokens) => tokens,
        Err(err) => panic!("lex error in test program: {err}"),
    };
    let parsed = gumus_parse::parse(&tokens);
    assert!(
        !parsed.had_error,
        "parse errors in test program: {:?}",
        parsed.diagnostics
    );
    gumus_resolve::resolve(&parsed.statements);
    interpreter.interpret(&parsed.statements)
}

/// Output and outcome of running `source` in a fresh interpreter.
pub(crate) fn run(source: &str) -> (String, EvalResult<()>) {
    let mut interpreter = interpreter();
    let result = run_in(&mut interpreter, source);
    (interpreter.print_handler().output(), result)
}

/// Output of a program that must succeed.
pub(crate) fn output_of(source: &str) -> String {
    let (output, result) = run(source);
    if let Err(err) = result {
        panic!("program failed: {err:?}\noutput so far:\n{output}");
    }
    output
}

/// Error of a program that must fail.
pub(crate) fn error_of(source: &str) -> EvalError {
    match run(source) {
        (_, Err(err)) => err,
        (output, Ok(())) => panic!("program succeeded unexpectedly, output:\n{output}"),
    }
}

/// Message and line of a runtime error.
pub(crate) fn runtime_error(source: &str) -> (String, u32) {
    match error_of(source) {
        EvalError::Runtime { message, line, .. } => (message, line),
        other => panic!("expected a runtime error, got {other:?}"),
    }
}
