//! One interpreter, many source units.

use std::path::Path;
use std::time::Instant;

use gumus_diagnostic::{Diagnostic, DiagnosticEmitter, DiagnosticKind};
use gumus_eval::Interpreter;
use gumus_ir::program_to_json;

use crate::RunOptions;

const MEMORY_START: &str = "__MEMORY_JSON_START__";
const MEMORY_END: &str = "__MEMORY_JSON_END__";

/// How a unit ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// A lex, parse, file or uncaught runtime error was reported.
    Failed,
}

impl Outcome {
    #[inline]
    pub fn is_success(self) -> bool {
        self == Outcome::Completed
    }

    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Completed => 0,
            Outcome::Failed => 1,
        }
    }
}

/// Drop a leading UTF-8 byte order mark.
pub fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{feff}').unwrap_or(source)
}

/// Long-lived driver state.
///
/// Globals, functions, classes and modules defined by one unit stay
/// visible to the next, which is what the REPL relies on.
pub struct Session {
    interpreter: Interpreter,
    options: RunOptions,
}

impl Session {
    pub fn new(interpreter: Interpreter, options: RunOptions) -> Self {
        Session {
            interpreter,
            options,
        }
    }

    #[inline]
    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    #[inline]
    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    #[inline]
    pub fn options(&self) -> RunOptions {
        self.options
    }

    /// Read and run a file. An unreadable file is a `file_error`.
    ///
    /// With [`RunOptions::TIMING`] the elapsed time is printed once the
    /// file has run.
    pub fn run_file(&mut self, path: &Path, emitter: &mut dyn DiagnosticEmitter) -> Outcome {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "cannot read source file");
                emitter.emit(&Diagnostic::new(
                    DiagnosticKind::FileError,
                    0,
                    format!("Dosya okunamadi: {}", path.display()),
                ));
                emitter.flush();
                return Outcome::Failed;
            }
        };

        let start = Instant::now();
        let outcome = self.run_source(&source, emitter);
        if self.options.contains(RunOptions::TIMING) {
            self.interpreter.print_handler().println(&format!(
                "[DEBUG] Program {} ms icinde tamamlandi.",
                start.elapsed().as_millis()
            ));
        }
        outcome
    }

    /// Run one unit of source text.
    ///
    /// Lexing stops at the first lexical error. A unit with parse errors
    /// is reported and never run. Output printed before a runtime error
    /// is kept, and the session is reset so the next unit starts from the
    /// globals.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_source(&mut self, source: &str, emitter: &mut dyn DiagnosticEmitter) -> Outcome {
        let outcome = self.run_unit(strip_bom(source), emitter);
        emitter.flush();
        self.interpreter.print_handler().flush();
        outcome
    }

    fn run_unit(&mut self, source: &str, emitter: &mut dyn DiagnosticEmitter) -> Outcome {
        let tokens = match gumus_lexer::lex(source) {
            Ok(tokens) => tokens,
            Err(err) => {
                emitter.emit(&Diagnostic::from(err));
                return Outcome::Failed;
            }
        };

        let parsed = gumus_parse::parse(&tokens);
        emitter.emit_all(&parsed.diagnostics);
        if parsed.had_error {
            tracing::debug!(
                diagnostics = parsed.diagnostics.len(),
                "unit not run after parse errors"
            );
            return Outcome::Failed;
        }
        let summary = gumus_resolve::resolve(&parsed.statements);
        tracing::debug!(local = summary.local, global = summary.global, "resolved");

        if self.options.contains(RunOptions::DUMP_AST) {
            return match program_to_json(&parsed.statements) {
                Ok(json) => {
                    self.interpreter.print_handler().println(&json);
                    Outcome::Completed
                }
                Err(err) => {
                    emitter.emit(&Diagnostic::new(DiagnosticKind::SystemError, 0, err.to_string()));
                    Outcome::Failed
                }
            };
        }

        let result = self.interpreter.interpret(&parsed.statements);
        emitter.emit_all(&self.interpreter.take_diagnostics());
        let outcome = match result {
            Ok(()) => Outcome::Completed,
            Err(err) if err.is_stopped() => {
                tracing::debug!("stopped by the debugger");
                self.interpreter.reset_after_error();
                Outcome::Completed
            }
            Err(err) => {
                emitter.emit(&err.to_diagnostic());
                self.interpreter.reset_after_error();
                Outcome::Failed
            }
        };

        if self.options.contains(RunOptions::DUMP_MEMORY) {
            let handler = self.interpreter.print_handler();
            handler.println(&format!("\n{MEMORY_START}"));
            handler.println(&self.interpreter.globals_json());
            handler.println(MEMORY_END);
        }
        if self.options.contains(RunOptions::GC_REPORT) {
            self.collect_garbage();
            let report = self.interpreter.generate_report();
            self.interpreter.print_handler().print(&report);
        }
        outcome
    }

    /// Run the collector between units.
    pub fn collect_garbage(&mut self) -> gumus_eval::CollectionReport {
        self.interpreter.collect_garbage()
    }
}
