//! Diagnostic Emitters
//!
//! - JSON: one object per line, the format tooling reads from stderr
//! - Collecting: keeps diagnostics in memory for tests and embedders

use std::io::Write;

use crate::Diagnostic;

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// JSON-lines emitter.
pub struct JsonEmitter<W: Write> {
    writer: W,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonEmitter<std::io::Stderr> {
    /// Emitter writing to the process's stderr.
    pub fn stderr() -> Self {
        JsonEmitter::new(std::io::stderr())
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let _ = writeln!(self.writer, "{}", diagnostic.to_json());
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // Consumers count the lines themselves.
    }
}

/// Keeps every emitted diagnostic.
#[derive(Default, Debug)]
pub struct CollectingEmitter {
    diagnostics: Vec<Diagnostic>,
    summary: Option<(usize, usize)>,
}

impl CollectingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// The last `(errors, warnings)` summary, if one was emitted.
    pub fn summary(&self) -> Option<(usize, usize)> {
        self.summary
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

impl DiagnosticEmitter for CollectingEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }

    fn flush(&mut self) {}

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        self.summary = Some((error_count, warning_count));
    }
}
