//! `dahil_et`: load another source file into the globals.
//!
//! A file is loaded at most once per interpreter, keyed by the name it
//! was requested under. Failures never abort the including program: they
//! are reported as `import_error` diagnostics and `dahil_et` returns
//! `yanlış`.

use std::path::{Path, PathBuf};

use gumus_diagnostic::{Diagnostic, DiagnosticKind};

use crate::errors::{EvalError, EvalResult};
use crate::interpreter::Interpreter;

const BOM: char = '\u{feff}';

impl Interpreter {
    /// Load `name` into the globals. Returns whether it is loaded now.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn include(&mut self, name: &str) -> EvalResult<bool> {
        if self.loaded_files.contains(name) {
            return Ok(true);
        }
        let Some(path) = self.find_include(name) else {
            tracing::warn!(name, "include not found");
            self.report_import_error(format!("Modul bulunamadi: {name}"), name, Vec::new());
            return Ok(false);
        };
        self.loaded_files.insert(name.to_owned());

        let Ok(source) = std::fs::read_to_string(&path) else {
            self.report_import_error(load_failed(name), name, Vec::new());
            return Ok(false);
        };
        let source = source.strip_prefix(BOM).unwrap_or(&source);

        let tokens = match gumus_lexer::lex(source) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.report_import_error(load_failed(name), name, vec![err.into()]);
                return Ok(false);
            }
        };
        let output = gumus_parse::parse(&tokens);
        if output.had_error {
            self.report_import_error(load_failed(name), name, output.diagnostics);
            return Ok(false);
        }
        gumus_resolve::resolve(&output.statements);

        let globals = self.globals;
        let result = self.enter_call(globals, None).interpret(&output.statements);
        match result {
            Ok(()) => {
                tracing::debug!(name, path = %path.display(), "included");
                Ok(true)
            }
            Err(EvalError::Stopped) => Err(EvalError::Stopped),
            Err(err) => {
                self.report_import_error(load_failed(name), name, vec![err.to_diagnostic()]);
                Ok(false)
            }
        }
    }

    /// First of `<dir>/<name>` over the search paths, then `name` itself.
    fn find_include(&self, name: &str) -> Option<PathBuf> {
        self.search_paths
            .iter()
            .map(|dir| dir.join(name))
            .chain(std::iter::once(PathBuf::from(name)))
            .find(|candidate| Path::is_file(candidate))
    }

    fn report_import_error(&mut self, message: String, name: &str, causes: Vec<Diagnostic>) {
        let line = self.call_stack.current_frame().map_or(0, |frame| frame.line);
        self.diagnostics
            .push(Diagnostic::new(DiagnosticKind::ImportError, line, message).with_file(name));
        self.diagnostics
            .extend(causes.into_iter().map(|cause| cause.or_file(name)));
    }
}

fn load_failed(name: &str) -> String {
    format!("Modul yuklenirken hata: {name}")
}
