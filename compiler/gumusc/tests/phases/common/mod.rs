//! Shared setup for driver tests.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use gumus_diagnostic::{CollectingEmitter, Diagnostic};
use gumus_eval::{buffer_handler, DebugHook, Interpreter, SharedPrintHandler};
use gumusc::{Outcome, RunOptions, Session};

/// Captured result of one unit.
pub struct Run {
    pub outcome: Outcome,
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Session printing into a buffer.
pub fn session(options: RunOptions) -> Session {
    let interpreter = Interpreter::builder().print_handler(buffer_handler()).build();
    Session::new(interpreter, options)
}

/// Session with a scripted debugger sharing the output buffer.
pub fn debug_session(commands: &str) -> Session {
    let output: SharedPrintHandler = buffer_handler();
    let hook = DebugHook::new(Box::new(Cursor::new(commands.to_owned())), output.clone());
    let interpreter = Interpreter::builder()
        .print_handler(output)
        .debug_hook(hook)
        .build();
    Session::new(interpreter, RunOptions::DEBUG | RunOptions::TIMING)
}

/// Run `source` in `session` and take what it printed and reported.
pub fn run_in(session: &mut Session, source: &str) -> Run {
    let mut emitter = CollectingEmitter::new();
    let outcome = session.run_source(source, &mut emitter);
    finish(session, outcome, emitter)
}

pub fn run(source: &str) -> Run {
    run_in(&mut session(RunOptions::empty()), source)
}

pub fn run_with(options: RunOptions, source: &str) -> Run {
    run_in(&mut session(options), source)
}

pub fn run_file_in(session: &mut Session, path: &Path) -> Run {
    let mut emitter = CollectingEmitter::new();
    let outcome = session.run_file(path, &mut emitter);
    finish(session, outcome, emitter)
}

fn finish(session: &Session, outcome: Outcome, mut emitter: CollectingEmitter) -> Run {
    let handler = session.interpreter().print_handler();
    let output = handler.output();
    handler.clear();
    Run {
        outcome,
        output,
        diagnostics: emitter.take(),
    }
}

/// Write `contents` to `name` inside a fresh temporary directory.
pub fn script(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir: {err}"),
    };
    let path = dir.path().join(name);
    if let Err(err) = std::fs::write(&path, contents) {
        panic!("write {}: {err}", path.display());
    }
    (dir, path)
}
