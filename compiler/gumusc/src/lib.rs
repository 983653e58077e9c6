//! GümüşDil driver.
//!
//! Runs source text through the whole pipeline (lex, parse, resolve,
//! interpret) against one long-lived [`Session`], and reports every
//! failure as a JSON diagnostic. The `gumus` binary is a thin wrapper
//! around this library: a file runner, the REPL and the dump flags.

mod options;
mod repl;
mod session;
mod tracing_setup;

pub use options::RunOptions;
pub use repl::{run_prompt, BANNER, PROMPT};
pub use session::{strip_bom, Outcome, Session};
pub use tracing_setup::init_tracing;

use std::path::PathBuf;

use gumus_eval::{DebugHook, Interpreter, DEFAULT_SEARCH_PATHS};

/// Environment variable with extra include directories.
pub const SEARCH_PATH_VAR: &str = "GUMUS_PATH";

/// Include directories: `GUMUS_PATH` entries first, then the defaults.
pub fn search_paths_from_env() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = std::env::var_os(SEARCH_PATH_VAR)
        .map(|list| std::env::split_paths(&list).collect())
        .unwrap_or_default();
    paths.extend(DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from));
    paths
}

/// Interpreter writing to stdout, configured for `options`.
pub fn interpreter_for(options: RunOptions) -> Interpreter {
    let mut builder = Interpreter::builder().search_paths(search_paths_from_env());
    if options.contains(RunOptions::DEBUG) {
        builder = builder.debug_hook(DebugHook::stdio());
    }
    builder.build()
}
