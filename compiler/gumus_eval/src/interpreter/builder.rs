//! `InterpreterBuilder` for creating interpreters with various
//! configurations.

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::path::PathBuf;

use rustc_hash::{FxHashMap, FxHashSet};

use super::Interpreter;
use crate::debug::DebugHook;
use crate::diagnostics::{CallStack, EvalCounters, DEFAULT_MAX_CALL_DEPTH};
use crate::gc::GcStats;
use crate::heap::Heap;
use crate::natives::register_core_natives;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Include directories searched when no others are configured.
pub const DEFAULT_SEARCH_PATHS: [&str; 3] = [".", "lib", "std_lib"];

/// Builder for [`Interpreter`].
///
/// Defaults: stdout output, the core natives registered, the default
/// search paths, no debug hook and a call depth limit of
/// [`DEFAULT_MAX_CALL_DEPTH`].
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    search_paths: Vec<PathBuf>,
    core_natives: bool,
    debug: Option<DebugHook>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            print_handler: None,
            search_paths: DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
            core_natives: true,
            debug: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Where `yazdır` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Replace the include search paths.
    #[must_use]
    pub fn search_paths(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Register `metin`, `uzunluk`, `dahil_et` and the rest.
    #[must_use]
    pub fn core_natives(mut self, enabled: bool) -> Self {
        self.core_natives = enabled;
        self
    }

    /// Attach the line-stepping debug protocol.
    #[must_use]
    pub fn debug_hook(mut self, hook: DebugHook) -> Self {
        self.debug = Some(hook);
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        let mut heap = Heap::new();
        let globals = heap.new_env("Global", None);
        let mut interpreter = Interpreter {
            heap,
            globals,
            env: globals,
            functions: FxHashMap::default(),
            modules: FxHashMap::default(),
            receiver: None,
            saved_frames: Vec::new(),
            call_stack: CallStack::new(self.max_call_depth),
            counters: EvalCounters::default(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            search_paths: self.search_paths,
            loaded_files: FxHashSet::default(),
            diagnostics: Vec::new(),
            debug: self.debug,
            roots: FxHashMap::default(),
            gc_stats: GcStats::default(),
            // xorshift must not start at zero.
            rng_state: RandomState::new().hash_one(0x5eed_u32) | 1,
        };
        if self.core_natives {
            register_core_natives(&mut interpreter);
        }
        interpreter
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
