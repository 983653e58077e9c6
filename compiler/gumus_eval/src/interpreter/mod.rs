//! The tree-walking interpreter.
//!
//! One `Interpreter` owns all run-time state: the heap, the globals
//! environment and function table, the module registry, the call stack,
//! the include bookkeeping and the collector statistics. Statement and
//! expression visitors live in [`crate::exec`]; this module holds the
//! state and the lookups they share.
//!
//! The current environment and the active receiver are the only cursors
//! that change while evaluating. Every nested execution goes through a
//! [`ScopedInterpreter`] guard, which restores both when it is dropped,
//! on error paths included.

mod builder;
mod scope_guard;

use std::path::PathBuf;
use std::rc::Rc;

use gumus_diagnostic::Diagnostic;
use gumus_ir::{Distance, RECEIVER_NAME};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::debug::DebugHook;
use crate::diagnostics::{CallStack, EvalCounters};
use crate::errors::{stale_handle, undefined_function, undefined_variable, EvalResult};
use crate::gc::GcStats;
use crate::heap::Heap;
use crate::print_handler::SharedPrintHandler;
use crate::suggest::suggest_similar;
use crate::value::{
    EnvRef, FunctionObject, HeapObject, NativeFn, NativeFunction, ObjRef, Value,
};

pub use builder::{InterpreterBuilder, DEFAULT_SEARCH_PATHS};
pub use scope_guard::ScopedInterpreter;

/// Interpreter state shared by every evaluation step.
pub struct Interpreter {
    pub(crate) heap: Heap,
    pub(crate) globals: EnvRef,
    /// Current environment.
    pub(crate) env: EnvRef,
    /// Natives and top-level functions, looked up after the globals.
    pub(crate) functions: FxHashMap<String, Value>,
    /// `modül` environments by name.
    pub(crate) modules: FxHashMap<String, EnvRef>,
    /// Instance the executing method is bound to.
    pub(crate) receiver: Option<ObjRef>,
    /// Environment and receiver saved by each live scope guard.
    pub(crate) saved_frames: Vec<(EnvRef, Option<ObjRef>)>,
    pub(crate) call_stack: CallStack,
    pub(crate) counters: EvalCounters,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) search_paths: Vec<PathBuf>,
    pub(crate) loaded_files: FxHashSet<String>,
    /// Diagnostics raised while including files, drained by the driver.
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) debug: Option<DebugHook>,
    /// Explicitly pinned objects, with a pin count.
    pub(crate) roots: FxHashMap<ObjRef, usize>,
    pub(crate) gc_stats: GcStats,
    pub(crate) rng_state: u64,
}

impl Interpreter {
    /// Interpreter with stdout output and the core natives.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    #[inline]
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    #[inline]
    pub fn globals(&self) -> EnvRef {
        self.globals
    }

    #[inline]
    pub fn current_env(&self) -> EnvRef {
        self.env
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    #[inline]
    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    #[inline]
    pub fn counters(&self) -> &EvalCounters {
        &self.counters
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Put `dir` in front of the include search paths.
    pub fn prepend_search_path(&mut self, dir: impl Into<PathBuf>) {
        self.search_paths.insert(0, dir.into());
    }

    /// Display string of a value.
    pub fn display(&self, value: &Value) -> String {
        self.heap.display(value)
    }

    /// Read a global variable or a function table entry.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.heap
            .env(self.globals)
            .ok()
            .and_then(|env| env.get(name).cloned())
            .or_else(|| self.functions.get(name).cloned())
    }

    pub fn define_global(&mut self, name: impl Into<String>, value: Value) -> EvalResult<()> {
        self.heap.define(self.globals, name, value)
    }

    /// Register a native in the function table.
    pub fn register_native(&mut self, name: &str, arity: usize, func: NativeFn) {
        let native = NativeFunction {
            name: Rc::from(name),
            arity,
            func,
            receiver: None,
        };
        let handle = self.heap.alloc(HeapObject::Native(native));
        self.functions.insert(name.to_owned(), Value::Function(handle));
    }

    /// Diagnostics buffered since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Whether `dahil_et` already loaded `name`.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded_files.contains(name)
    }

    /// JSON dump of the globals frame, as printed by `--dump-memory`.
    pub fn globals_json(&self) -> String {
        self.heap.env_json(self.globals)
    }

    /// Forget any half-finished call after an aborted REPL line.
    pub fn reset_after_error(&mut self) {
        self.call_stack.clear();
        self.saved_frames.clear();
        self.env = self.globals;
        self.receiver = None;
    }

    // Name lookup

    /// Resolved names read the frame at their distance; everything else
    /// falls back to the globals, then the function table.
    fn lookup(&self, name: &str, distance: &Distance) -> EvalResult<Option<Value>> {
        if let Some(hops) = distance.get() {
            if let Some(value) = self.heap.get_at(self.env, hops, name)? {
                return Ok(Some(value));
            }
        }
        if let Some(value) = self.heap.env(self.globals)?.get(name) {
            return Ok(Some(value.clone()));
        }
        Ok(self.functions.get(name).cloned())
    }

    pub(crate) fn lookup_variable(&self, name: &str, distance: &Distance) -> EvalResult {
        match self.lookup(name, distance)? {
            Some(value) => Ok(value),
            None => Err(undefined_variable(name).with_suggestion(self.suggest_name(name))),
        }
    }

    /// Same as [`Self::lookup_variable`], reported as a missing function.
    pub(crate) fn lookup_callee(&self, name: &str, distance: &Distance) -> EvalResult {
        match self.lookup(name, distance)? {
            Some(value) => Ok(value),
            None => Err(undefined_function(name).with_suggestion(self.suggest_name(name))),
        }
    }

    /// Closest known name: function table, globals, then the current
    /// environment chain.
    pub(crate) fn suggest_name(&self, name: &str) -> Option<String> {
        let mut candidates: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        for env in self.heap.env_chain(self.env) {
            if let Ok(frame) = self.heap.env(env) {
                candidates.extend(frame.names());
            }
        }
        if let Ok(globals) = self.heap.env(self.globals) {
            candidates.extend(globals.names());
        }
        suggest_similar(name, candidates).map(str::to_owned)
    }

    // Classes

    /// Find `name` on `class` or its ancestors.
    pub(crate) fn find_method(&self, class: ObjRef, name: &str) -> EvalResult<Option<ObjRef>> {
        let mut current = Some(class);
        while let Some(handle) = current {
            let class = self.heap.class(handle)?;
            if let Some(method) = class.methods.get(name) {
                return Ok(Some(*method));
            }
            current = class.superclass;
        }
        Ok(None)
    }

    /// Bind `method` to `instance`: a copy of the function whose closure
    /// is a fresh frame holding `öz`.
    pub(crate) fn bind_method(
        &mut self,
        method: ObjRef,
        instance: ObjRef,
    ) -> EvalResult<FunctionObject> {
        let HeapObject::Function(function) = self.heap.object(method)? else {
            return Err(stale_handle());
        };
        let function = function.clone();
        let env = self.heap.new_env("Baglam:oz", Some(function.closure));
        self.heap.define(env, RECEIVER_NAME, Value::Instance(instance))?;
        Ok(FunctionObject {
            decl: function.decl,
            closure: env,
        })
    }

    /// The instance a closure was bound to, if it is a bound method.
    pub(crate) fn bound_receiver(&self, closure: EnvRef) -> Option<ObjRef> {
        match self.heap.env(closure).ok()?.get(RECEIVER_NAME)? {
            Value::Instance(instance) => Some(*instance),
            _ => None,
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
