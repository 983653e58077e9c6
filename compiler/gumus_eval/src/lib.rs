//! Gumus Eval - tree-walking evaluator for GümüşDil.
//!
//! Runs resolved statement lists produced by `gumus_parse` and
//! `gumus_resolve`.
//!
//! # Architecture
//!
//! - `Heap`: generation-checked arenas for heap objects and environment
//!   frames; values refer to both through copyable handles
//! - `Interpreter`: run-time state plus the statement and expression
//!   visitors in `exec`
//! - `ScopedInterpreter`: restores the current environment and receiver
//!   on every exit path
//! - `evaluate_binary` / `evaluate_unary`: operator dispatch on value kinds
//! - `natives`: the core native functions and string/list/map methods
//! - `gc`: explicit mark-and-sweep collection and heap diagnostics
//! - `debug`: the line-stepping debug protocol

mod arena;
mod debug;
mod diagnostics;
mod environment;
pub mod errors;
pub mod exec;
mod gc;
mod heap;
pub mod interpreter;
mod natives;
mod operators;
mod print_handler;
mod suggest;
mod unary_operators;
pub mod value;

pub use arena::{Arena, Handle};
pub use debug::{DebugCommand, DebugHook};
pub use diagnostics::{CallFrame, CallStack, EvalCounters, DEFAULT_MAX_CALL_DEPTH};
pub use environment::Environment;
pub use errors::{EvalError, EvalResult, ExecStatus};
pub use gc::{CollectionReport, GcStats};
pub use heap::Heap;
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter, DEFAULT_SEARCH_PATHS};
pub use natives::register_core_natives;
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use suggest::{edit_distance, suggest_similar};
pub use unary_operators::evaluate_unary;
pub use value::{format_float, EnvRef, HeapObject, ObjRef, Value};

#[cfg(test)]
mod tests;
