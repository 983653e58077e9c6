//! Call tracking for the evaluator.
//!
//! - `CallStack`: display names of the active calls, with the depth limit
//! - `EvalCounters`: statement and call counts reported by the driver

use crate::errors::{call_depth_exceeded, EvalError};

/// Default limit on nested calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// One active call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// `f`, `yerleşik:metin` or `Sinif::kurucu`.
    pub name: String,
    /// Line of the call expression.
    pub line: u32,
}

/// Live call stack.
///
/// Every call pushes a frame and pops it on every exit path. The depth
/// check is part of `push`, so runaway recursion becomes a runtime error
/// instead of a native stack overflow.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame. The frame is not pushed when the limit is hit.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(call_depth_exceeded(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn current_frame(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    /// Frame names, most recent call first.
    pub fn backtrace(&self) -> Vec<String> {
        self.frames.iter().rev().map(|f| f.name.clone()).collect()
    }

    /// Drop every frame. Used when a REPL line aborts mid-call.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CALL_DEPTH)
    }
}

/// Counters reported by the driver's `--debug` summary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalCounters {
    pub statements_executed: u64,
    pub function_calls: u64,
    pub native_calls: u64,
}

impl EvalCounters {
    #[inline]
    pub fn count_statement(&mut self) {
        self.statements_executed = self.statements_executed.wrapping_add(1);
    }

    #[inline]
    pub fn count_function_call(&mut self) {
        self.function_calls = self.function_calls.wrapping_add(1);
    }

    #[inline]
    pub fn count_native_call(&mut self) {
        self.native_calls = self.native_calls.wrapping_add(1);
    }
}
