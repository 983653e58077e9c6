//! Stack growth for the recursive passes.
//!
//! The parser, the resolver and the evaluator are all plain recursive
//! descents over the AST. A script with deeply nested expressions or a
//! long chain of user function calls would otherwise exhaust the native
//! stack long before the interpreter's own call-depth limit kicks in.
//!
//! Every recursive entry point wraps its body in [`ensure_sufficient_stack`].
//! On native targets this checks the remaining stack and switches to a
//! freshly allocated segment when it runs low.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes of stack left on the current segment, when the platform reports it.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

/// WASM does not expose its stack size.
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
