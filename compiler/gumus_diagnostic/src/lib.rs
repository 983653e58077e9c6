//! Diagnostics for the GümüşDil pipeline.
//!
//! Every stage reports failures as a [`Diagnostic`]: a kind, a source
//! line, a message and optionally the file it came from and a name
//! suggestion. Diagnostics leave the process as one JSON object per line
//! (see [`emitter::JsonEmitter`]), which is the format editors and the
//! test harness consume.

mod diagnostic;
pub mod emitter;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use emitter::{CollectingEmitter, DiagnosticEmitter, JsonEmitter};
