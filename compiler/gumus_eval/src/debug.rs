//! Line-stepping debug protocol.
//!
//! With a hook attached, every statement first emits a line event. While
//! stepping, the hook then blocks on its control stream until it reads a
//! command that lets execution continue.

use std::fmt;
use std::io::{self, BufRead};

use crate::errors::{EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

const EVENT_PREFIX: &str = "__DEBUG_EVENT__";
const DATA_PREFIX: &str = "__DEBUG_DATA__";

/// A command read from the control stream.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum DebugCommand {
    StepOver,
    Continue,
    Vars,
    Stop,
}

impl DebugCommand {
    /// Parse one control line. Unknown lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "STEP_OVER" => Some(DebugCommand::StepOver),
            "CONTINUE" => Some(DebugCommand::Continue),
            "VARS" => Some(DebugCommand::Vars),
            "STOP" => Some(DebugCommand::Stop),
            _ => None,
        }
    }
}

/// Control stream, event output and stepping state of an attached debugger.
pub struct DebugHook {
    input: Box<dyn BufRead>,
    output: SharedPrintHandler,
    stepping: bool,
}

impl DebugHook {
    /// A hook that starts in stepping mode.
    pub fn new(input: Box<dyn BufRead>, output: SharedPrintHandler) -> Self {
        DebugHook {
            input,
            output,
            stepping: true,
        }
    }

    /// Commands from stdin, events to stdout.
    pub fn stdio() -> Self {
        Self::new(Box::new(io::BufReader::new(io::stdin())), stdout_handler())
    }

    #[inline]
    pub fn is_stepping(&self) -> bool {
        self.stepping
    }

    /// Next command, skipping unknown lines. `None` at end of input.
    fn read_command(&mut self) -> Option<DebugCommand> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {
                    if let Some(command) = DebugCommand::parse(&line) {
                        return Some(command);
                    }
                }
            }
        }
    }
}

impl fmt::Debug for DebugHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugHook")
            .field("stepping", &self.stepping)
            .finish_non_exhaustive()
    }
}

impl Interpreter {
    /// Report `line` to the attached hook and wait for it while stepping.
    pub(crate) fn debug_step(&mut self, line: u32) -> EvalResult<()> {
        let Some(mut hook) = self.debug.take() else {
            return Ok(());
        };
        let result = self.drive_hook(&mut hook, line);
        self.debug = Some(hook);
        result
    }

    fn drive_hook(&self, hook: &mut DebugHook, line: u32) -> EvalResult<()> {
        hook.output
            .println(&format!(r#"{EVENT_PREFIX}{{"type": "line", "line": {line}}}"#));
        hook.output.flush();
        while hook.stepping {
            match hook.read_command() {
                Some(DebugCommand::StepOver) => break,
                Some(DebugCommand::Continue) | None => hook.stepping = false,
                Some(DebugCommand::Vars) => {
                    hook.output
                        .println(&format!("{DATA_PREFIX}{}", self.heap.env_json(self.env)));
                    hook.output.flush();
                }
                Some(DebugCommand::Stop) => {
                    tracing::debug!(line, "stopped by debugger");
                    return Err(EvalError::Stopped);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::print_handler::buffer_handler;
    use crate::value::Value;

    fn hook(commands: &str) -> (DebugHook, SharedPrintHandler) {
        let output = buffer_handler();
        let input = Box::new(Cursor::new(commands.to_owned()));
        (DebugHook::new(input, output.clone()), output)
    }

    #[test]
    fn parses_commands() {
        assert_eq!(DebugCommand::parse("STEP_OVER\n"), Some(DebugCommand::StepOver));
        assert_eq!(DebugCommand::parse(" VARS "), Some(DebugCommand::Vars));
        assert_eq!(DebugCommand::parse("step_over"), None);
    }

    #[test]
    fn step_over_emits_one_event_per_call() {
        let (hook, output) = hook("STEP_OVER\nSTEP_OVER\n");
        let mut interpreter = Interpreter::builder().debug_hook(hook).build();
        assert_eq!(interpreter.debug_step(1), Ok(()));
        assert_eq!(interpreter.debug_step(2), Ok(()));
        assert_eq!(
            output.output(),
            "__DEBUG_EVENT__{\"type\": \"line\", \"line\": 1}\n\
             __DEBUG_EVENT__{\"type\": \"line\", \"line\": 2}\n"
        );
    }

    #[test]
    fn end_of_input_stops_stepping() {
        let (hook, _output) = hook("");
        let mut interpreter = Interpreter::builder().debug_hook(hook).build();
        assert_eq!(interpreter.debug_step(1), Ok(()));
        assert!(interpreter.debug.as_ref().is_some_and(|h| !h.is_stepping()));
    }

    #[test]
    fn vars_dumps_the_current_frame() {
        let (hook, output) = hook("garbage\nVARS\nCONTINUE\n");
        let mut interpreter = Interpreter::builder().debug_hook(hook).build();
        assert_eq!(interpreter.define_global("x", Value::Int(7)), Ok(()));
        assert_eq!(interpreter.debug_step(3), Ok(()));
        let text = output.output();
        assert!(text.contains("__DEBUG_DATA__{\"scope\":\"Global\""));
        assert!(text.contains("\"x\":{\"type\":\"Tamsayı\",\"value\":\"7\"}"));
    }

    #[test]
    fn stop_aborts() {
        let (hook, _output) = hook("STOP\n");
        let mut interpreter = Interpreter::builder().debug_hook(hook).build();
        assert_eq!(interpreter.debug_step(1), Err(EvalError::Stopped));
        assert!(interpreter.debug.is_some());
    }
}
