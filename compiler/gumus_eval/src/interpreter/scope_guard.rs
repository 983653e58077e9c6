//! RAII guard for the interpreter's current environment and receiver.
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`,
//! so code inside a scope calls interpreter methods on the guard as if it
//! were the interpreter. Dropping the guard restores the environment and
//! receiver that were current when it was created, whether the scope
//! ended normally or through `?`.
//!
//! ```text
//! let env = self.heap.new_env("Blok", Some(self.env));
//! let mut scoped = self.enter(env);
//! scoped.run_body(stmts)?;
//! // previous environment restored here
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::value::{EnvRef, ObjRef};

pub struct ScopedInterpreter<'a> {
    interpreter: &'a mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        if let Some((env, receiver)) = self.interpreter.saved_frames.pop() {
            self.interpreter.env = env;
            self.interpreter.receiver = receiver;
        }
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Make `env` current, keeping the active receiver.
    pub fn enter(&mut self, env: EnvRef) -> ScopedInterpreter<'_> {
        let receiver = self.receiver;
        self.enter_call(env, receiver)
    }

    /// Make `env` current with `receiver` as the active receiver.
    pub fn enter_call(&mut self, env: EnvRef, receiver: Option<ObjRef>) -> ScopedInterpreter<'_> {
        self.saved_frames.push((self.env, self.receiver));
        self.env = env;
        self.receiver = receiver;
        ScopedInterpreter { interpreter: self }
    }
}
