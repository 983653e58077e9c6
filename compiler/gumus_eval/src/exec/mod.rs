//! Statement and expression visitors.
//!
//! - `stmt`: statements, returning an [`ExecStatus`]
//! - `expr`: expressions, returning a [`Value`]
//! - `call`: calls, instantiation, natives
//! - `access`: properties, indexing, `ata`, `Modul::uye`
//!
//! Both visitors run under [`ensure_sufficient_stack`] and stamp the line
//! of the node onto errors that do not carry one yet.
//!
//! [`Value`]: crate::Value

mod access;
mod call;
mod expr;
mod stmt;

use gumus_ir::Stmt;

use crate::errors::{EvalResult, ExecStatus};
use crate::interpreter::Interpreter;

impl Interpreter {
    /// Run a resolved program unit against the current environment.
    ///
    /// Stops at the first error. `dön`, `kır` and `devam` outside any
    /// function or loop end the statement they appear in and nothing
    /// else.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
    pub fn interpret(&mut self, statements: &[Stmt]) -> EvalResult<()> {
        for stmt in statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    /// Execute statements in the current environment until one completes
    /// abnormally.
    pub(crate) fn run_body(&mut self, statements: &[Stmt]) -> EvalResult<ExecStatus> {
        for stmt in statements {
            match self.execute(stmt)? {
                ExecStatus::Normal => {}
                status => return Ok(status),
            }
        }
        Ok(ExecStatus::Normal)
    }
}
