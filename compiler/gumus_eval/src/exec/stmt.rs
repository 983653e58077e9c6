//! Statement execution.

use std::rc::Rc;

use gumus_ir::{ClassDecl, Expr, SharedFunction, Stmt, StmtKind};
use gumus_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use crate::errors::{superclass_not_class, EvalError, EvalResult, ExecStatus};
use crate::interpreter::Interpreter;
use crate::value::{ClassObject, FunctionObject, HeapObject, Value};

impl Interpreter {
    /// Execute one statement.
    pub fn execute(&mut self, stmt: &Stmt) -> EvalResult<ExecStatus> {
        ensure_sufficient_stack(|| self.execute_inner(stmt)).map_err(|err| err.or_line(stmt.line))
    }

    fn execute_inner(&mut self, stmt: &Stmt) -> EvalResult<ExecStatus> {
        self.counters.count_statement();
        if self.debug.is_some() {
            self.debug_step(stmt.line)?;
        }

        match &stmt.kind {
            StmtKind::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(ExecStatus::Normal)
            }
            StmtKind::Print(expr) => {
                let value = self.evaluate(expr)?;
                let text = self.heap.display(&value);
                self.print_handler.println(&text);
                Ok(ExecStatus::Normal)
            }
            StmtKind::Block(stmts) => {
                let env = self.heap.new_env("Blok", Some(self.env));
                self.enter(env).run_body(stmts)
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(ExecStatus::Normal)
                }
            }
            StmtKind::While { condition, body } => self.exec_while(condition, body),
            StmtKind::For {
                initializer,
                condition,
                increment,
                body,
            } => self.exec_for(
                initializer.as_deref(),
                condition.as_ref(),
                increment.as_ref(),
                body,
            ),
            StmtKind::Break => Ok(ExecStatus::Break),
            StmtKind::Continue => Ok(ExecStatus::Continue),
            StmtKind::Function(decl) => {
                self.declare_function(decl)?;
                Ok(ExecStatus::Normal)
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Ok(ExecStatus::Return(value))
            }
            StmtKind::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.heap.define(self.env, name.clone(), value)?;
                Ok(ExecStatus::Normal)
            }
            StmtKind::Class(class) => {
                self.declare_class(class)?;
                Ok(ExecStatus::Normal)
            }
            StmtKind::TryCatch {
                body,
                error_name,
                handler,
            } => self.exec_try(body, error_name, handler),
            StmtKind::Module { name, body } => {
                let env = self.heap.new_env(format!("Modul:{name}"), Some(self.globals));
                self.modules.insert(name.clone(), env);
                tracing::debug!(module = %name, "module");
                self.enter(env).run_body(body)
            }
        }
    }

    fn exec_while(&mut self, condition: &Expr, body: &Stmt) -> EvalResult<ExecStatus> {
        while self.evaluate(condition)?.is_truthy() {
            match self.execute(body)? {
                ExecStatus::Break => break,
                ExecStatus::Normal | ExecStatus::Continue => {}
                status @ ExecStatus::Return(_) => return Ok(status),
            }
        }
        Ok(ExecStatus::Normal)
    }

    /// `her` loop. The loop variable lives in a `Dongu` frame around the
    /// whole loop; `devam` still runs the increment.
    fn exec_for(
        &mut self,
        initializer: Option<&Stmt>,
        condition: Option<&Expr>,
        increment: Option<&Expr>,
        body: &Stmt,
    ) -> EvalResult<ExecStatus> {
        let env = self.heap.new_env("Dongu", Some(self.env));
        let mut scoped = self.enter(env);
        if let Some(init) = initializer {
            scoped.execute(init)?;
        }
        loop {
            if let Some(condition) = condition {
                if !scoped.evaluate(condition)?.is_truthy() {
                    break;
                }
            }
            match scoped.execute(body)? {
                ExecStatus::Break => break,
                ExecStatus::Normal | ExecStatus::Continue => {}
                status @ ExecStatus::Return(_) => return Ok(status),
            }
            if let Some(increment) = increment {
                scoped.evaluate(increment)?;
            }
        }
        Ok(ExecStatus::Normal)
    }

    /// `deneme { } yakala (ad) { }`. A system error binds its message, a
    /// thrown value binds itself; a debugger stop is never caught.
    fn exec_try(
        &mut self,
        body: &Stmt,
        error_name: &str,
        handler: &Stmt,
    ) -> EvalResult<ExecStatus> {
        let caught = match self.execute(body) {
            Ok(status) => return Ok(status),
            Err(EvalError::Stopped) => return Err(EvalError::Stopped),
            Err(EvalError::Runtime { message, .. }) => Value::string(message),
            Err(EvalError::Thrown { value, .. }) => value,
        };
        let env = self.heap.new_env("HataYakalama", Some(self.env));
        self.heap.define(env, error_name, caught)?;
        self.enter(env).execute(handler)
    }

    fn declare_function(&mut self, decl: &SharedFunction) -> EvalResult<()> {
        let function = FunctionObject {
            decl: Rc::clone(decl),
            closure: self.env,
        };
        let value = Value::Function(self.heap.alloc(HeapObject::Function(function)));
        if self.env == self.globals {
            self.functions.insert(decl.name.clone(), value.clone());
        }
        self.heap.define(self.env, decl.name.clone(), value)
    }

    fn declare_class(&mut self, class: &ClassDecl) -> EvalResult<()> {
        let superclass = match &class.superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(handle) => Some(handle),
                _ => return Err(superclass_not_class().or_line(expr.line)),
            },
            None => None,
        };
        self.heap.define(self.env, class.name.clone(), Value::Nil)?;

        let method_env = match superclass {
            Some(handle) => {
                let env = self.heap.new_env("SinifAta", Some(self.env));
                self.heap
                    .define(env, gumus_ir::SUPER_NAME, Value::Class(handle))?;
                env
            }
            None => self.env,
        };

        let mut methods = FxHashMap::default();
        for method in &class.methods {
            let function = FunctionObject {
                decl: Rc::clone(method),
                closure: method_env,
            };
            let handle = self.heap.alloc(HeapObject::Function(function));
            methods.insert(method.name.clone(), handle);
        }

        let object = ClassObject {
            name: Rc::from(class.name.as_str()),
            superclass,
            methods,
        };
        let handle = self.heap.alloc(HeapObject::Class(object));
        tracing::debug!(class = %class.name, methods = class.methods.len(), "class");
        self.heap.define(self.env, class.name.clone(), Value::Class(handle))
    }
}
