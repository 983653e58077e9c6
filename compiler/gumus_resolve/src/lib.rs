//! Scope-distance resolution.
//!
//! A static pass over a parsed unit that records, for every variable,
//! assignment, `öz` and `ata` reference, how many scopes separate it from
//! its binding. The evaluator then walks exactly that many environment
//! frames instead of searching by name.
//!
//! The scope stack mirrors the environments the evaluator creates:
//!
//! | Construct | Scopes |
//! |---|---|
//! | block `{ }` | one |
//! | function body | one, holding the parameters |
//! | for loop | one around init, condition, increment and body |
//! | `deneme`/`yakala` | one holding the error name around the handler |
//! | `modül` | one around the body |
//! | class | `ata` (subclasses only), then `öz`, then each method |
//!
//! Names declared at the top level are never put on the stack: they
//! stay unresolved and are looked up in the globals at run time. The
//! pass reports no errors.

use gumus_ir::{
    ClassDecl, Distance, Expr, ExprKind, FunctionDecl, Stmt, StmtKind, RECEIVER_NAME, SUPER_NAME,
};
use gumus_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

/// Binding state within one scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BindingState {
    /// Declared, initializer still being resolved.
    Declared,
    Defined,
}

/// Counts of references resolved in one pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    /// References bound to an enclosing scope.
    pub local: usize,
    /// References left for global lookup.
    pub global: usize,
}

/// Resolve every statement of a unit.
#[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
pub fn resolve(statements: &[Stmt]) -> ResolveSummary {
    let mut resolver = Resolver::new();
    resolver.resolve_stmts(statements);
    tracing::debug!(
        local = resolver.summary.local,
        global = resolver.summary.global,
        "resolved"
    );
    resolver.summary
}

/// Resolver state: the stack of open scopes.
#[derive(Default)]
pub struct Resolver {
    scopes: Vec<FxHashMap<String, BindingState>>,
    summary: ResolveSummary,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> ResolveSummary {
        self.summary
    }

    pub fn resolve_stmts(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.resolve_stmt(stmt);
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn scoped(&mut self, f: impl FnOnce(&mut Self)) {
        self.begin_scope();
        f(self);
        self.end_scope();
    }

    fn declare(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_owned(), BindingState::Declared);
        }
    }

    fn define(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_owned(), BindingState::Defined);
        }
    }

    /// Record the distance to the innermost defined binding of `name`.
    ///
    /// A binding that is only declared is skipped, so an initializer
    /// sees the outer binding of the name it is initializing.
    fn resolve_local(&mut self, distance: &Distance, name: &str) {
        for (hops, scope) in self.scopes.iter().rev().enumerate() {
            if scope.get(name) == Some(&BindingState::Defined) {
                distance.set(u32::try_from(hops).unwrap_or(u32::MAX));
                self.summary.local += 1;
                return;
            }
        }
        distance.clear();
        self.summary.global += 1;
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        ensure_sufficient_stack(|| self.resolve_stmt_inner(stmt));
    }

    fn resolve_stmt_inner(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Expression(expr) | StmtKind::Print(expr) => self.resolve_expr(expr),
            StmtKind::Block(stmts) => self.scoped(|r| r.resolve_stmts(stmts)),
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            StmtKind::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }
            StmtKind::For {
                initializer,
                condition,
                increment,
                body,
            } => self.scoped(|r| {
                if let Some(init) = initializer {
                    r.resolve_stmt(init);
                }
                if let Some(cond) = condition {
                    r.resolve_expr(cond);
                }
                if let Some(incr) = increment {
                    r.resolve_expr(incr);
                }
                r.resolve_stmt(body);
            }),
            StmtKind::Break | StmtKind::Continue => {}
            StmtKind::Function(decl) => {
                self.declare(&decl.name);
                self.define(&decl.name);
                self.resolve_function(decl);
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
            StmtKind::Var { name, initializer } => {
                self.declare(name);
                if let Some(init) = initializer {
                    self.resolve_expr(init);
                }
                self.define(name);
            }
            StmtKind::Class(class) => self.resolve_class(class),
            StmtKind::TryCatch {
                body,
                error_name,
                handler,
            } => {
                self.resolve_stmt(body);
                self.scoped(|r| {
                    r.define(error_name);
                    r.resolve_stmt(handler);
                });
            }
            StmtKind::Module { body, .. } => self.scoped(|r| r.resolve_stmts(body)),
        }
    }

    fn resolve_function(&mut self, decl: &FunctionDecl) {
        self.scoped(|r| {
            for param in &decl.params {
                r.define(param);
            }
            r.resolve_stmts(&decl.body);
        });
    }

    fn resolve_class(&mut self, class: &ClassDecl) {
        self.declare(&class.name);
        self.define(&class.name);

        let Some(superclass) = &class.superclass else {
            self.resolve_methods(class);
            return;
        };
        self.resolve_expr(superclass);
        self.scoped(|r| {
            r.define(SUPER_NAME);
            r.resolve_methods(class);
        });
    }

    fn resolve_methods(&mut self, class: &ClassDecl) {
        self.scoped(|r| {
            r.define(RECEIVER_NAME);
            for method in &class.methods {
                r.resolve_function(method);
            }
        });
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        ensure_sufficient_stack(|| self.resolve_expr_inner(expr));
    }

    fn resolve_expr_inner(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Literal(_) | ExprKind::Scope { .. } => {}
            ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand),
            ExprKind::Variable { name, distance } => self.resolve_local(distance, name),
            ExprKind::Assign {
                name,
                value,
                distance,
            } => {
                self.resolve_expr(value);
                self.resolve_local(distance, name);
            }
            ExprKind::Call { callee, args } => {
                self.resolve_expr(callee);
                for arg in args {
                    self.resolve_expr(arg);
                }
            }
            ExprKind::List(items) => {
                for item in items {
                    self.resolve_expr(item);
                }
            }
            ExprKind::Map(entries) => {
                for (key, value) in entries {
                    self.resolve_expr(key);
                    self.resolve_expr(value);
                }
            }
            ExprKind::IndexGet { object, index } => {
                self.resolve_expr(object);
                self.resolve_expr(index);
            }
            ExprKind::IndexSet {
                object,
                index,
                value,
            } => {
                self.resolve_expr(object);
                self.resolve_expr(index);
                self.resolve_expr(value);
            }
            ExprKind::Get { object, .. } => self.resolve_expr(object),
            ExprKind::Set { object, value, .. } => {
                self.resolve_expr(value);
                self.resolve_expr(object);
            }
            ExprKind::This { distance } => self.resolve_local(distance, RECEIVER_NAME),
            ExprKind::Super { distance, .. } => self.resolve_local(distance, SUPER_NAME),
        }
    }
}
