//! Expression evaluation.

use std::collections::BTreeMap;

use gumus_ir::{Distance, Expr, ExprKind, Literal, LogicalOp, RECEIVER_NAME};
use gumus_stack::ensure_sufficient_stack;

use crate::errors::{undefined_variable, EvalResult};
use crate::interpreter::Interpreter;
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::value::Value;

impl Interpreter {
    /// Evaluate one expression.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.evaluate_inner(expr)).map_err(|err| err.or_line(expr.line))
    }

    fn evaluate_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(literal_value(literal)),
            ExprKind::Binary { left, op, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                evaluate_binary(*op, &left, &right, &self.heap)
            }
            ExprKind::Logical { left, op, right } => {
                let left = self.evaluate(left)?;
                let decided = match op {
                    LogicalOp::And => !left.is_truthy(),
                    LogicalOp::Or => left.is_truthy(),
                };
                if decided {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.evaluate(operand)?;
                evaluate_unary(*op, &operand)
            }
            ExprKind::Variable { name, distance } => self.lookup_variable(name, distance),
            ExprKind::Assign {
                name,
                value,
                distance,
            } => {
                let value = self.evaluate(value)?;
                self.assign_variable(name, distance, value.clone())?;
                Ok(value)
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args, expr.line),
            ExprKind::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.evaluate(item)?);
                }
                Ok(self.heap.alloc_list(values))
            }
            ExprKind::Map(entries) => {
                let mut map = BTreeMap::new();
                for (key, value) in entries {
                    let key = self.evaluate(key)?;
                    let value = self.evaluate(value)?;
                    map.insert(self.heap.display(&key), value);
                }
                Ok(self.heap.alloc_map(map))
            }
            ExprKind::IndexGet { object, index } => self.eval_index_get(object, index),
            ExprKind::IndexSet {
                object,
                index,
                value,
            } => self.eval_index_set(object, index, value),
            ExprKind::Get { object, name } => {
                let object = self.evaluate(object)?;
                self.get_property(&object, name)
            }
            ExprKind::Set {
                object,
                name,
                value,
            } => self.eval_set(object, name, value),
            ExprKind::This { distance } => self.lookup_variable(RECEIVER_NAME, distance),
            ExprKind::Super { method, distance } => self.eval_super(method, distance),
            ExprKind::Scope { module, member } => self.eval_scope(module, member),
        }
    }

    /// Resolved targets are written at their distance. Unresolved ones
    /// must already exist in the globals.
    fn assign_variable(&mut self, name: &str, distance: &Distance, value: Value) -> EvalResult<()> {
        if let Some(hops) = distance.get() {
            return self.heap.assign_at(self.env, hops, name, value);
        }
        let globals = self.heap.env_mut(self.globals)?;
        if globals.assign(name, value) {
            Ok(())
        } else {
            Err(undefined_variable(name).with_suggestion(self.suggest_name(name)))
        }
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Int(n) => Value::Int(*n),
        Literal::Float(x) => Value::Float(*x),
        Literal::Str(s) => Value::string(s.as_str()),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Nil => Value::Nil,
    }
}
