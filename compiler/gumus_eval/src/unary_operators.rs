//! Unary operators.

use gumus_ir::UnaryOp;

use crate::errors::{integer_overflow, invalid_unary_op, EvalResult};
use crate::value::Value;

/// Evaluate `-operand` or `!operand`.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Neg, Value::Int(n)) => n.checked_neg().map(Value::Int).ok_or_else(integer_overflow),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Neg, _) => Err(invalid_unary_op(op.as_symbol(), operand)),
        (UnaryOp::Not, _) => Ok(Value::Bool(!operand.is_truthy())),
    }
}
