//! Binary operators.
//!
//! The operand types are a fixed set, so dispatch is a match on the pair
//! of operands. Only `+` with a string operand needs the heap, to render
//! the other side.

use gumus_ir::BinaryOp;

use crate::errors::{
    division_by_zero, integer_overflow, invalid_binary_op, modulo_by_zero, EvalResult,
};
use crate::heap::Heap;
use crate::value::Value;

#[expect(
    clippy::cast_precision_loss,
    reason = "int/float arithmetic promotes the integer like C does"
)]
#[inline]
pub(crate) fn int_to_float(n: i64) -> f64 {
    n as f64
}

#[inline]
fn checked(result: Option<i64>) -> EvalResult {
    result.map(Value::Int).ok_or_else(integer_overflow)
}

/// Evaluate `left op right`.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value, heap: &Heap) -> EvalResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => return Ok(Value::Bool(left != right)),
        BinaryOp::Add if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) => {
            let mut joined = heap.display(left);
            joined.push_str(&heap.display(right));
            return Ok(Value::string(joined));
        }
        _ => {}
    }

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(op, *a, *b),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(op, *a, *b),
        (Value::Int(a), Value::Float(b)) => eval_float_binary(op, int_to_float(*a), *b),
        (Value::Float(a), Value::Int(b)) => eval_float_binary(op, *a, int_to_float(*b)),
        (Value::Str(a), Value::Str(b)) => match compare(op, a, b) {
            Some(result) => Ok(Value::Bool(result)),
            None => Err(invalid_binary_op(op, left, right)),
        },
        _ => Err(invalid_binary_op(op, left, right)),
    }
}

fn eval_int_binary(op: BinaryOp, a: i64, b: i64) -> EvalResult {
    match op {
        BinaryOp::Add => checked(a.checked_add(b)),
        BinaryOp::Sub => checked(a.checked_sub(b)),
        BinaryOp::Mul => checked(a.checked_mul(b)),
        BinaryOp::Div if b == 0 => Err(division_by_zero()),
        BinaryOp::Div => checked(a.checked_div(b)),
        BinaryOp::Mod if b == 0 => Err(modulo_by_zero()),
        BinaryOp::Mod => checked(a.checked_rem(b)),
        _ => Ok(Value::Bool(compare(op, &a, &b).unwrap_or(false))),
    }
}

fn eval_float_binary(op: BinaryOp, a: f64, b: f64) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div if b == 0.0 => Err(division_by_zero()),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::Mod if b == 0.0 => Err(modulo_by_zero()),
        BinaryOp::Mod => Ok(Value::Float(a % b)),
        _ => Ok(Value::Bool(compare(op, &a, &b).unwrap_or(false))),
    }
}

/// Ordering comparisons. `None` for non-comparison operators.
fn compare<T: PartialOrd + ?Sized>(op: BinaryOp, a: &T, b: &T) -> Option<bool> {
    match op {
        BinaryOp::Lt => Some(a < b),
        BinaryOp::LtEq => Some(a <= b),
        BinaryOp::Gt => Some(a > b),
        BinaryOp::GtEq => Some(a >= b),
        _ => None,
    }
}
