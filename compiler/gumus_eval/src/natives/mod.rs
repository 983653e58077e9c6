//! Core native functions.
//!
//! Natives live in the function table, so a global variable of the same
//! name shadows them. Each native takes a fixed number of arguments;
//! arity is checked by the caller. Natives that receive the wrong kind of
//! value return a neutral result (`0`, `""`, `yanlış`) instead of
//! raising, except `firlat`, whose whole purpose is to raise.

mod include;
pub(crate) mod property_handlers;

use std::cmp::Ordering;
use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::errors::{EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::operators::int_to_float;
use crate::value::{NativeCall, NativeFn, Value};

/// Name, arity and implementation of every core native.
const CORE_NATIVES: &[(&str, usize, NativeFn)] = &[
    ("metin", 1, metin),
    ("uzunluk", 1, uzunluk),
    ("sayi", 1, sayi),
    ("sayı", 1, sayi),
    ("tip", 1, tip),
    ("girdi", 0, girdi),
    ("zaman", 0, zaman),
    ("bekle", 1, bekle),
    ("ekle", 2, ekle),
    ("sil", 2, sil),
    ("sirala", 1, sirala),
    ("karekok", 1, karekok),
    ("rastgele", 0, rastgele),
    ("dosya_oku", 1, dosya_oku),
    ("dosya_yaz", 2, dosya_yaz),
    ("dosya_ekle", 2, dosya_ekle),
    ("firlat", 1, firlat),
    ("dahil_et", 1, dahil_et),
];

pub fn register_core_natives(interpreter: &mut Interpreter) {
    for &(name, arity, func) in CORE_NATIVES {
        interpreter.register_native(name, arity, func);
    }
    tracing::debug!(count = CORE_NATIVES.len(), "registered core natives");
}

/// Integer prefix of `text` the way C's `stoi` reads it: leading
/// whitespace, an optional sign, then digits. `None` without digits or
/// on overflow.
pub(crate) fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }
    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation toward zero is the conversion sayi() performs"
)]
pub(crate) fn float_to_int(x: f64) -> i64 {
    x as i64
}

/// Number of items in a string, list or map; 0 for anything else.
pub(crate) fn length_of(interpreter: &Interpreter, value: &Value) -> EvalResult<usize> {
    Ok(match value {
        Value::Str(s) => s.chars().count(),
        Value::List(list) => interpreter.heap.list(*list)?.len(),
        Value::Map(map) => interpreter.heap.map(*map)?.len(),
        _ => 0,
    })
}

pub(crate) fn usize_value(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

// Conversion and inspection

fn metin(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    Ok(Value::string(interpreter.display(&call.arg(0))))
}

fn uzunluk(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    length_of(interpreter, &call.arg(0)).map(usize_value)
}

fn sayi(_: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    Ok(Value::Int(match call.arg(0) {
        Value::Str(s) => parse_int_prefix(&s).unwrap_or(0),
        Value::Int(n) => n,
        Value::Float(x) => float_to_int(x),
        Value::Bool(b) => i64::from(b),
        _ => 0,
    }))
}

fn tip(_: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    Ok(Value::string(call.arg(0).type_name()))
}

// Console and time

fn girdi(interpreter: &mut Interpreter, _: &NativeCall<'_>) -> EvalResult {
    interpreter.print_handler.flush();
    let mut line = String::new();
    // End of input reads as an empty line.
    let _ = std::io::stdin().lock().read_line(&mut line);
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Value::string(trimmed))
}

fn zaman(_: &mut Interpreter, _: &NativeCall<'_>) -> EvalResult {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());
    Ok(Value::Int(i64::try_from(secs).unwrap_or(i64::MAX)))
}

fn bekle(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    if let Value::Int(ms) = call.arg(0) {
        if let Ok(ms) = u64::try_from(ms) {
            interpreter.print_handler.flush();
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
    Ok(Value::Nil)
}

// Lists

fn ekle(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let target = call.arg(0);
    let Value::List(list) = target else {
        return Ok(Value::Int(0));
    };
    interpreter.heap.list_mut(list)?.push(call.arg(1));
    Ok(target)
}

fn sil(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let target = call.arg(0);
    let (Value::List(list), Value::Int(index)) = (&target, call.arg(1)) else {
        return Ok(Value::Int(0));
    };
    let items = interpreter.heap.list_mut(*list)?;
    if let Some(index) = usize::try_from(index).ok().filter(|&i| i < items.len()) {
        items.remove(index);
    }
    Ok(target)
}

/// Sort rank of a value's kind: numbers, strings, then everything else.
fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Int(_) | Value::Float(_) => 0,
        Value::Str(_) => 1,
        Value::Bool(_) => 2,
        Value::Nil => 3,
        _ => 4,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    let as_number = |v: &Value| match v {
        Value::Int(n) => Some(int_to_float(*n)),
        Value::Float(x) => Some(*x),
        _ => None,
    };
    kind_rank(a).cmp(&kind_rank(b)).then_with(|| match (a, b) {
        (Value::Str(x), Value::Str(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
    })
}

fn sirala(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let target = call.arg(0);
    if let Value::List(list) = target {
        interpreter.heap.list_mut(list)?.sort_by(compare_values);
    }
    Ok(target)
}

// Math

fn karekok(_: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    Ok(match call.arg(0) {
        Value::Int(n) => Value::Int(float_to_int(int_to_float(n).sqrt())),
        Value::Float(x) => Value::Float(x.sqrt()),
        _ => Value::Int(0),
    })
}

/// xorshift64; the state is seeded when the interpreter is built.
fn rastgele(interpreter: &mut Interpreter, _: &NativeCall<'_>) -> EvalResult {
    let mut x = interpreter.rng_state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    interpreter.rng_state = x;
    Ok(Value::Int(i64::try_from(x >> 33).unwrap_or(0) & i64::from(i32::MAX)))
}

// Files

fn dosya_oku(_: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let contents = match call.arg(0) {
        Value::Str(path) => std::fs::read_to_string(&*path).unwrap_or_default(),
        _ => String::new(),
    };
    Ok(Value::string(contents))
}

fn dosya_yaz(_: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let (Value::Str(path), Value::Str(contents)) = (call.arg(0), call.arg(1)) else {
        return Ok(Value::Bool(false));
    };
    Ok(Value::Bool(std::fs::write(&*path, contents.as_bytes()).is_ok()))
}

fn dosya_ekle(_: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let (Value::Str(path), Value::Str(contents)) = (call.arg(0), call.arg(1)) else {
        return Ok(Value::Bool(false));
    };
    let appended = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&*path)
        .and_then(|mut file| file.write_all(contents.as_bytes()));
    Ok(Value::Bool(appended.is_ok()))
}

// Control

fn firlat(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let value = call.arg(0);
    let display = interpreter.display(&value);
    Err(EvalError::thrown(value, display))
}

fn dahil_et(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    match call.arg(0) {
        Value::Str(name) => interpreter.include(&name).map(Value::Bool),
        _ => Ok(Value::Bool(false)),
    }
}
