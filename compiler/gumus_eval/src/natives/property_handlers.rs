//! Methods on strings, lists and maps.
//!
//! `"abc".uzunluk` evaluates to a native bound to its receiver; calling
//! it runs the method. Unknown names yield `None` and the evaluator
//! reports the missing property.

use std::rc::Rc;

use super::{length_of, parse_int_prefix, usize_value};
use crate::errors::{stale_handle, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::{NativeCall, NativeFn, NativeFunction, ObjRef, Value};

/// The method `name` on `receiver`, bound to it.
pub fn lookup(receiver: &Value, name: &str) -> Option<NativeFunction> {
    let (arity, func): (usize, NativeFn) = match (receiver, name) {
        (Value::Str(_) | Value::List(_) | Value::Map(_), "uzunluk") => (0, length),

        (Value::Str(_), "buyuk") => (0, str_upper),
        (Value::Str(_), "kucuk") => (0, str_lower),
        (Value::Str(_), "parcala") => (1, str_split),
        (Value::Str(_), "sayi") => (0, str_to_int),
        (Value::Str(_), "icerir") => (1, str_contains),

        (Value::List(_), "ekle") => (1, list_push),
        (Value::List(_), "sil") => (1, list_remove),
        (Value::List(_), "bul") => (1, list_find),
        (Value::List(_), "metin") => (1, list_join),

        (Value::Map(_), "anahtarlar") => (0, map_keys),
        (Value::Map(_), "degerler") => (0, map_values),
        (Value::Map(_), "sil") => (1, map_remove),
        (Value::Map(_), "temizle") => (0, map_clear),
        (Value::Map(_), "icerir") => (1, map_contains),

        _ => return None,
    };
    Some(NativeFunction {
        name: Rc::from(name),
        arity,
        func,
        receiver: Some(receiver.clone()),
    })
}

fn receiver_str(call: &NativeCall<'_>) -> Rc<str> {
    match call.receiver {
        Some(Value::Str(s)) => Rc::clone(s),
        _ => Rc::from(""),
    }
}

fn receiver_list(call: &NativeCall<'_>) -> EvalResult<ObjRef> {
    match call.receiver {
        Some(Value::List(list)) => Ok(*list),
        _ => Err(stale_handle()),
    }
}

fn receiver_map(call: &NativeCall<'_>) -> EvalResult<ObjRef> {
    match call.receiver {
        Some(Value::Map(map)) => Ok(*map),
        _ => Err(stale_handle()),
    }
}

fn length(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    length_of(interpreter, &call.receiver()).map(usize_value)
}

// Strings

fn str_upper(_: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    Ok(Value::string(receiver_str(call).to_uppercase()))
}

fn str_lower(_: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    Ok(Value::string(receiver_str(call).to_lowercase()))
}

/// Split on the delimiter (a space unless a string is given). An empty
/// delimiter yields the whole string as the only element.
fn str_split(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let text = receiver_str(call);
    let delimiter = match call.arg(0) {
        Value::Str(d) => d,
        _ => Rc::from(" "),
    };
    let parts = if delimiter.is_empty() {
        vec![Value::Str(text)]
    } else {
        text.split(&*delimiter).map(Value::from).collect()
    };
    Ok(interpreter.heap.alloc_list(parts))
}

fn str_to_int(_: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    Ok(Value::Int(parse_int_prefix(&receiver_str(call)).unwrap_or(0)))
}

fn str_contains(_: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let found = match call.arg(0) {
        Value::Str(needle) => receiver_str(call).contains(&*needle),
        _ => false,
    };
    Ok(Value::Bool(found))
}

// Lists

fn list_push(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let list = receiver_list(call)?;
    interpreter.heap.list_mut(list)?.push(call.arg(0));
    Ok(Value::List(list))
}

fn list_remove(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let list = receiver_list(call)?;
    if let Value::Int(index) = call.arg(0) {
        let items = interpreter.heap.list_mut(list)?;
        if let Some(index) = usize::try_from(index).ok().filter(|&i| i < items.len()) {
            items.remove(index);
        }
    }
    Ok(Value::List(list))
}

/// Index of the first element with the same type and display string,
/// or -1.
fn list_find(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let list = receiver_list(call)?;
    let needle = call.arg(0);
    let needle_text = interpreter.display(&needle);
    let items = interpreter.heap.list(list)?;
    let position = items.iter().position(|item| {
        item.type_name() == needle.type_name() && interpreter.heap.display(item) == needle_text
    });
    Ok(position.map_or(Value::Int(-1), usize_value))
}

fn list_join(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let list = receiver_list(call)?;
    let delimiter = match call.arg(0) {
        Value::Str(d) => d,
        _ => Rc::from(""),
    };
    let items = interpreter.heap.list(list)?;
    let parts: Vec<String> = items.iter().map(|item| interpreter.heap.display(item)).collect();
    Ok(Value::string(parts.join(&*delimiter)))
}

// Maps

fn map_keys(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let map = receiver_map(call)?;
    let keys = interpreter
        .heap
        .map(map)?
        .keys()
        .map(|k| Value::string(k.as_str()))
        .collect();
    Ok(interpreter.heap.alloc_list(keys))
}

fn map_values(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let map = receiver_map(call)?;
    let values = interpreter.heap.map(map)?.values().cloned().collect();
    Ok(interpreter.heap.alloc_list(values))
}

fn map_remove(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let map = receiver_map(call)?;
    let key = interpreter.display(&call.arg(0));
    interpreter.heap.map_mut(map)?.remove(&key);
    Ok(Value::Nil)
}

fn map_clear(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let map = receiver_map(call)?;
    interpreter.heap.map_mut(map)?.clear();
    Ok(Value::Nil)
}

fn map_contains(interpreter: &mut Interpreter, call: &NativeCall<'_>) -> EvalResult {
    let map = receiver_map(call)?;
    let key = interpreter.display(&call.arg(0));
    Ok(Value::Bool(interpreter.heap.map(map)?.contains_key(&key)))
}
