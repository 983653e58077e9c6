//! Display strings: what `yazdır`, `metin()` and string `+` produce.

use std::fmt::Write;

use rustc_hash::FxHashSet;

use super::{HeapObject, ObjRef, Value};
use crate::heap::Heap;

/// Significant digits in float output.
const FLOAT_PRECISION: i32 = 6;

/// Digits after the point in the rounded mantissa.
const MANTISSA_DECIMALS: usize = 5;

/// Format a float the way C's `%g` does with six significant digits:
/// `1.5`, `2`, `0.333333`, `1e+20`.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_owned();
    }
    if x.is_infinite() {
        return if x < 0.0 { "-inf" } else { "inf" }.to_owned();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }

    // Round to the target precision first: rounding can carry into the
    // next power of ten, which changes the notation.
    let scientific = format!("{x:.MANTISSA_DECIMALS$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= FLOAT_PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        );
    }
    let decimals = usize::try_from(FLOAT_PRECISION - 1 - exponent).unwrap_or(0);
    trim_fraction(&format!("{x:.decimals$}")).to_owned()
}

/// Drop trailing zeros after the decimal point, and the point itself.
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

impl Heap {
    /// The display string of a value.
    pub fn display(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value, &mut FxHashSet::default());
        out
    }

    /// `visiting` holds the containers currently being printed; meeting
    /// one again prints `[...]` or `{...}` instead of recursing.
    fn write_value(&self, out: &mut String, value: &Value, visiting: &mut FxHashSet<ObjRef>) {
        match value {
            Value::Int(n) => {
                let _ = write!(out, "{n}");
            }
            Value::Float(x) => out.push_str(&format_float(*x)),
            Value::Str(s) => out.push_str(s),
            Value::Bool(true) => out.push_str("dogru"),
            Value::Bool(false) => out.push_str("yanlis"),
            Value::Nil => out.push_str("nil"),
            Value::List(h) => {
                let Some(HeapObject::List(items)) = self.objects.get(*h) else {
                    out.push_str("[?]");
                    return;
                };
                if !visiting.insert(*h) {
                    out.push_str("[...]");
                    return;
                }
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_value(out, item, visiting);
                }
                out.push(']');
                visiting.remove(h);
            }
            Value::Map(h) => {
                let Some(HeapObject::Map(entries)) = self.objects.get(*h) else {
                    out.push_str("{?}");
                    return;
                };
                if !visiting.insert(*h) {
                    out.push_str("{...}");
                    return;
                }
                out.push('{');
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "\"{key}\": ");
                    self.write_value(out, item, visiting);
                }
                out.push('}');
                visiting.remove(h);
            }
            Value::Class(h) => match self.objects.get(*h) {
                Some(HeapObject::Class(class)) => {
                    let _ = write!(out, "<sinif {}>", class.name);
                }
                _ => out.push_str("<sinif ?>"),
            },
            Value::Instance(h) => {
                let name = self.instance_class_name(*h);
                let _ = write!(out, "{} nesnesi", name.as_deref().unwrap_or("?"));
            }
            Value::Function(h) => match self.objects.get(*h) {
                Some(HeapObject::Function(function)) => {
                    let _ = write!(out, "<fonksiyon {}>", function.name());
                }
                Some(HeapObject::Native(native)) => {
                    let _ = write!(out, "<native {}>", native.name);
                }
                _ => out.push_str("<fonksiyon ?>"),
            },
        }
    }

    fn instance_class_name(&self, instance: ObjRef) -> Option<std::rc::Rc<str>> {
        let HeapObject::Instance(instance) = self.objects.get(instance)? else {
            return None;
        };
        match self.objects.get(instance.class)? {
            HeapObject::Class(class) => Some(class.name.clone()),
            _ => None,
        }
    }
}
