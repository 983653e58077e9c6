//! Runtime values.
//!
//! Scalars and strings are stored inline and copied on assignment.
//! Lists, maps, classes, instances and functions live on the [`Heap`] and
//! a [`Value`] holds a handle to them, so aliasing is observable: two
//! variables holding the same list see each other's mutations. Equality on
//! heap values is handle identity.
//!
//! [`Heap`]: crate::Heap

mod display;

use std::collections::BTreeMap;
use std::rc::Rc;

use gumus_ir::SharedFunction;
use rustc_hash::FxHashMap;

use crate::arena::Handle;
use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;

pub use display::format_float;

/// Handle to a heap object.
pub type ObjRef = Handle<HeapObject>;

/// Handle to an environment frame.
pub type EnvRef = Handle<Environment>;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Bool(bool),
    #[default]
    Nil,
    List(ObjRef),
    Map(ObjRef),
    Class(ObjRef),
    Instance(ObjRef),
    /// User function, bound method or native.
    Function(ObjRef),
}

impl Value {
    #[inline]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// `yanlış`, `0` and `boş` are false; everything else is true.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false) | Value::Int(0) | Value::Nil)
    }

    /// The heap object behind this value, if it has one.
    #[inline]
    pub fn handle(&self) -> Option<ObjRef> {
        match self {
            Value::List(h)
            | Value::Map(h)
            | Value::Class(h)
            | Value::Instance(h)
            | Value::Function(h) => Some(*h),
            _ => None,
        }
    }

    /// Type name shown by `tip()` and in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Tamsayı",
            Value::Float(_) => "Ondalıklı",
            Value::Str(_) => "Metin",
            Value::Bool(_) => "Mantıksal",
            Value::Nil => "Boş",
            Value::List(_) => "Liste",
            Value::Map(_) => "Sözlük",
            Value::Class(_) => "Sınıf",
            Value::Instance(_) => "Nesne",
            Value::Function(_) => "Fonksiyon",
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Inline size used for collector accounting.
    pub fn size_estimate(&self) -> usize {
        match self {
            Value::Int(_) => std::mem::size_of::<i64>(),
            Value::Float(_) => std::mem::size_of::<f64>(),
            Value::Str(s) => s.len(),
            Value::Bool(_) => std::mem::size_of::<bool>(),
            Value::Nil => 0,
            _ => std::mem::size_of::<ObjRef>(),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

/// Anything that lives on the heap.
#[derive(Debug)]
pub enum HeapObject {
    List(Vec<Value>),
    /// Sorted keys: iteration and display order.
    Map(BTreeMap<String, Value>),
    Class(ClassObject),
    Instance(InstanceObject),
    Function(FunctionObject),
    Native(NativeFunction),
}

impl HeapObject {
    /// Name used in heap dumps and the live-object histogram.
    pub fn kind_name(&self) -> &'static str {
        match self {
            HeapObject::List(_) => "Liste",
            HeapObject::Map(_) => "Sözlük",
            HeapObject::Class(_) => "Sınıf",
            HeapObject::Instance(_) => "Nesne",
            HeapObject::Function(_) => "Fonksiyon",
            HeapObject::Native(_) => "Yerleşik",
        }
    }

    /// Estimated bytes owned by this object.
    pub fn size_estimate(&self) -> usize {
        let value = std::mem::size_of::<Value>();
        match self {
            HeapObject::List(items) => items.len() * value,
            HeapObject::Map(entries) => entries.keys().map(|k| k.len() + value).sum(),
            HeapObject::Class(class) => {
                class.name.len() + class.methods.len() * std::mem::size_of::<ObjRef>()
            }
            HeapObject::Instance(instance) => instance
                .fields
                .keys()
                .map(|k| k.len() + value)
                .sum::<usize>()
                .max(std::mem::size_of::<InstanceObject>()),
            HeapObject::Function(_) => std::mem::size_of::<FunctionObject>(),
            HeapObject::Native(native) => native.name.len(),
        }
    }

    /// Every value held directly by this object.
    pub(crate) fn for_each_value(&self, mut f: impl FnMut(&Value)) {
        match self {
            HeapObject::List(items) => items.iter().for_each(f),
            HeapObject::Map(entries) => entries.values().for_each(f),
            HeapObject::Instance(instance) => {
                f(&Value::Class(instance.class));
                instance.fields.values().for_each(f);
            }
            HeapObject::Class(class) => {
                if let Some(superclass) = class.superclass {
                    f(&Value::Class(superclass));
                }
                for method in class.methods.values() {
                    f(&Value::Function(*method));
                }
            }
            HeapObject::Native(native) => {
                if let Some(receiver) = &native.receiver {
                    f(receiver);
                }
            }
            HeapObject::Function(_) => {}
        }
    }

    /// The environment a function closes over.
    pub(crate) fn closure(&self) -> Option<EnvRef> {
        match self {
            HeapObject::Function(function) => Some(function.closure),
            _ => None,
        }
    }
}

/// A class: name, optional superclass and its own methods.
#[derive(Debug)]
pub struct ClassObject {
    pub name: Rc<str>,
    pub superclass: Option<ObjRef>,
    /// Method name to `HeapObject::Function`.
    pub methods: FxHashMap<String, ObjRef>,
}

#[derive(Debug)]
pub struct InstanceObject {
    pub class: ObjRef,
    pub fields: FxHashMap<String, Value>,
}

/// A user function or method together with the environment it closes
/// over. Binding a method produces a new `FunctionObject` whose closure is
/// a frame holding `öz`.
#[derive(Clone, Debug)]
pub struct FunctionObject {
    pub decl: SharedFunction,
    pub closure: EnvRef,
}

impl FunctionObject {
    #[inline]
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.decl.arity()
    }
}

/// Arguments handed to a native.
pub struct NativeCall<'a> {
    /// The value a property method was looked up on.
    pub receiver: Option<&'a Value>,
    pub args: &'a [Value],
}

impl NativeCall<'_> {
    /// Argument `i`, `boş` when absent.
    #[inline]
    pub fn arg(&self, i: usize) -> Value {
        self.args.get(i).cloned().unwrap_or_default()
    }

    /// The receiver, `boş` for free functions.
    #[inline]
    pub fn receiver(&self) -> Value {
        self.receiver.cloned().unwrap_or_default()
    }
}

/// Signature of every native.
pub type NativeFn = fn(&mut Interpreter, &NativeCall<'_>) -> EvalResult;

/// A native function, optionally bound to a receiver.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Rc<str>,
    pub arity: usize,
    pub func: NativeFn,
    pub receiver: Option<Value>,
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("receiver", &self.receiver)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
