//! Calls: user functions, bound methods, natives and classes.
//!
//! Arity is checked against the callee before any argument is
//! evaluated. Every call pushes a call-stack frame and pops it again
//! whether the call succeeded or not.

use gumus_ir::{Expr, ExprKind, CONSTRUCTOR_NAME};
use smallvec::SmallVec;

use crate::diagnostics::CallFrame;
use crate::errors::{not_callable, wrong_arg_count, EvalResult, ExecStatus};
use crate::interpreter::Interpreter;
use crate::value::{
    FunctionObject, HeapObject, InstanceObject, NativeCall, NativeFunction, ObjRef, Value,
};

/// Argument vector; most calls take few arguments.
pub(crate) type Args = SmallVec<[Value; 4]>;

/// Name used in arity errors.
fn callee_name(callee: &Expr) -> &str {
    match &callee.kind {
        ExprKind::Variable { name, .. } | ExprKind::Get { name, .. } => name.as_str(),
        _ => "bilinmeyen",
    }
}

impl Interpreter {
    pub(super) fn eval_call(&mut self, callee: &Expr, args: &[Expr], line: u32) -> EvalResult {
        let callee_value = match &callee.kind {
            ExprKind::Variable { name, distance } => self
                .lookup_callee(name, distance)
                .map_err(|err| err.or_line(callee.line))?,
            _ => self.evaluate(callee)?,
        };

        let arity = self.arity(&callee_value)?;
        if args.len() != arity {
            return Err(wrong_arg_count(callee_name(callee), arity, args.len()));
        }

        let mut values = Args::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate(arg)?);
        }
        self.call_value(&callee_value, &values, line)
    }

    /// Parameter count of a callable; a class takes its constructor's.
    pub(crate) fn arity(&self, callee: &Value) -> EvalResult<usize> {
        match callee {
            Value::Class(class) => Ok(match self.find_method(*class, CONSTRUCTOR_NAME)? {
                Some(init) => match self.heap.object(init)? {
                    HeapObject::Function(function) => function.arity(),
                    _ => 0,
                },
                None => 0,
            }),
            Value::Function(handle) => match self.heap.object(*handle)? {
                HeapObject::Function(function) => Ok(function.arity()),
                HeapObject::Native(native) => Ok(native.arity),
                _ => Err(not_callable()),
            },
            _ => Err(not_callable()),
        }
    }

    /// Call any callable with already evaluated arguments.
    pub fn call_value(&mut self, callee: &Value, args: &[Value], line: u32) -> EvalResult {
        match callee {
            Value::Class(class) => self.instantiate(*class, args, line),
            Value::Function(handle) => match self.heap.object(*handle)? {
                HeapObject::Function(function) => {
                    let function = function.clone();
                    self.call_function(&function, args, line)
                }
                HeapObject::Native(native) => {
                    let native = native.clone();
                    self.call_native(&native, args, line)
                }
                _ => Err(not_callable()),
            },
            _ => Err(not_callable()),
        }
    }

    fn call_function(&mut self, function: &FunctionObject, args: &[Value], line: u32) -> EvalResult {
        self.counters.count_function_call();
        self.call_stack.push(CallFrame {
            name: function.name().to_owned(),
            line,
        })?;
        let result = self.invoke_function(function, args);
        self.call_stack.pop();
        result
    }

    /// Run a function body in a fresh `Fonksiyon:<ad>` frame chained to
    /// its closure. A bound method runs with its instance as receiver.
    fn invoke_function(&mut self, function: &FunctionObject, args: &[Value]) -> EvalResult {
        let env = self
            .heap
            .new_env(format!("Fonksiyon:{}", function.name()), Some(function.closure));
        for (param, arg) in function.decl.params.iter().zip(args) {
            self.heap.define(env, param.clone(), arg.clone())?;
        }
        let receiver = self.bound_receiver(function.closure);
        let status = self.enter_call(env, receiver).run_body(&function.decl.body)?;
        Ok(match status {
            ExecStatus::Return(value) => value,
            ExecStatus::Normal | ExecStatus::Break | ExecStatus::Continue => Value::Nil,
        })
    }

    fn call_native(&mut self, native: &NativeFunction, args: &[Value], line: u32) -> EvalResult {
        self.counters.count_native_call();
        self.call_stack.push(CallFrame {
            name: format!("yerleşik:{}", native.name),
            line,
        })?;
        let call = NativeCall {
            receiver: native.receiver.as_ref(),
            args,
        };
        let result = (native.func)(self, &call);
        self.call_stack.pop();
        result
    }

    /// Allocate an instance and run `kurucu` on it, if the class or an
    /// ancestor has one. The constructor's return value is dropped.
    fn instantiate(&mut self, class: ObjRef, args: &[Value], line: u32) -> EvalResult {
        let class_name = self.heap.class(class)?.name.clone();
        let instance = self.heap.alloc(HeapObject::Instance(InstanceObject {
            class,
            fields: rustc_hash::FxHashMap::default(),
        }));

        if let Some(init) = self.find_method(class, CONSTRUCTOR_NAME)? {
            let bound = self.bind_method(init, instance)?;
            self.counters.count_function_call();
            self.call_stack.push(CallFrame {
                name: format!("{class_name}::{CONSTRUCTOR_NAME}"),
                line,
            })?;
            let result = self.invoke_function(&bound, args);
            self.call_stack.pop();
            result?;
        }
        Ok(Value::Instance(instance))
    }
}
