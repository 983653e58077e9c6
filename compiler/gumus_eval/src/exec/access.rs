//! Property access, indexing, `ata.metot` and `Modul::uye`.

use gumus_ir::{Distance, Expr, RECEIVER_NAME, SUPER_NAME};

use crate::errors::{
    cannot_index, cannot_index_assign, cannot_set_property, list_index_not_int,
    list_index_out_of_bounds, module_member_not_found, module_not_found, no_properties,
    private_access, private_assignment, stale_handle, string_index_not_int,
    string_index_out_of_bounds, undefined_property, undefined_variable, EvalResult,
};
use crate::interpreter::Interpreter;
use crate::natives::property_handlers;
use crate::value::{HeapObject, ObjRef, Value};

/// `_`-prefixed members are private to their own methods.
#[inline]
fn is_private(name: &str) -> bool {
    name.starts_with('_')
}

/// A list position, if `index` is an in-range integer.
fn list_position(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

impl Interpreter {
    /// `nesne.ad`: field, then bound method; built-in types go to the
    /// property handlers.
    pub fn get_property(&mut self, object: &Value, name: &str) -> EvalResult {
        match object {
            Value::Instance(instance) => self.instance_property(*instance, name),
            Value::Str(_) | Value::List(_) | Value::Map(_) => {
                match property_handlers::lookup(object, name) {
                    Some(native) => Ok(Value::Function(self.heap.alloc(HeapObject::Native(native)))),
                    None => Err(undefined_property(name)),
                }
            }
            _ => Err(no_properties()),
        }
    }

    fn instance_property(&mut self, instance: ObjRef, name: &str) -> EvalResult {
        if is_private(name) && self.receiver != Some(instance) {
            return Err(private_access(name));
        }
        let object = self.heap.instance(instance)?;
        if let Some(value) = object.fields.get(name) {
            return Ok(value.clone());
        }
        let class = object.class;
        match self.find_method(class, name)? {
            Some(method) => {
                let bound = self.bind_method(method, instance)?;
                Ok(Value::Function(self.heap.alloc(HeapObject::Function(bound))))
            }
            None => Err(undefined_property(name)),
        }
    }

    pub(super) fn eval_set(&mut self, object: &Expr, name: &str, value: &Expr) -> EvalResult {
        let target = self.evaluate(object)?;
        let Value::Instance(instance) = target else {
            return Err(cannot_set_property(&target));
        };
        if is_private(name) && self.receiver != Some(instance) {
            return Err(private_assignment(name));
        }
        let value = self.evaluate(value)?;
        self.heap
            .instance_mut(instance)?
            .fields
            .insert(name.to_owned(), value.clone());
        Ok(value)
    }

    pub(super) fn eval_index_get(&mut self, object: &Expr, index: &Expr) -> EvalResult {
        let target = self.evaluate(object)?;
        let index = self.evaluate(index)?;
        match &target {
            Value::List(list) => {
                let Value::Int(i) = index else {
                    return Err(list_index_not_int());
                };
                let items = self.heap.list(*list)?;
                list_position(i, items.len())
                    .and_then(|i| items.get(i))
                    .cloned()
                    .ok_or_else(list_index_out_of_bounds)
            }
            Value::Str(s) => {
                let Value::Int(i) = index else {
                    return Err(string_index_not_int());
                };
                usize::try_from(i)
                    .ok()
                    .and_then(|i| s.chars().nth(i))
                    .map(|c| Value::string(c.to_string()))
                    .ok_or_else(string_index_out_of_bounds)
            }
            Value::Map(map) => {
                let key = self.heap.display(&index);
                Ok(self.heap.map(*map)?.get(&key).cloned().unwrap_or_default())
            }
            _ => Err(cannot_index()),
        }
    }

    pub(super) fn eval_index_set(
        &mut self,
        object: &Expr,
        index: &Expr,
        value: &Expr,
    ) -> EvalResult {
        let target = self.evaluate(object)?;
        let index = self.evaluate(index)?;
        let value = self.evaluate(value)?;
        match target {
            Value::List(list) => {
                let Value::Int(i) = index else {
                    return Err(list_index_not_int());
                };
                let items = self.heap.list_mut(list)?;
                let slot = list_position(i, items.len())
                    .and_then(|i| items.get_mut(i))
                    .ok_or_else(list_index_out_of_bounds)?;
                *slot = value.clone();
                Ok(value)
            }
            Value::Map(map) => {
                let key = self.heap.display(&index);
                self.heap.map_mut(map)?.insert(key, value.clone());
                Ok(value)
            }
            _ => Err(cannot_index_assign()),
        }
    }

    /// `ata.metot`: the superclass sits at the resolved distance and the
    /// receiver one frame closer.
    pub(super) fn eval_super(&mut self, method: &str, distance: &Distance) -> EvalResult {
        let Some(hops) = distance.get() else {
            return Err(undefined_variable(SUPER_NAME));
        };
        let superclass = self.heap.get_at(self.env, hops, SUPER_NAME)?;
        let receiver = match hops.checked_sub(1) {
            Some(closer) => self.heap.get_at(self.env, closer, RECEIVER_NAME)?,
            None => None,
        };
        let (Some(Value::Class(superclass)), Some(Value::Instance(instance))) =
            (superclass, receiver)
        else {
            return Err(stale_handle());
        };
        let Some(found) = self.find_method(superclass, method)? else {
            return Err(undefined_property(method));
        };
        let bound = self.bind_method(found, instance)?;
        Ok(Value::Function(self.heap.alloc(HeapObject::Function(bound))))
    }

    pub(super) fn eval_scope(&self, module: &str, member: &str) -> EvalResult {
        let Some(env) = self.modules.get(module) else {
            return Err(module_not_found(module));
        };
        self.heap
            .env(*env)?
            .get(member)
            .cloned()
            .ok_or_else(|| module_member_not_found(module, member))
    }
}
