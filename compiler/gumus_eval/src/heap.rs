//! The interpreter heap: one arena for objects, one for environment
//! frames.
//!
//! Typed accessors return an [`EvalResult`] so that a stale handle or a
//! handle of the wrong kind surfaces as a runtime error instead of a
//! panic.

use std::collections::BTreeMap;

use crate::arena::Arena;
use crate::environment::Environment;
use crate::errors::{stale_handle, EvalResult};
use crate::value::{ClassObject, HeapObject, InstanceObject, ObjRef, Value};

#[derive(Default)]
pub struct Heap {
    pub(crate) objects: Arena<HeapObject>,
    pub(crate) envs: Arena<Environment>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, object: HeapObject) -> ObjRef {
        self.objects.insert(object)
    }

    pub fn alloc_list(&mut self, items: Vec<Value>) -> Value {
        Value::List(self.alloc(HeapObject::List(items)))
    }

    pub fn alloc_map(&mut self, entries: BTreeMap<String, Value>) -> Value {
        Value::Map(self.alloc(HeapObject::Map(entries)))
    }

    pub fn object(&self, handle: ObjRef) -> EvalResult<&HeapObject> {
        self.objects.get(handle).ok_or_else(stale_handle)
    }

    pub fn object_mut(&mut self, handle: ObjRef) -> EvalResult<&mut HeapObject> {
        self.objects.get_mut(handle).ok_or_else(stale_handle)
    }

    pub fn list(&self, handle: ObjRef) -> EvalResult<&Vec<Value>> {
        match self.object(handle)? {
            HeapObject::List(items) => Ok(items),
            _ => Err(stale_handle()),
        }
    }

    pub fn list_mut(&mut self, handle: ObjRef) -> EvalResult<&mut Vec<Value>> {
        match self.object_mut(handle)? {
            HeapObject::List(items) => Ok(items),
            _ => Err(stale_handle()),
        }
    }

    pub fn map(&self, handle: ObjRef) -> EvalResult<&BTreeMap<String, Value>> {
        match self.object(handle)? {
            HeapObject::Map(entries) => Ok(entries),
            _ => Err(stale_handle()),
        }
    }

    pub fn map_mut(&mut self, handle: ObjRef) -> EvalResult<&mut BTreeMap<String, Value>> {
        match self.object_mut(handle)? {
            HeapObject::Map(entries) => Ok(entries),
            _ => Err(stale_handle()),
        }
    }

    pub fn class(&self, handle: ObjRef) -> EvalResult<&ClassObject> {
        match self.object(handle)? {
            HeapObject::Class(class) => Ok(class),
            _ => Err(stale_handle()),
        }
    }

    pub fn instance(&self, handle: ObjRef) -> EvalResult<&InstanceObject> {
        match self.object(handle)? {
            HeapObject::Instance(instance) => Ok(instance),
            _ => Err(stale_handle()),
        }
    }

    pub fn instance_mut(&mut self, handle: ObjRef) -> EvalResult<&mut InstanceObject> {
        match self.object_mut(handle)? {
            HeapObject::Instance(instance) => Ok(instance),
            _ => Err(stale_handle()),
        }
    }

    /// Live heap objects.
    #[inline]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Live environment frames.
    #[inline]
    pub fn env_count(&self) -> usize {
        self.envs.len()
    }

    /// Estimated bytes held by live objects.
    pub fn size_estimate(&self) -> usize {
        self.objects
            .iter()
            .map(|(_, object)| object.size_estimate())
            .sum()
    }
}
