//! Environment frames.
//!
//! A frame maps names to values and points at its enclosing frame. Frames
//! live in the heap's environment arena; a function value keeps its
//! defining frame alive by holding its handle, which is what makes
//! closures work. Frames are created with their parent and never
//! re-parented.
//!
//! Resolved references walk exactly `distance` parents
//! ([`Heap::get_at`]); unresolved ones are looked up by the interpreter
//! in the globals and the function table.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::errors::{stale_handle, EvalResult};
use crate::heap::Heap;
use crate::value::{EnvRef, Value};

/// One scope frame.
#[derive(Debug)]
pub struct Environment {
    /// Label shown in environment dumps (`Global`, `Blok`, ...).
    name: Rc<str>,
    values: FxHashMap<String, Value>,
    parent: Option<EnvRef>,
}

impl Environment {
    pub fn new(name: impl Into<Rc<str>>, parent: Option<EnvRef>) -> Self {
        Environment {
            name: name.into(),
            values: FxHashMap::default(),
            parent,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<EnvRef> {
        self.parent
    }

    /// Bind `name`, replacing any existing binding in this frame.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Overwrite an existing binding. Returns `false` if there was none.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One variable in an environment dump.
#[derive(Serialize)]
struct VariableJson {
    #[serde(rename = "type")]
    type_name: &'static str,
    value: String,
}

/// A frame in an environment dump.
#[derive(Serialize)]
struct FrameJson<'a> {
    scope: &'a str,
    id: String,
    variables: std::collections::BTreeMap<&'a str, VariableJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    /// Present (as `null`) only on the root frame.
    #[serde(skip_serializing_if = "is_false", serialize_with = "null_marker")]
    parent: bool,
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde's skip_serializing_if passes a reference"
)]
fn is_false(b: &bool) -> bool {
    !*b
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde's serialize_with passes a reference"
)]
fn null_marker<S: serde::Serializer>(_: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_none()
}

impl Heap {
    pub fn new_env(&mut self, name: impl Into<Rc<str>>, parent: Option<EnvRef>) -> EnvRef {
        self.envs.insert(Environment::new(name, parent))
    }

    pub fn env(&self, handle: EnvRef) -> EvalResult<&Environment> {
        self.envs.get(handle).ok_or_else(stale_handle)
    }

    pub fn env_mut(&mut self, handle: EnvRef) -> EvalResult<&mut Environment> {
        self.envs.get_mut(handle).ok_or_else(stale_handle)
    }

    pub fn define(&mut self, env: EnvRef, name: impl Into<String>, value: Value) -> EvalResult<()> {
        self.env_mut(env)?.define(name, value);
        Ok(())
    }

    /// The frame `hops` parents above `env`.
    pub fn ancestor(&self, env: EnvRef, hops: u32) -> EvalResult<EnvRef> {
        let mut current = env;
        for _ in 0..hops {
            current = self.env(current)?.parent().ok_or_else(stale_handle)?;
        }
        Ok(current)
    }

    /// Read `name` from the frame `hops` parents above `env`.
    pub fn get_at(&self, env: EnvRef, hops: u32, name: &str) -> EvalResult<Option<Value>> {
        let frame = self.ancestor(env, hops)?;
        Ok(self.env(frame)?.get(name).cloned())
    }

    /// Write `name` in the frame `hops` parents above `env`.
    pub fn assign_at(&mut self, env: EnvRef, hops: u32, name: &str, value: Value) -> EvalResult<()> {
        let frame = self.ancestor(env, hops)?;
        self.env_mut(frame)?.define(name, value);
        Ok(())
    }

    /// `env` and its ancestors, innermost first.
    pub fn env_chain(&self, env: EnvRef) -> Vec<EnvRef> {
        let mut chain = Vec::new();
        let mut current = Some(env);
        while let Some(handle) = current {
            let Some(frame) = self.envs.get(handle) else {
                break;
            };
            chain.push(handle);
            current = frame.parent();
        }
        chain
    }

    /// JSON dump of one frame: scope label, identity, variables and the
    /// parent's identity (`"parent": null` at the root).
    pub fn env_json(&self, env: EnvRef) -> String {
        let Some(frame) = self.envs.get(env) else {
            return "{}".to_owned();
        };
        let variables = frame
            .bindings()
            .map(|(name, value)| {
                let var = VariableJson {
                    type_name: value.type_name(),
                    value: self.display(value),
                };
                (name, var)
            })
            .collect();
        let json = FrameJson {
            scope: frame.name(),
            id: env.to_string(),
            variables,
            parent_id: frame.parent().map(|p| p.to_string()),
            parent: frame.parent().is_none(),
        };
        serde_json::to_string(&json).unwrap_or_else(|_| "{}".to_owned())
    }
}

#[cfg(test)]
mod tests;
