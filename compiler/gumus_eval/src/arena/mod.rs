//! Generation-checked slab storage.
//!
//! Heap objects and environment frames live in an [`Arena`] and are
//! addressed by [`Handle`]s: a slot index plus the generation the slot had
//! when the handle was issued. Freeing a slot bumps its generation, so a
//! handle that outlived its object no longer resolves instead of silently
//! aliasing whatever was allocated into the slot next.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Typed index into an [`Arena<T>`].
pub struct Handle<T> {
    index: u32,
    generation: u32,
    marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    #[inline]
    fn new(index: u32, generation: u32) -> Self {
        Handle {
            index,
            generation,
            marker: PhantomData,
        }
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

// Manual impls: the derives would require `T: Clone` and friends.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}

impl<T> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32 },
}

impl<T> Slot<T> {
    #[inline]
    fn generation(&self) -> u32 {
        match self {
            Slot::Occupied { generation, .. } | Slot::Vacant { generation } => *generation,
        }
    }
}

/// Slab of `T` with a free list.
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, reusing a freed slot when one is available.
    pub fn insert(&mut self, value: T) -> Handle<T> {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                let generation = slot.generation();
                *slot = Slot::Occupied { generation, value };
                return Handle::new(index, generation);
            }
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "an arena never holds more than u32::MAX slots"
        )]
        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied {
            generation: 0,
            value,
        });
        Handle::new(index, 0)
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        match self.slots.get(handle.index as usize)? {
            Slot::Occupied { generation, value } if *generation == handle.generation => {
                Some(value)
            }
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        match self.slots.get_mut(handle.index as usize)? {
            Slot::Occupied { generation, value } if *generation == handle.generation => {
                Some(value)
            }
            _ => None,
        }
    }

    #[inline]
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.get(handle).is_some()
    }

    /// Free the slot behind `handle`. Stale handles are ignored.
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if !matches!(slot, Slot::Occupied { generation, .. } if *generation == handle.generation) {
            return None;
        }
        let vacant = Slot::Vacant {
            generation: handle.generation.wrapping_add(1),
        };
        let Slot::Occupied { value, .. } = std::mem::replace(slot, vacant) else {
            return None;
        };
        self.free.push(handle.index);
        self.len -= 1;
        Some(value)
    }

    /// Live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.slots.iter().zip(0u32..).filter_map(|(slot, index)| match slot {
            Slot::Occupied { generation, value } => Some((Handle::new(index, *generation), value)),
            Slot::Vacant { .. } => None,
        })
    }

    /// Free every entry `keep` rejects and return what was freed.
    pub fn sweep(&mut self, mut keep: impl FnMut(Handle<T>, &T) -> bool) -> Vec<T> {
        let doomed: Vec<Handle<T>> = self
            .iter()
            .filter(|(handle, value)| !keep(*handle, *value))
            .map(|(handle, _)| handle)
            .collect();
        doomed
            .into_iter()
            .filter_map(|handle| self.remove(handle))
            .collect()
    }
}
