//! Solver-owned storage for long-lived engine objects.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Typed handle to an object owned by an [`ObjectRegistry`].
pub struct RegistryId<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RegistryId<T> {
    fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.index
    }
}

impl<T> Clone for RegistryId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RegistryId<T> {}

impl<T> PartialEq for RegistryId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for RegistryId<T> {}

impl<T> Hash for RegistryId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for RegistryId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegistryId({})", self.index)
    }
}

/// Owns objects registered with the solver until the solver is dropped.
///
/// Objects are never removed individually. An object can be checked out with
/// [`take`](Self::take) while it needs mutable access to the solver and must
/// then be put back with [`put_back`](Self::put_back).
pub struct ObjectRegistry<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for ObjectRegistry<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> ObjectRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, object: T) -> RegistryId<T> {
        self.slots.push(Some(object));
        RegistryId::new(self.slots.len() - 1)
    }

    /// Returns the object, or `None` while it is checked out.
    pub fn get(&self, id: RegistryId<T>) -> Option<&T> {
        self.slots.get(id.index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: RegistryId<T>) -> Option<&mut T> {
        self.slots.get_mut(id.index).and_then(Option::as_mut)
    }

    pub fn take(&mut self, id: RegistryId<T>) -> Option<T> {
        self.slots.get_mut(id.index).and_then(Option::take)
    }

    pub fn put_back(&mut self, id: RegistryId<T>, object: T) {
        if let Some(slot) = self.slots.get_mut(id.index) {
            *slot = Some(object);
        }
    }

    /// Returns the number of registered objects, checked-out ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObjectRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("len", &self.slots.len())
            .field(
                "checked_out",
                &self.slots.iter().filter(|s| s.is_none()).count(),
            )
            .finish()
    }
}
