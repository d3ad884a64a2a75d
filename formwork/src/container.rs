//! Shared value storage between controllers and their containers.

use std::sync::{Arc, RwLock};

use crate::value::Value;

/// One value cell, shared between a [`FieldController`](crate::FieldController)
/// and the container it lives in.
///
/// Cheap to clone; clones point at the same cell.
#[derive(Debug, Clone, Default)]
pub struct ValueSlot {
    inner: Arc<RwLock<Value>>,
}

impl ValueSlot {
    pub fn new(value: Value) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> Value {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub(crate) fn set(&self, value: Value) {
        match self.inner.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }

    /// Whether two handles point at the same cell.
    pub fn same_as(&self, other: &ValueSlot) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Ordered slots backing a repeatable field.
///
/// Read access is public; only the owning
/// [`RepeaterController`](crate::RepeaterController) changes its structure.
#[derive(Debug, Clone, Default)]
pub struct ValueArray {
    slots: Arc<RwLock<Vec<ValueSlot>>>,
}

impl ValueArray {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<R>(&self, f: impl FnOnce(&Vec<ValueSlot>) -> R) -> R {
        match self.slots.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut Vec<ValueSlot>) -> R) -> R {
        match self.slots.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.read(|slots| slots.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `index`.
    pub fn at(&self, index: usize) -> Option<Value> {
        self.read(|slots| slots.get(index).map(ValueSlot::get))
    }

    /// All values in order.
    pub fn values(&self) -> Vec<Value> {
        self.read(|slots| slots.iter().map(ValueSlot::get).collect())
    }

    /// Position of a slot, if it belongs to this array.
    pub fn position_of(&self, slot: &ValueSlot) -> Option<usize> {
        self.read(|slots| slots.iter().position(|s| s.same_as(slot)))
    }

    pub(crate) fn insert(&self, index: usize, slot: ValueSlot) {
        self.write(|slots| slots.insert(index, slot));
    }

    pub(crate) fn remove(&self, index: usize) -> ValueSlot {
        self.write(|slots| slots.remove(index))
    }
}
