use std::any::{Any, type_name};

use crate::ecs::{
    component::Component,
    error::{Error, Result},
};

/// Dense per-type component storage indexed by entity index.
///
/// A slot exists for every index below [`Pool::len`], whether or not an entity ever stored a
/// value there. Whether an entity *has* the component is tracked by its signature, not by the
/// pool, so a slot may keep a stale value after the component was detached.
#[derive(Debug)]
pub struct Pool<C> {
    slots: Vec<Option<C>>,
}

impl<C> Default for Pool<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Pool<C> {
    #[inline]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// The number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Grow so indices `[0, len)` are valid. New slots are empty. Never shrinks.
    pub fn resize(&mut self, len: usize) {
        if len > self.slots.len() {
            self.slots.resize_with(len, || None);
        }
    }

    #[inline]
    fn check(&self, index: usize) -> Result<()> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                index,
                len: self.slots.len(),
            })
        }
    }

    /// Overwrite the value at `index`.
    pub fn set(&mut self, index: usize, value: C) -> Result<()> {
        self.check(index)?;
        self.slots[index] = Some(value);
        Ok(())
    }

    /// Get the value at `index`.
    pub fn get(&self, index: usize) -> Result<&C> {
        self.check(index)?;
        self.slots[index].as_ref().ok_or(Error::EmptySlot { index })
    }

    /// Get the value at `index` mutably.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut C> {
        self.check(index)?;
        self.slots[index].as_mut().ok_or(Error::EmptySlot { index })
    }

    /// Empty the slot at `index`, returning what it held. Out of range indices hold nothing.
    pub fn take(&mut self, index: usize) -> Option<C> {
        self.slots.get_mut(index).and_then(Option::take)
    }
}

/// The type-erased face of a [`Pool`], letting the registry keep pools of every component type in
/// one vector.
///
/// Only width-level operations are exposed. Typed access goes through [`downcast`] and
/// [`downcast_mut`].
pub trait AnyPool: Any {
    /// The number of slots.
    fn len(&self) -> usize;

    /// Grow to `len` slots; see [`Pool::resize`].
    fn resize(&mut self, len: usize);

    /// Drop whatever the slot at `index` holds.
    fn clear(&mut self, index: usize);

    /// The component type stored in this pool.
    fn component_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> AnyPool for Pool<C> {
    #[inline]
    fn len(&self) -> usize {
        Pool::len(self)
    }

    #[inline]
    fn resize(&mut self, len: usize) {
        Pool::resize(self, len)
    }

    #[inline]
    fn clear(&mut self, index: usize) {
        self.take(index);
    }

    fn component_name(&self) -> &'static str {
        type_name::<C>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Recover the typed pool behind a type-erased handle.
///
/// Every typed read of component data passes through here or [`downcast_mut`], so a mismatch
/// between a component id and the pool stored under it surfaces as [`Error::PoolType`] instead of
/// a wrong read.
#[inline]
pub fn downcast<C: Component>(pool: &dyn AnyPool) -> Result<&Pool<C>> {
    pool.as_any()
        .downcast_ref::<Pool<C>>()
        .ok_or(Error::PoolType {
            component: type_name::<C>(),
        })
}

/// Mutable form of [`downcast`].
#[inline]
pub fn downcast_mut<C: Component>(pool: &mut dyn AnyPool) -> Result<&mut Pool<C>> {
    pool.as_any_mut()
        .downcast_mut::<Pool<C>>()
        .ok_or(Error::PoolType {
            component: type_name::<C>(),
        })
}
