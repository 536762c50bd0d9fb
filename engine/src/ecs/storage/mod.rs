//! Component storage: one [`Pool`] per component type plus a [`Signature`] per entity.
//!
//! ```text
//! pools:      [component id] -> Pool<C>     [entity index] -> Option<C>
//! signatures: [entity index] -> Signature   bit k set <=> entity has component id k
//! occupants:  [entity index] -> Generation  the handle allowed to touch the slot
//! ```
//!
//! Pools are created lazily the first time their component type is attached and only ever grow.
//! The signature table is the source of truth for presence: typed reads check the signature bit
//! before touching the pool, so stale slots left behind by a detach are never observed.
//!
//! [`Components`] is what systems receive while they run. Reads and in-place mutation are public;
//! attaching, detaching and clearing are reserved for the [`Registry`](crate::ecs::Registry) so
//! that signature changes are always paired with the membership bookkeeping they trigger.

mod pool;

use std::any::type_name;

use log::trace;

use crate::ecs::{
    component::{self, Component},
    entity::{Entity, Generation},
    error::{Error, Result},
    signature::Signature,
};

pub use pool::{AnyPool, Pool, downcast, downcast_mut};

/// Component pools and per-entity signatures.
#[derive(Default)]
pub struct Components {
    /// Type-erased pools indexed by component id. `None` until the type is first attached.
    pools: Vec<Option<Box<dyn AnyPool>>>,

    /// Signatures indexed by entity index.
    signatures: Vec<Signature>,

    /// Generation of the entity occupying each slot. A handle with any other generation is stale.
    occupants: Vec<Generation>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of entity slots covered by the signature table.
    #[inline]
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Resolve `entity` to its slot, rejecting handles that never had one or whose slot has
    /// since been handed to another entity.
    fn slot(&self, entity: Entity) -> Result<usize> {
        let index = entity.index();
        match self.occupants.get(index) {
            None => Err(Error::UnknownEntity(entity)),
            Some(&generation) if generation != entity.generation() => {
                Err(Error::StaleEntity(entity))
            }
            Some(_) => Ok(index),
        }
    }

    /// Get an entity's signature.
    pub fn signature(&self, entity: Entity) -> Result<Signature> {
        let index = self.slot(entity)?;
        Ok(self.signatures[index])
    }

    /// The signature stored at `index`, whoever occupies it. Empty beyond the table.
    pub(crate) fn signature_at(&self, index: usize) -> Signature {
        self.signatures.get(index).copied().unwrap_or_default()
    }

    /// Whether the entity's signature includes component `C`. Unknown and stale entities have
    /// nothing.
    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        self.signature(entity)
            .is_ok_and(|signature| signature.contains(component::id::<C>()))
    }

    /// Get the typed pool for `C`, if one was created.
    pub fn pool<C: Component>(&self) -> Result<Option<&Pool<C>>> {
        match self.pools.get(component::id::<C>().index()) {
            Some(Some(pool)) => downcast::<C>(&**pool).map(Some),
            _ => Ok(None),
        }
    }

    fn pool_mut<C: Component>(&mut self) -> Result<Option<&mut Pool<C>>> {
        match self.pools.get_mut(component::id::<C>().index()) {
            Some(Some(pool)) => downcast_mut::<C>(&mut **pool).map(Some),
            _ => Ok(None),
        }
    }

    /// Fail unless the entity's signature includes `C`.
    fn require<C: Component>(&self, entity: Entity) -> Result<()> {
        if self.signature(entity)?.contains(component::id::<C>()) {
            Ok(())
        } else {
            Err(Error::MissingComponent {
                entity,
                component: type_name::<C>(),
            })
        }
    }

    /// Get the entity's `C` component.
    pub fn get<C: Component>(&self, entity: Entity) -> Result<&C> {
        self.require::<C>(entity)?;
        self.pool::<C>()?
            .ok_or(Error::MissingComponent {
                entity,
                component: type_name::<C>(),
            })?
            .get(entity.index())
    }

    /// Get the entity's `C` component mutably.
    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Result<&mut C> {
        self.require::<C>(entity)?;
        self.pool_mut::<C>()?
            .ok_or(Error::MissingComponent {
                entity,
                component: type_name::<C>(),
            })?
            .get_mut(entity.index())
    }

    /// Hand the entity's slot to `entity`, growing the tables to cover it. The slot starts with
    /// an empty signature.
    pub(crate) fn admit(&mut self, entity: Entity) {
        let index = entity.index();
        if index >= self.signatures.len() {
            self.signatures.resize(index + 1, Signature::EMPTY);
            self.occupants.resize(index + 1, Generation::FIRST);
        }
        self.signatures[index] = Signature::EMPTY;
        self.occupants[index] = entity.generation();
    }

    /// Store `value` for the entity and set its signature bit.
    ///
    /// The pool for `C` is created on first use and grown to cover the entity. Storing over an
    /// existing value replaces it.
    pub(crate) fn insert<C: Component>(&mut self, entity: Entity, value: C) -> Result<()> {
        let id = component::id::<C>();
        let index = self.slot(entity)?;

        // Check capacity before allocating anything for an id that can never be stored.
        let mut signature = self.signatures[index];
        signature.insert(id)?;

        if id.index() >= self.pools.len() {
            self.pools.resize_with(id.index() + 1, || None);
        }
        let slot = &mut self.pools[id.index()];
        if slot.is_none() {
            trace!("creating pool for {} (component {id})", type_name::<C>());
        }
        let erased = slot.get_or_insert_with(|| Box::new(Pool::<C>::new()) as Box<dyn AnyPool>);
        let pool = downcast_mut::<C>(&mut **erased)?;
        if index >= pool.len() {
            pool.resize(index + 1);
        }
        pool.set(index, value)?;

        self.signatures[index] = signature;
        Ok(())
    }

    /// Clear the entity's signature bit for `C`, returning whether it was set.
    ///
    /// The pool slot keeps its value until it is overwritten or the entity is cleared.
    pub(crate) fn remove<C: Component>(&mut self, entity: Entity) -> Result<bool> {
        let id = component::id::<C>();
        let index = self.slot(entity)?;
        let signature = &mut self.signatures[index];
        let had = signature.contains(id);
        signature.remove(id);
        Ok(had)
    }

    /// Reset the entity's signature and drop every component value stored for it.
    ///
    /// The slot's generation is bumped the same way the allocator bumps it on release, so the
    /// cleared handle reads as stale from here on. Stale handles clear nothing.
    pub(crate) fn clear(&mut self, entity: Entity) {
        let Ok(index) = self.slot(entity) else {
            return;
        };
        self.signatures[index] = Signature::EMPTY;
        self.occupants[index] = entity.generation().next();
        for pool in self.pools.iter_mut().flatten() {
            pool.clear(index);
        }
    }

    /// The number of pools created so far.
    pub fn pool_count(&self) -> usize {
        self.pools.iter().flatten().count()
    }
}
