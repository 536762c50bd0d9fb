//! The registry: the single owner and mutator of entities, component storage and systems.
//!
//! # Two-phase frames
//!
//! Mutation and membership are kept apart:
//!
//! 1. **Mutation phase.** [`Registry::spawn`], [`Registry::kill`], component attach/detach and
//!    system registration may be interleaved freely. Component changes are visible to reads
//!    immediately; membership changes are only *recorded* in pending sets.
//! 2. **Reconciliation.** [`Registry::update`] is called once at the end of the frame. It registers
//!    pending spawns with every matching system, re-matches entities whose signature changed,
//!    evicts killed entities from every system, drops their data and recycles their ids.
//!
//! Systems run through [`Registry::run_system`], which lends them their own membership list and
//! the component storage as disjoint borrows. Because `update` needs `&mut Registry`, the borrow
//! checker rules out reconciling while a system is iterating.
//!
//! ```rust,ignore
//! let mut registry = Registry::new();
//! registry.add_system(MovementSystem::new()?)?;
//!
//! let entity = registry.spawn();
//! registry.add_component(entity, Transform::default())?;
//! registry.add_component(entity, RigidBody::new(Vec2::new(100.0, 50.0)))?;
//!
//! registry.update(); // entity joins MovementSystem here
//! registry.run_system(|movement: &mut MovementSystem, components| movement.update(components, dt))??;
//! ```

use std::{
    any::{TypeId, type_name},
    collections::HashMap,
};

use fixedbitset::FixedBitSet;
use log::{debug, info, trace};

use crate::ecs::{
    component::Component,
    entity::{self, Entity},
    error::{Error, Result},
    signature::Signature,
    storage::Components,
    system::System,
};

/// Grow `set` as needed and mark `index`.
#[inline]
fn mark(set: &mut FixedBitSet, index: usize) {
    if index >= set.len() {
        set.grow(index + 1);
    }
    set.insert(index);
}

/// Unmark `index` if it is within the set.
#[inline]
fn unmark(set: &mut FixedBitSet, index: usize) {
    if index < set.len() {
        set.set(index, false);
    }
}

/// Take the marked indices out of `set`, leaving it empty.
fn drain(set: &mut FixedBitSet) -> Vec<usize> {
    let marked: Vec<usize> = set.ones().collect();
    set.clear();
    marked
}

/// The central authority over entities, components and systems.
#[derive(Default)]
pub struct Registry {
    /// Entity id allocation and recycling.
    entities: entity::Allocator,

    /// Entities spawned and not yet killed.
    alive: usize,

    /// Entities spawned since the last reconciliation.
    to_spawn: FixedBitSet,

    /// Entities killed since the last reconciliation.
    to_kill: FixedBitSet,

    /// Reconciled entities whose signature changed, or that a newly added system has not seen.
    to_sync: FixedBitSet,

    /// Entities that went through spawn reconciliation and were not yet evicted.
    active: FixedBitSet,

    /// Component pools and per-entity signatures.
    components: Components,

    /// Registered systems keyed by their type.
    systems: HashMap<TypeId, Box<dyn System>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that `entity` was issued by this registry and has not been reconciled away.
    fn check(&self, entity: Entity) -> Result<()> {
        if !self.entities.contains_id(entity) {
            Err(Error::UnknownEntity(entity))
        } else if !self.entities.is_current(entity) {
            Err(Error::StaleEntity(entity))
        } else {
            Ok(())
        }
    }

    /// Create an entity with an empty signature.
    ///
    /// The entity is invisible to every system until the next [`Registry::update`].
    pub fn spawn(&mut self) -> Entity {
        let entity = self.entities.alloc();
        self.components.admit(entity);
        mark(&mut self.to_spawn, entity.index());
        self.alive += 1;

        info!("entity {entity} spawned");
        entity
    }

    /// Schedule `entity` for destruction at the next [`Registry::update`].
    ///
    /// Until then it keeps its components and its system memberships. Killing an entity that is
    /// already scheduled does nothing.
    pub fn kill(&mut self, entity: Entity) -> Result<()> {
        self.check(entity)?;
        if self.to_kill.contains(entity.index()) {
            return Ok(());
        }
        mark(&mut self.to_kill, entity.index());
        self.alive -= 1;

        info!("entity {entity} scheduled for removal");
        Ok(())
    }

    /// The number of live entities: spawned and not killed.
    #[inline]
    pub fn len(&self) -> usize {
        self.alive
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alive == 0
    }

    /// Whether `entity` is current and not scheduled to be killed.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.check(entity).is_ok() && !self.to_kill.contains(entity.index())
    }

    /// Whether `entity` was spawned since the last reconciliation.
    pub fn is_pending_spawn(&self, entity: Entity) -> bool {
        self.check(entity).is_ok() && self.to_spawn.contains(entity.index())
    }

    /// Whether `entity` is scheduled to be killed at the next reconciliation.
    pub fn is_pending_kill(&self, entity: Entity) -> bool {
        self.check(entity).is_ok() && self.to_kill.contains(entity.index())
    }

    /// Borrow an entity handle with read access to its components.
    pub fn entity(&self, entity: Entity) -> Result<entity::Ref<'_>> {
        self.check(entity)?;
        Ok(entity::Ref::new(entity, &self.components))
    }

    /// Borrow an entity handle that can attach and detach components.
    pub fn entity_mut(&mut self, entity: Entity) -> Result<entity::RefMut<'_>> {
        self.check(entity)?;
        Ok(entity::RefMut::new(entity, self))
    }

    /// Record that an already reconciled entity needs its memberships re-evaluated.
    fn signature_changed(&mut self, entity: Entity) {
        if self.active.contains(entity.index()) {
            mark(&mut self.to_sync, entity.index());
        }
    }

    /// Attach `value` to `entity`, replacing any existing `C`.
    pub fn add_component<C: Component>(&mut self, entity: Entity, value: C) -> Result<()> {
        self.check(entity)?;
        let had = self.components.has::<C>(entity);
        self.components.insert(entity, value)?;
        if !had {
            self.signature_changed(entity);
        }

        debug!("component {} added to entity {entity}", type_name::<C>());
        Ok(())
    }

    /// Detach `C` from `entity`. Only the signature bit is cleared; the stored value stays in
    /// its pool until overwritten or until the entity is killed.
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Result<()> {
        self.check(entity)?;
        if self.components.remove::<C>(entity)? {
            self.signature_changed(entity);
            debug!("component {} removed from entity {entity}", type_name::<C>());
        }
        Ok(())
    }

    /// Whether `entity` currently has a `C`. Unknown and stale entities have nothing.
    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        self.check(entity).is_ok() && self.components.has::<C>(entity)
    }

    /// Get the entity's `C` component.
    pub fn get_component<C: Component>(&self, entity: Entity) -> Result<&C> {
        self.check(entity)?;
        self.components.get::<C>(entity)
    }

    /// Get the entity's `C` component mutably.
    pub fn get_component_mut<C: Component>(&mut self, entity: Entity) -> Result<&mut C> {
        self.check(entity)?;
        self.components.get_mut::<C>(entity)
    }

    /// Get the entity's current signature.
    pub fn signature(&self, entity: Entity) -> Result<Signature> {
        self.check(entity)?;
        self.components.signature(entity)
    }

    /// The component storage.
    #[inline]
    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Add `entity` to every system whose requirement its signature satisfies.
    ///
    /// Entities already present in a system are not added twice.
    pub fn add_entity_to_systems(&mut self, entity: Entity) -> Result<()> {
        self.check(entity)?;
        let signature = self.components.signature(entity)?;
        for system in self.systems.values_mut() {
            if system.members().matches(signature) && system.members_mut().add(entity) {
                trace!("entity {entity} joined {}", system.name());
            }
        }
        Ok(())
    }

    /// Re-match `entity` against every system: join the ones it now satisfies, leave the rest.
    ///
    /// Only called for current entities, whose slot the component storage always covers.
    fn sync_entity(&mut self, entity: Entity) {
        let signature = self.components.signature_at(entity.index());
        for system in self.systems.values_mut() {
            if system.members().matches(signature) {
                if system.members_mut().add(entity) {
                    trace!("entity {entity} joined {}", system.name());
                }
            } else if system.members_mut().remove(entity) {
                trace!("entity {entity} left {}", system.name());
            }
        }
    }

    /// Remove `entity` from every system, drop its data and release its id.
    fn evict(&mut self, entity: Entity) {
        for system in self.systems.values_mut() {
            if system.members_mut().remove(entity) {
                trace!("entity {entity} left {}", system.name());
            }
        }
        self.components.clear(entity);
        unmark(&mut self.active, entity.index());
        unmark(&mut self.to_sync, entity.index());
        self.entities.free(entity);
        info!("entity {entity} removed");
    }

    /// Reconcile pending spawns, signature changes and kills with the registered systems.
    ///
    /// Call once per frame, after systems ran. Calling it again without intervening mutation
    /// changes nothing.
    pub fn update(&mut self) {
        let spawned = drain(&mut self.to_spawn);
        let synced = drain(&mut self.to_sync);
        let killed = drain(&mut self.to_kill);

        for &index in &spawned {
            if let Some(entity) = self.entities.current(index) {
                // A full sync rather than a join: the entity may already have been added to
                // systems by hand and lost components since.
                self.sync_entity(entity);
                mark(&mut self.active, index);
            }
        }

        for &index in &synced {
            if let Some(entity) = self.entities.current(index) {
                self.sync_entity(entity);
            }
        }

        for &index in &killed {
            if let Some(entity) = self.entities.current(index) {
                self.evict(entity);
            }
        }

        if !(spawned.is_empty() && synced.is_empty() && killed.is_empty()) {
            debug!(
                "reconciled {} spawned, {} changed, {} killed entities",
                spawned.len(),
                synced.len(),
                killed.len()
            );
        }
    }

    /// Register `system`. At most one system per type may be registered.
    ///
    /// Entities that are already active are matched against the new system at the next
    /// [`Registry::update`].
    pub fn add_system<S: System>(&mut self, system: S) -> Result<()> {
        let key = TypeId::of::<S>();
        if self.systems.contains_key(&key) {
            return Err(Error::DuplicateSystem(type_name::<S>()));
        }
        self.systems.insert(key, Box::new(system));
        self.to_sync.union_with(&self.active);

        info!(
            "system {} registered ({} systems)",
            type_name::<S>(),
            self.systems.len()
        );
        Ok(())
    }

    /// Unregister the system of type `S`, handing it back.
    pub fn remove_system<S: System>(&mut self) -> Result<S> {
        let system = self
            .systems
            .remove(&TypeId::of::<S>())
            .ok_or(Error::UnknownSystem(type_name::<S>()))?;

        info!("system {} removed", type_name::<S>());
        system
            .into_any()
            .downcast::<S>()
            .map(|system| *system)
            .map_err(|_| Error::UnknownSystem(type_name::<S>()))
    }

    /// Whether a system of type `S` is registered.
    #[inline]
    pub fn has_system<S: System>(&self) -> bool {
        self.systems.contains_key(&TypeId::of::<S>())
    }

    /// Get the registered system of type `S`.
    pub fn system<S: System>(&self) -> Result<&S> {
        self.systems
            .get(&TypeId::of::<S>())
            .and_then(|system| system.as_any().downcast_ref::<S>())
            .ok_or(Error::UnknownSystem(type_name::<S>()))
    }

    /// Get the registered system of type `S` mutably.
    pub fn system_mut<S: System>(&mut self) -> Result<&mut S> {
        self.systems
            .get_mut(&TypeId::of::<S>())
            .and_then(|system| system.as_any_mut().downcast_mut::<S>())
            .ok_or(Error::UnknownSystem(type_name::<S>()))
    }

    /// Run `f` with the system of type `S` and the component storage.
    ///
    /// The system sees a stable membership list for the whole call: reconciliation cannot run
    /// until `f` returns.
    pub fn run_system<S: System, R>(
        &mut self,
        f: impl FnOnce(&mut S, &mut Components) -> R,
    ) -> Result<R> {
        let Self {
            systems,
            components,
            ..
        } = self;
        let system = systems
            .get_mut(&TypeId::of::<S>())
            .and_then(|system| system.as_any_mut().downcast_mut::<S>())
            .ok_or(Error::UnknownSystem(type_name::<S>()))?;
        Ok(f(system, components))
    }

    /// The number of registered systems.
    #[inline]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }
}
