use std::{
    any::{TypeId, type_name},
    sync::{
        PoisonError, RwLock,
        atomic::{AtomicU32, Ordering},
    },
};

use dashmap::DashMap;

use crate::ecs::component::{Component, Id};

/// A thread-safe table assigning ids to component types.
///
/// Lookups of already-registered types are lock-free reads of the sharded `DashMap`. Registering
/// a new type locks one shard plus the name table, and happens once per type.
///
/// Ids are never released. The counter is shared by all types, so ids are dense in the order
/// types were first seen.
pub struct Registry {
    /// Map from the Rust `TypeId` to the component id.
    type_map: DashMap<TypeId, Id>,

    /// Type names indexed by component id, for diagnostics.
    names: RwLock<Vec<&'static str>>,

    /// Next available component identifier.
    next_id: AtomicU32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a new, empty component table.
    #[inline]
    pub fn new() -> Self {
        Self {
            type_map: DashMap::new(),
            names: RwLock::new(Vec::new()),
            next_id: AtomicU32::new(0),
        }
    }

    /// Get the id for component type `C`, assigning one if this is the first time it is seen.
    pub fn register<C: Component>(&self) -> Id {
        let type_id = TypeId::of::<C>();

        // Fast path: already registered (lock-free read)
        if let Some(id) = self.type_map.get(&type_id) {
            return *id;
        }

        // The entry API holds the shard lock, so two threads missing the fast path at once still
        // agree on a single id.
        *self
            .type_map
            .entry(type_id)
            .or_insert_with(|| {
                let id = Id::new(self.next_id.fetch_add(1, Ordering::Relaxed));

                let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
                if id.index() >= names.len() {
                    names.resize(id.index() + 1, "");
                }
                names[id.index()] = type_name::<C>();

                id
            })
            .value()
    }

    /// Get the id for component type `C`, if it was registered.
    #[inline]
    pub fn get<C: Component>(&self) -> Option<Id> {
        self.type_map
            .get(&TypeId::of::<C>())
            .map(|entry| *entry.value())
    }

    /// Get the type name registered under `id`.
    pub fn name(&self, id: Id) -> Option<&'static str> {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        names.get(id.index()).copied().filter(|name| !name.is_empty())
    }

    /// The number of registered component types.
    #[inline]
    pub fn len(&self) -> usize {
        self.type_map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_map.is_empty()
    }
}
