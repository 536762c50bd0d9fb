//! Entity identities and their allocation.
//!
//! An [`Entity`] carries no data. It is an index into the registry's signature table and
//! component pools, plus a [`Generation`] that changes every time the index is recycled, so a
//! handle to a killed entity can be told apart from the entity that later reuses its slot.
//!
//! ```rust,ignore
//! let entity = allocator.alloc(); // Entity { id: 0, generation: 0 }
//! allocator.free(entity);
//! let reused = allocator.alloc(); // Entity { id: 0, generation: 1 }
//! assert!(!allocator.is_current(entity));
//! ```
//!
//! Borrowed handles that pair an entity with its registry live in [`Ref`] and [`RefMut`].

mod reference;

use std::fmt;

use fixedbitset::FixedBitSet;

pub use reference::{Ref, RefMut};

/// The generation of an entity slot. Starts at `FIRST` and is bumped each time the slot is freed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u32);

impl Generation {
    /// The first generation of an entity.
    pub(crate) const FIRST: Self = Self(0);

    /// Get the next generation from the current.
    #[inline]
    pub fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// The raw generation value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

/// An entity identifier: the slot an entity occupies in every indexed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// The raw id value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// An entity in the ECS.
///
/// At most one live entity exists per `id`; the `generation` tells whether this handle still
/// refers to it. Entities order by id, then generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    /// The unique identifier of the entity.
    id: Id,

    /// The generation of the entity.
    generation: Generation,
}

impl Entity {
    /// Construct a first-generation entity from a raw id.
    #[inline]
    pub(crate) fn new(id: impl Into<Id>) -> Self {
        Self::new_with_generation(id.into(), Generation::FIRST)
    }

    #[inline]
    pub(crate) const fn new_with_generation(id: Id, generation: Generation) -> Self {
        Self { id, generation }
    }

    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Get the index of this entity if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.id.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == Generation::FIRST {
            write!(f, "{}", self.id.0)
        } else {
            write!(f, "{}v{}", self.id.0, self.generation.0)
        }
    }
}

/// Hands out entity ids and recycles the ones released by killed entities.
///
/// Fresh ids are sequential. Released ids go onto a free list with their generation bumped and
/// are reused last-in first-out before any fresh id is minted.
#[derive(Default, Debug)]
pub struct Allocator {
    /// Current generation of every slot ever handed out, indexed by id.
    generations: Vec<Generation>,

    /// Ids available for reuse.
    free: Vec<Id>,

    /// Marks the slots currently on the free list.
    released: FixedBitSet,
}

impl Allocator {
    #[inline]
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free: Vec::new(),
            released: FixedBitSet::new(),
        }
    }

    /// Allocate an entity, reusing a released id when one is available.
    pub fn alloc(&mut self) -> Entity {
        if let Some(id) = self.free.pop() {
            self.released.set(id.0 as usize, false);
            return Entity::new_with_generation(id, self.generations[id.0 as usize]);
        }

        let id = Id(self.generations.len() as u32);
        self.generations.push(Generation::FIRST);
        Entity::new(id)
    }

    /// Release an entity's id for reuse. Releasing a handle that is not current does nothing.
    pub fn free(&mut self, entity: Entity) {
        if !self.is_current(entity) {
            return;
        }
        let slot = &mut self.generations[entity.index()];
        *slot = slot.next();
        self.released.grow(entity.index() + 1);
        self.released.insert(entity.index());
        self.free.push(entity.id);
    }

    /// Whether `entity` was ever handed out by this allocator.
    #[inline]
    pub fn contains_id(&self, entity: Entity) -> bool {
        entity.index() < self.generations.len()
    }

    /// Whether `entity` is the current occupant of its slot.
    ///
    /// Freeing bumps the slot's generation, so every handle issued before the free stops being
    /// current immediately.
    #[inline]
    pub fn is_current(&self, entity: Entity) -> bool {
        self.generations.get(entity.index()) == Some(&entity.generation)
    }

    /// The current handle for slot `index`, if that slot is allocated and not waiting for reuse.
    pub fn current(&self, index: usize) -> Option<Entity> {
        let generation = *self.generations.get(index)?;
        (!self.released.contains(index))
            .then_some(Entity::new_with_generation(Id(index as u32), generation))
    }

    /// The number of slots ever handed out (live and free).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }

    /// The number of slots waiting for reuse.
    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }
}

#[test]
fn allocator_uniqueness() {
    // Given
    let mut allocator = Allocator::default();

    // When
    let mut entities: Vec<_> = (0..200).map(|_| allocator.alloc()).collect();

    // Then - No dupes generated, ids are sequential
    let pre_len = entities.len();
    entities.sort();
    entities.dedup();
    assert_eq!(pre_len, entities.len());
    assert_eq!(entities[199].index(), 199);
}

#[test]
fn allocator_reuse() {
    // Given
    let mut allocator = Allocator::default();
    let entities: Vec<_> = (0..10).map(|_| allocator.alloc()).collect();

    // When
    for e in entities.iter() {
        allocator.free(*e);
    }
    let mut reused: Vec<_> = (0..10).map(|_| allocator.alloc()).collect();

    // Then - Entities should be reused with incremented generation
    reused.sort();
    for (i, e) in reused.iter().enumerate() {
        assert_eq!(e.index(), i);
        assert_eq!(e.generation().value(), 1);
    }
    assert_eq!(allocator.capacity(), 10);
    assert!(entities.iter().all(|e| !allocator.is_current(*e)));
}

#[test]
fn allocator_free_and_reuse_cycle() {
    // Given
    let mut allocator = Allocator::default();
    let e1 = allocator.alloc();
    let e2 = allocator.alloc();

    // When
    allocator.free(e1);

    // Then
    assert_eq!(allocator.free_len(), 1);
    assert!(!allocator.is_current(e1));
    assert!(allocator.is_current(e2));
    assert_eq!(allocator.current(0), None);

    // When - freeing a stale handle is ignored
    allocator.free(e1);

    // Then
    assert_eq!(allocator.free_len(), 1);

    // When
    let reused = allocator.alloc();
    let fresh = allocator.alloc();

    // Then
    assert_eq!(reused.id(), e1.id());
    assert_eq!(reused.generation(), e1.generation().next());
    assert_eq!(allocator.current(0), Some(reused));
    assert_eq!(fresh.index(), 2);
    assert!(allocator.contains_id(fresh));
    assert!(!allocator.contains_id(Entity::new(3)));
}

#[test]
fn entity_display_and_order() {
    let first = Entity::new(4);
    let later = Entity::new_with_generation(Id(4), Generation(2));
    assert_eq!(first.to_string(), "4");
    assert_eq!(later.to_string(), "4v2");
    assert!(first < later);
    assert!(Entity::new(3) < first);
}
