//! Component types and their process-wide numeric ids.
//!
//! Every component type is assigned a small integer [`Id`] the first time any code asks for it.
//! The id is the bit the type occupies in a [`Signature`](crate::ecs::Signature) and the slot its
//! pool occupies in the registry's pool vector.
//!
//! Ids come from a single table shared by every [`Registry`](crate::ecs::Registry) in the process,
//! so the same type always has the same id no matter which world stores it. The table is created
//! lazily behind an init-once guard and tolerates first use from several threads, although the
//! registry itself is single-threaded.
//!
//! ```ignore
//! use ember_engine::ecs::component;
//! use ember_macros::Component;
//!
//! #[derive(Component)]
//! struct Position { x: f32, y: f32 }
//!
//! let id = component::id::<Position>();
//! assert_eq!(id, component::id::<Position>());
//! ```

mod registry;

use std::{fmt, sync::LazyLock};

pub use registry::Registry;

/// A component identifier, unique per component type for the lifetime of the process.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Construct a new component Id from a raw u32 value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the index of this component if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The raw id value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Id {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trait representing a component in the ECS.
///
/// At present this only sets the required trait bounds for a type to be used as a component.
/// Use `#[derive(Component)]` from `ember_macros` to implement it.
pub trait Component: 'static + Sized + Send + Sync {}

/// The table every registry draws component ids from.
static TYPES: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Get the process-wide id for component type `C`, assigning the next free id on first use.
#[inline]
pub fn id<C: Component>() -> Id {
    TYPES.register::<C>()
}

/// Get the type name behind a process-wide component id, if it was assigned.
#[inline]
pub fn name(id: Id) -> Option<&'static str> {
    TYPES.name(id)
}

/// The number of component types that have been assigned an id so far.
#[inline]
pub fn count() -> usize {
    TYPES.len()
}
