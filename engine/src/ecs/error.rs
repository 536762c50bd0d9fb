use crate::ecs::entity::Entity;

/// Errors surfaced by the registry and its storage.
///
/// There is no I/O in the core, so every variant is either a configuration error (too many
/// component types, a system that was never registered) or a usage error (an entity or component
/// that is not there). All of them are returned to the caller of the offending operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A component type was assigned an id that does not fit in a [`Signature`](crate::ecs::Signature).
    #[error("component id {id} exceeds the signature capacity of {capacity} component types")]
    ComponentCapacity { id: u32, capacity: usize },

    /// The entity id was never handed out by this registry.
    #[error("entity {0} was never spawned")]
    UnknownEntity(Entity),

    /// The entity was killed and reconciled; its id may since have been reused.
    #[error("entity {0} is no longer alive")]
    StaleEntity(Entity),

    /// The entity's signature does not include the requested component.
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    /// A pool slot outside of the pool's current length was addressed.
    #[error("slot {index} is out of bounds for a pool of length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// A pool slot was read before anything was stored in it.
    #[error("slot {index} holds no component")]
    EmptySlot { index: usize },

    /// A type-erased pool did not hold the requested component type.
    #[error("pool does not store {component} components")]
    PoolType { component: &'static str },

    /// No system of this type is registered.
    #[error("system {0} is not registered")]
    UnknownSystem(&'static str),

    /// A system of this type is already registered.
    #[error("system {0} is already registered")]
    DuplicateSystem(&'static str),
}

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;
