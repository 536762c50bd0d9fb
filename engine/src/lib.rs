//! Ember: an entity-component-system core for small 2D games.
//!
//! Entities are bare identities, components are plain data stored in one densely indexed pool
//! per type, and systems receive the entities whose component set covers their requirement.
//! Membership changes are deferred to a single synchronization point at the end of each frame
//! ([`ecs::Registry::update`]).
//!
//! - [`ecs`]: the registry, component pools, signatures and systems.
//! - [`core`]: engine plumbing shared by hosts (logging sink, fixed-step clock).
//! - [`game`]: the reference gameplay content (transform/rigid body/sprite components and the
//!   movement and render systems).

// Allows `::ember_engine::...` paths emitted by the derive macros to resolve inside this crate.
extern crate self as ember_engine;

pub mod core;
pub mod ecs;
pub mod game;
