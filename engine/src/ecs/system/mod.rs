//! Systems: behaviour units that operate on the entities matching a component requirement.
//!
//! A system owns a [`Members`] value holding its required [`Signature`](crate::ecs::Signature)
//! and the live list of entities satisfying it. The registry keeps that list up to date at its
//! end-of-frame [`update`](crate::ecs::Registry::update); the system only reads it. What a system
//! does each frame is its own business, so per-frame entry points are plain inherent methods
//! invoked through [`Registry::run_system`](crate::ecs::Registry::run_system):
//!
//! ```rust,ignore
//! use ember_engine::ecs::{Components, Result, system::Members};
//! use ember_macros::System;
//!
//! #[derive(System)]
//! struct Gravity {
//!     members: Members,
//! }
//!
//! impl Gravity {
//!     fn new() -> Result<Self> {
//!         Ok(Self { members: Members::requiring::<(Position, Velocity)>()? })
//!     }
//!
//!     fn update(&self, components: &mut Components, dt: f32) -> Result<()> {
//!         for &entity in self.members.entities() {
//!             components.get_mut::<Velocity>(entity)?.y -= 9.8 * dt;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! registry.add_system(Gravity::new()?)?;
//! registry.run_system(|gravity: &mut Gravity, components| gravity.update(components, dt))??;
//! ```

use std::any::{Any, type_name};

mod members;

pub use members::Members;

/// A behaviour unit registered with a [`Registry`](crate::ecs::Registry), at most one per type.
///
/// Use `#[derive(System)]` from `ember_macros` on a struct with a `members: Members` field (or a
/// field tagged `#[members]`) rather than implementing this by hand.
pub trait System: Any {
    /// The system's requirement and current membership.
    fn members(&self) -> &Members;

    /// Mutable access to the membership, used by the registry during reconciliation.
    fn members_mut(&mut self) -> &mut Members;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// A readable name for logs and errors.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}
