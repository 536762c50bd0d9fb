//! Gameplay content built on the ECS: the components and systems a simple 2D scene needs.
//!
//! Nothing in here is privileged. These types use only the public [`crate::ecs`] API and serve
//! as the reference for writing further content.

pub mod canvas;
pub mod components;
pub mod systems;

pub use canvas::{Canvas, Rect};
pub use components::{RigidBody, Sprite, Transform, Vec2};
pub use systems::{MovementSystem, RenderSystem};
