use log::trace;

use ember_macros::System;

use crate::ecs::{Components, Result, system::Members};

use super::{
    canvas::{Canvas, Rect},
    components::{RigidBody, Sprite, Transform},
};

/// Integrates velocity into position for every entity with a [`Transform`] and a [`RigidBody`].
#[derive(System)]
pub struct MovementSystem {
    members: Members,
}

impl MovementSystem {
    pub fn new() -> Result<Self> {
        Ok(Self {
            members: Members::requiring::<(Transform, RigidBody)>()?,
        })
    }

    /// Advance every member by `dt` seconds.
    pub fn update(&self, components: &mut Components, dt: f32) -> Result<()> {
        for &entity in self.members.entities() {
            let velocity = components.get::<RigidBody>(entity)?.velocity;
            let transform = components.get_mut::<Transform>(entity)?;
            transform.position += velocity * dt;

            trace!(
                "entity {entity} position is now ({}, {})",
                transform.position.x, transform.position.y
            );
        }
        Ok(())
    }
}

/// Draws every entity with a [`Sprite`] and a [`Transform`], wrapping positions around the canvas.
#[derive(System)]
pub struct RenderSystem {
    members: Members,
}

impl RenderSystem {
    pub fn new() -> Result<Self> {
        Ok(Self {
            members: Members::requiring::<(Sprite, Transform)>()?,
        })
    }

    /// The destination of a sprite at `transform` on a `width` x `height` canvas.
    ///
    /// Positions wrap with a Euclidean modulo, so an entity leaving the left edge reappears on the
    /// right. Both dimensions must be non-zero.
    pub fn destination(transform: &Transform, sprite: &Sprite, width: u32, height: u32) -> Rect {
        let x = (transform.position.x as i64).rem_euclid(i64::from(width));
        let y = (transform.position.y as i64).rem_euclid(i64::from(height));
        Rect::new(x as i32, y as i32, sprite.width, sprite.height)
    }

    /// Draw every member onto `canvas`. A canvas with no area draws nothing.
    pub fn update(&self, components: &Components, canvas: &mut dyn Canvas) -> Result<()> {
        let (width, height) = canvas.size();
        if width == 0 || height == 0 {
            return Ok(());
        }

        for &entity in self.members.entities() {
            let transform = components.get::<Transform>(entity)?;
            let sprite = components.get::<Sprite>(entity)?;
            canvas.draw(sprite, Self::destination(transform, sprite, width, height));
        }
        Ok(())
    }
}
