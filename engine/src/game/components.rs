use std::ops::{Add, AddAssign, Mul, Sub};

use ember_macros::Component;

/// A 2D vector in world units.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Where an entity is, how large it is drawn and which way it faces (degrees).
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
    pub rotation: f64,
}

impl Transform {
    pub const fn new(position: Vec2, scale: Vec2, rotation: f64) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }

    /// A transform at `position` with unit scale and no rotation.
    pub const fn at(position: Vec2) -> Self {
        Self::new(position, Vec2::new(1.0, 1.0), 0.0)
    }
}

/// Linear velocity in world units per second.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec2,
}

impl RigidBody {
    pub const fn new(velocity: Vec2) -> Self {
        Self { velocity }
    }
}

/// A drawable image. `texture` is an asset key resolved by the host's canvas.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: String,
    pub width: u32,
    pub height: u32,
}

impl Sprite {
    pub const DEFAULT_WIDTH: u32 = 16;
    pub const DEFAULT_HEIGHT: u32 = 32;

    pub fn new(texture: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            texture: texture.into(),
            width,
            height,
        }
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new("", Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}
