//! Component types used by the benchmarks in addition to the engine's gameplay components.

use ember_macros::Component;

/// Seconds a particle has left, out of `total`.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Lifetime {
    pub remaining: f32,
    pub total: f32,
}

/// A particle marker.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Particle;

/// Hit points, used to give entities a wider signature than the systems require.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}
