//! Repeatable game workloads for benchmarking.
//!
//! - **Particles**: many short-lived entities, so every frame spawns and kills.
//! - **Scene**: a stable population with movement and rendering every frame.

pub mod particles;
pub mod scene;

pub use particles::{ParticleConfig, ParticleScenario};
pub use scene::{SceneConfig, SceneScenario};

use ember_engine::ecs::Result;

/// Common trait for benchmark scenarios.
pub trait Scenario {
    /// Human-readable name of the scenario.
    fn name(&self) -> &'static str;

    /// Brief description of what this scenario tests.
    fn description(&self) -> &'static str;

    /// Number of entities in this scenario.
    fn entity_count(&self) -> usize;

    /// Set up the scenario (spawn entities, register systems).
    fn setup(&mut self) -> Result<()>;

    /// Run one frame of the scenario.
    fn update(&mut self) -> Result<()>;

    /// Kill every entity and reconcile.
    fn teardown(&mut self) -> Result<()>;
}
