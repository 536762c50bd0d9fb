//! Scene scenario.
//!
//! A stable population where most entities move and everything is drawn each frame. A share of
//! the entities carry extra components the systems never ask for, and a share never get a rigid
//! body, so membership matching sees a mix of signatures.

use ember_engine::{
    ecs::{Registry, Result, System},
    game::{Canvas, MovementSystem, Rect, RenderSystem, RigidBody, Sprite, Transform, Vec2},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::components::Health;
use crate::scenarios::Scenario;

/// Configuration for the scene benchmark.
pub struct SceneConfig {
    pub entity_count: usize,
    /// Fraction of entities that get a rigid body.
    pub moving_ratio: f64,
    /// Fraction of entities that get a health component.
    pub health_ratio: f64,
    pub delta_time: f32,
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            entity_count: 10_000,
            moving_ratio: 0.8,
            health_ratio: 0.5,
            delta_time: 1.0 / 60.0,
            seed: 42,
        }
    }
}

/// A canvas that only counts draw calls.
#[derive(Default)]
pub struct CountingCanvas {
    pub draws: usize,
}

impl Canvas for CountingCanvas {
    fn size(&self) -> (u32, u32) {
        (600, 600)
    }

    fn draw(&mut self, _sprite: &Sprite, _dest: Rect) {
        self.draws += 1;
    }
}

/// Scene benchmark scenario.
pub struct SceneScenario {
    config: SceneConfig,
    registry: Registry,
    canvas: CountingCanvas,
    moving: usize,
}

impl SceneScenario {
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            config,
            registry: Registry::new(),
            canvas: CountingCanvas::default(),
            moving: 0,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of entities spawned with a rigid body.
    pub fn moving(&self) -> usize {
        self.moving
    }

    /// Draw calls issued since setup.
    pub fn draws(&self) -> usize {
        self.canvas.draws
    }
}

impl Default for SceneScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for SceneScenario {
    fn name(&self) -> &'static str {
        "scene"
    }

    fn description(&self) -> &'static str {
        "Stable population with movement and rendering every frame"
    }

    fn entity_count(&self) -> usize {
        self.config.entity_count
    }

    fn setup(&mut self) -> Result<()> {
        self.registry.add_system(MovementSystem::new()?)?;
        self.registry.add_system(RenderSystem::new()?)?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        for _ in 0..self.config.entity_count {
            let entity = self.registry.spawn();
            let position = Vec2::new(rng.gen_range(0.0..600.0), rng.gen_range(0.0..600.0));
            self.registry
                .entity_mut(entity)?
                .add(Transform::at(position))?
                .add(Sprite::default())?;

            if rng.gen_bool(self.config.moving_ratio) {
                let velocity = Vec2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
                self.registry.add_component(entity, RigidBody::new(velocity))?;
                self.moving += 1;
            }
            if rng.gen_bool(self.config.health_ratio) {
                self.registry.add_component(
                    entity,
                    Health {
                        current: 100.0,
                        max: 100.0,
                    },
                )?;
            }
        }
        self.registry.update();
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        let dt = self.config.delta_time;
        self.registry
            .run_system(|movement: &mut MovementSystem, components| {
                movement.update(components, dt)
            })??;

        let canvas = &mut self.canvas;
        self.registry
            .run_system(|render: &mut RenderSystem, components| render.update(components, canvas))??;

        self.registry.update();
        Ok(())
    }

    fn teardown(&mut self) -> Result<()> {
        let alive = self
            .registry
            .system::<RenderSystem>()
            .map(|render| render.members().entities().to_vec())?;
        for entity in alive {
            self.registry.kill(entity)?;
        }
        self.registry.update();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_matches_movers_and_draws_everything() {
        let mut scenario = SceneScenario::with_config(SceneConfig {
            entity_count: 200,
            ..Default::default()
        });

        scenario.setup().unwrap();
        scenario.update().unwrap();

        let movers = scenario
            .registry()
            .system::<MovementSystem>()
            .unwrap()
            .members()
            .len();
        assert_eq!(movers, scenario.moving());
        assert_eq!(scenario.draws(), 200);

        scenario.teardown().unwrap();
        assert!(scenario.registry().is_empty());
    }
}
