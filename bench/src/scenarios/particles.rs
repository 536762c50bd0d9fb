//! Particle churn scenario.
//!
//! Maintains a fixed number of particles, each with a random velocity and lifetime. Every frame
//! moves them, decays lifetimes, kills expired particles and spawns replacements, so
//! reconciliation handles spawns and kills every frame and ids are constantly recycled.

use ember_engine::{
    ecs::{Components, Entity, Registry, Result, System, system::Members},
    game::{MovementSystem, RigidBody, Transform, Vec2},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::components::{Lifetime, Particle};
use crate::scenarios::Scenario;

/// Configuration for the particle benchmark.
pub struct ParticleConfig {
    /// Number of particles alive at the start of every frame.
    pub particle_count: usize,
    /// Simulated delta time per frame.
    pub delta_time: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particle_count: 10_000,
            delta_time: 1.0 / 60.0,
            seed: 12345,
        }
    }
}

struct ParticleFactory(ChaCha8Rng);

impl ParticleFactory {
    fn spawn(&mut self, registry: &mut Registry) -> Result<Entity> {
        let rng = &mut self.0;
        let position = Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
        let velocity = Vec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        let lifetime = Lifetime {
            remaining: rng.gen_range(0.1..1.0),
            total: 1.0,
        };

        let entity = registry.spawn();
        registry
            .entity_mut(entity)?
            .add(Particle)?
            .add(Transform::at(position))?
            .add(RigidBody::new(velocity))?
            .add(lifetime)?;
        Ok(entity)
    }
}

/// Decays particle lifetimes and reports the expired ones.
#[derive(System)]
struct LifetimeSystem {
    members: Members,
}

impl LifetimeSystem {
    fn new() -> Result<Self> {
        Ok(Self {
            members: Members::requiring::<(Particle, Lifetime)>()?,
        })
    }

    fn update(&self, components: &mut Components, dt: f32) -> Result<Vec<Entity>> {
        let mut expired = Vec::new();
        for &entity in self.members.entities() {
            let lifetime = components.get_mut::<Lifetime>(entity)?;
            lifetime.remaining -= dt;
            if lifetime.remaining <= 0.0 {
                expired.push(entity);
            }
        }
        Ok(expired)
    }
}

/// Particle churn benchmark scenario.
pub struct ParticleScenario {
    config: ParticleConfig,
    registry: Registry,
    factory: ParticleFactory,
}

impl ParticleScenario {
    pub fn new() -> Self {
        Self::with_config(ParticleConfig::default())
    }

    pub fn with_config(config: ParticleConfig) -> Self {
        Self {
            factory: ParticleFactory(ChaCha8Rng::seed_from_u64(config.seed)),
            registry: Registry::new(),
            config,
        }
    }

    /// Particles currently alive.
    pub fn current_count(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Default for ParticleScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ParticleScenario {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn description(&self) -> &'static str {
        "Short-lived particles with movement, lifetime decay and respawn"
    }

    fn entity_count(&self) -> usize {
        self.config.particle_count
    }

    fn setup(&mut self) -> Result<()> {
        self.registry.add_system(MovementSystem::new()?)?;
        self.registry.add_system(LifetimeSystem::new()?)?;
        for _ in 0..self.config.particle_count {
            self.factory.spawn(&mut self.registry)?;
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
        let expired = self
            .registry
            .run_system(|lifetimes: &mut LifetimeSystem, components| {
                lifetimes.update(components, dt)
            })??;

        for entity in expired {
            self.registry.kill(entity)?;
            self.factory.spawn(&mut self.registry)?;
        }
        self.registry.update();
        Ok(())
    }

    fn teardown(&mut self) -> Result<()> {
        let alive = self.registry.system::<LifetimeSystem>()?.members().entities().to_vec();
        for entity in alive {
            self.registry.kill(entity)?;
        }
        self.registry.update();
        Ok(())
    }
}
