//! ECS microbenchmarks using Criterion.
//!
//! These benchmarks measure individual registry operations in isolation:
//! - Entity spawn with component attach
//! - Reconciliation of pending spawns into systems
//! - Movement iteration over system members
//! - Kill reconciliation and id recycling
//! - Whole-frame scenarios

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ember_bench::components::Health;
use ember_bench::scenarios::{ParticleConfig, ParticleScenario, Scenario, SceneConfig, SceneScenario};
use ember_engine::{
    ecs::{Entity, Registry},
    game::{MovementSystem, RigidBody, Transform, Vec2},
};

/// A registry with `n` reconciled movers.
fn populated(n: usize) -> (Registry, Vec<Entity>) {
    let mut registry = Registry::new();
    registry.add_system(MovementSystem::new().unwrap()).unwrap();
    let entities = (0..n)
        .map(|i| {
            let entity = registry.spawn();
            registry
                .add_component(entity, Transform::at(Vec2::new(i as f32, 0.0)))
                .unwrap();
            registry
                .add_component(entity, RigidBody::new(Vec2::new(1.0, 1.0)))
                .unwrap();
            entity
        })
        .collect();
    registry.update();
    (registry, entities)
}

// =============================================================================
// Spawn Benchmarks
// =============================================================================

fn bench_spawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn");

    for count in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("empty", count), &count, |b, &n| {
            b.iter(|| {
                let mut registry = Registry::new();
                for _ in 0..n {
                    black_box(registry.spawn());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("three_components", count), &count, |b, &n| {
            b.iter(|| {
                let mut registry = Registry::new();
                for _ in 0..n {
                    let entity = registry.spawn();
                    registry.add_component(entity, Transform::default()).unwrap();
                    registry.add_component(entity, RigidBody::default()).unwrap();
                    registry.add_component(entity, Health::default()).unwrap();
                    black_box(entity);
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// Reconciliation Benchmarks
// =============================================================================

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for count in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("pending_spawns", count), &count, |b, &n| {
            b.iter_batched(
                || {
                    let mut registry = Registry::new();
                    registry.add_system(MovementSystem::new().unwrap()).unwrap();
                    for _ in 0..n {
                        let entity = registry.spawn();
                        registry.add_component(entity, Transform::default()).unwrap();
                        registry.add_component(entity, RigidBody::default()).unwrap();
                    }
                    registry
                },
                |mut registry| {
                    registry.update();
                    registry
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("idle", count), &count, |b, &n| {
            let (mut registry, _) = populated(n);
            b.iter(|| registry.update());
        });
    }

    group.finish();
}

// =============================================================================
// Iteration Benchmarks
// =============================================================================

fn bench_movement(c: &mut Criterion) {
    let mut group = c.benchmark_group("movement");

    for count in [1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &n| {
            let (mut registry, _) = populated(n);
            b.iter(|| {
                registry
                    .run_system(|movement: &mut MovementSystem, components| {
                        movement.update(components, black_box(1.0 / 60.0))
                    })
                    .unwrap()
                    .unwrap();
            });
        });
    }

    group.finish();
}

// =============================================================================
// Kill Benchmarks
// =============================================================================

fn bench_kill(c: &mut Criterion) {
    let mut group = c.benchmark_group("kill");

    for count in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("reconcile", count), &count, |b, &n| {
            b.iter_batched(
                || populated(n),
                |(mut registry, entities)| {
                    for entity in entities {
                        registry.kill(entity).unwrap();
                    }
                    registry.update();
                    registry
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Scenario Benchmarks
// =============================================================================

fn bench_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario");
    group.sample_size(20);

    let mut particles = ParticleScenario::with_config(ParticleConfig::default());
    particles.setup().unwrap();
    group.throughput(Throughput::Elements(particles.entity_count() as u64));
    group.bench_function(particles.name(), |b| b.iter(|| particles.update().unwrap()));
    particles.teardown().unwrap();

    let mut scene = SceneScenario::with_config(SceneConfig::default());
    scene.setup().unwrap();
    group.throughput(Throughput::Elements(scene.entity_count() as u64));
    group.bench_function(scene.name(), |b| b.iter(|| scene.update().unwrap()));
    scene.teardown().unwrap();

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_spawn,
    bench_update,
    bench_movement,
    bench_kill,
    bench_scenarios,
);

criterion_main!(benches);
