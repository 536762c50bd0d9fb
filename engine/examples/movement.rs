//! Spawns a few moving entities, runs a fixed-step simulation for one simulated second and prints
//! the engine's log records along with the final positions.

use std::time::Duration;

use ember_engine::{
    core::{Time, log::ChannelLogger, time::SIXTY_FPS},
    ecs::{Registry, Result},
    game::{MovementSystem, RigidBody, Transform, Vec2},
};
use log::LevelFilter;

fn main() -> Result<()> {
    let (logger, records) = ChannelLogger::with_receiver(LevelFilter::Debug);
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }

    let mut registry = Registry::new();
    registry.add_system(MovementSystem::new()?)?;

    let mut entities = Vec::new();
    for i in 0..4 {
        let entity = registry.spawn();
        registry.add_component(entity, Transform::at(Vec2::new(i as f32 * 10.0, 0.0)))?;
        registry.add_component(entity, RigidBody::new(Vec2::new(5.0, i as f32)))?;
        entities.push(entity);
    }
    registry.update();

    let mut time = Time::new(SIXTY_FPS);
    let mut steps = 0;
    while time.fixed_elapsed() < Duration::from_secs(1) {
        time.advance(Duration::from_millis(5));
        while time.has_fixed() {
            let dt = time.fixed_delta_secs();
            registry.run_system(|movement: &mut MovementSystem, components| {
                movement.update(components, dt)
            })??;
            registry.update();
            time.consume_fixed();
            steps += 1;
        }
    }

    for record in records.try_iter() {
        println!("[{:<5}] {}", record.level, record.message);
    }

    println!("{steps} fixed steps");
    for entity in entities {
        let position = registry.get_component::<Transform>(entity)?.position;
        println!("entity {entity}: ({:.2}, {:.2})", position.x, position.y);
    }
    Ok(())
}
