use std::io;

use ember_engine::{
    core::Time,
    ecs::{self, Entity, Registry},
    game::{Canvas, MovementSystem, Rect, RenderSystem, RigidBody, Sprite, Transform, Vec2},
};
use log::{debug, info};

use crate::{console::Console, settings::Settings};

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Ecs(#[from] ecs::Error),

    #[error("console output failed: {0}")]
    Io(#[from] io::Error),
}

/// A canvas that records draw calls instead of rasterizing them.
pub struct TextCanvas {
    width: u32,
    height: u32,
    frame: Vec<(String, Rect)>,
}

impl TextCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame: Vec::new(),
        }
    }

    /// Start a new frame, discarding the previous frame's draws.
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// The draws recorded since the last [`TextCanvas::clear`].
    pub fn draws(&self) -> &[(String, Rect)] {
        &self.frame
    }
}

impl Canvas for TextCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw(&mut self, sprite: &Sprite, dest: Rect) {
        self.frame.push((sprite.texture.clone(), dest));
    }
}

pub struct Game {
    settings: Settings,
    registry: Registry,
    time: Time,
    canvas: TextCanvas,
    console: Console,
    entities: Vec<Entity>,
    fixed_updates: u64,
    running: bool,
}

impl Game {
    pub fn new(settings: Settings, console: Console) -> Self {
        let time = Time::new(settings.simulation.fixed_time_step_ns);
        let canvas = TextCanvas::new(settings.window.width, settings.window.height);
        Self {
            settings,
            registry: Registry::new(),
            time,
            canvas,
            console,
            entities: Vec::new(),
            fixed_updates: 0,
            running: false,
        }
    }

    /// Register the systems and populate the scene.
    ///
    /// Every entity gets a transform and a sprite. All but the last also get a rigid body, so the
    /// last one is drawn but never moves.
    pub fn setup(&mut self) -> Result<(), GameError> {
        self.registry.add_system(MovementSystem::new()?)?;
        self.registry.add_system(RenderSystem::new()?)?;

        let count = self.settings.simulation.entities;
        for i in 0..count {
            let entity = self.registry.spawn();
            let (transform, body) = if i == 0 {
                (
                    Transform::new(Vec2::new(10.0, 5.0), Vec2::new(1.0, 2.0), 180.0),
                    RigidBody::new(Vec2::new(100.0, 50.0)),
                )
            } else {
                let offset = i as f32 * 40.0;
                (
                    Transform::at(Vec2::new(offset, offset)),
                    RigidBody::new(Vec2::new(20.0 * i as f32, -10.0)),
                )
            };

            self.registry
                .entity_mut(entity)?
                .add(transform)?
                .add(Sprite::new("tree", Sprite::DEFAULT_WIDTH, Sprite::DEFAULT_HEIGHT))?;
            if i + 1 < count {
                self.registry.add_component(entity, body)?;
            }
            self.entities.push(entity);
        }

        info!("{} set up with {count} entities", self.settings.window.title);
        Ok(())
    }

    /// Run frames until the configured number of fixed updates has executed.
    pub fn run(&mut self) -> Result<(), GameError> {
        self.setup()?;
        self.running = true;
        self.time.reset_now();

        while self.running {
            self.time.tick();
            self.frame()?;
        }

        self.console.flush(self.time.elapsed())?;
        Ok(())
    }

    /// Execute one frame: fixed updates, render, reconciliation and log output.
    pub fn frame(&mut self) -> Result<(), GameError> {
        self.update()?;
        self.render()?;
        self.registry.update();
        self.console.flush(self.time.elapsed())?;
        Ok(())
    }

    fn update(&mut self) -> Result<(), GameError> {
        let limit = self.settings.simulation.max_fixed_updates;
        while self.time.has_fixed() {
            self.time.consume_fixed();
            let dt = self.time.fixed_delta_secs();
            self.registry
                .run_system(|movement: &mut MovementSystem, components| {
                    movement.update(components, dt)
                })??;

            self.fixed_updates += 1;
            if limit != 0 && self.fixed_updates >= limit {
                info!("stopping after {} fixed updates", self.fixed_updates);
                self.running = false;
                break;
            }
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), GameError> {
        self.canvas.clear();
        let canvas = &mut self.canvas;
        self.registry
            .run_system(|render: &mut RenderSystem, components| render.update(components, canvas))??;

        for (texture, rect) in self.canvas.draws() {
            debug!("draw {texture} at ({}, {}) {}x{}", rect.x, rect.y, rect.w, rect.h);
        }
        Ok(())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn time_mut(&mut self) -> &mut Time {
        &mut self.time
    }

    pub fn canvas(&self) -> &TextCanvas {
        &self.canvas
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn fixed_updates(&self) -> u64 {
        self.fixed_updates
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
