//! The particle system: pool, configuration, and the per-frame cycle.

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::frame::Frame;
use crate::particle::{Particle, MAX_DEPTH};
use crate::spawn::SpawnContext;
use crate::visuals::{DEFAULT_BACKGROUND, DEFAULT_CONNECTION_COLOR, DEFAULT_PALETTE};

/// Opacity scale applied on top of the linear distance falloff.
const CONNECTION_ALPHA: f32 = 0.5;

/// Stroke width of connection lines, in pixels.
const CONNECTION_WIDTH: f32 = 0.5;

/// Per-axis spread of spawn-time drift velocities.
const DRIFT_SCALE: f32 = 1.5;

/// Construction-time configuration for a [`ParticleSystem`].
#[derive(Clone, Debug)]
pub struct SystemConfig {
    /// Number of particles in the fixed pool.
    pub particle_count: usize,
    /// Maximum distance at which two particles are linked by a line.
    pub connect_distance: f32,
    /// Whether to draw connection lines at all.
    pub show_connections: bool,
    /// Radius of the pointer-repulsion field.
    pub mouse_radius: f32,
    /// Colors particles pick from at spawn time. Must be non-empty.
    pub palette: Vec<Vec3>,
    /// Base color of connection lines.
    pub connection_color: Vec3,
    /// Surface clear color.
    pub background_color: Vec3,
    /// Amplitude of the per-frame depth random walk. 0.0 freezes depth.
    pub depth_jitter: f32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            connect_distance: 100.0,
            show_connections: true,
            mouse_radius: 150.0,
            palette: DEFAULT_PALETTE.to_vec(),
            connection_color: DEFAULT_CONNECTION_COLOR,
            background_color: DEFAULT_BACKGROUND,
            depth_jitter: 1.0,
        }
    }
}

/// Owns the particle pool and drives one frame of simulation and drawing
/// per [`frame_tick`] call.
///
/// The system never schedules itself: the host (a window loop, a test, a
/// benchmark) calls [`frame_tick`] with a [`Frame`] to record into, and feeds
/// pointer and resize events in between calls.
///
/// [`frame_tick`]: ParticleSystem::frame_tick
pub struct ParticleSystem {
    config: SystemConfig,
    particles: Vec<Particle>,
    size: Vec2,
    pointer: Option<Vec2>,
    rng: SmallRng,
}

impl ParticleSystem {
    /// Create a system with `config.particle_count` randomly placed
    /// particles inside `size`.
    pub fn new(size: Vec2, config: SystemConfig) -> Self {
        let palette = if config.palette.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            config.palette.clone()
        };

        Self::from_spawner(size, config, |ctx| {
            // Fill and halo share the spawn color.
            let color = *ctx.pick(&palette);
            let position = ctx.random_in_bounds();
            let velocity = ctx.drift_velocity(DRIFT_SCALE);
            let size = ctx.random_range(1.0, 4.0);
            let depth = ctx.random() * MAX_DEPTH;
            let glow = ctx.random_range(5.0, 15.0);
            Particle::new(position, velocity, size, depth).with_style(color, glow)
        })
    }

    /// Create a system whose particles come from `spawner`, invoked once per
    /// slot with a fresh [`SpawnContext`].
    pub fn from_spawner<F>(size: Vec2, config: SystemConfig, mut spawner: F) -> Self
    where
        F: FnMut(&mut SpawnContext) -> Particle,
    {
        let count = config.particle_count;
        let particles = (0..count)
            .map(|i| {
                let mut ctx = SpawnContext::new(i, count, size);
                spawner(&mut ctx)
            })
            .collect();

        Self {
            config,
            particles,
            size,
            pointer: None,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a system over an explicit particle pool.
    ///
    /// The pool length overrides `config.particle_count`.
    pub fn with_particles(size: Vec2, mut config: SystemConfig, particles: Vec<Particle>) -> Self {
        config.particle_count = particles.len();
        Self {
            config,
            particles,
            size,
            pointer: None,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// The particle pool, in draw/connection order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current surface size in pixels.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Match the surface to a new viewport size.
    ///
    /// Existing particles are not repositioned; any that end up outside the
    /// new bounds bounce back on their next update.
    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Update the tracked pointer location. `None` means the pointer has
    /// left the surface and no repulsion applies.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    /// Currently tracked pointer location.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Run one frame: clear the frame, then for each particle in index
    /// order: integrate motion, draw it, link it to every later particle
    /// within `connect_distance`, and apply pointer repulsion.
    pub fn frame_tick(&mut self, frame: &mut Frame) {
        frame.begin(self.size);

        let jitter = self.config.depth_jitter;
        for i in 0..self.particles.len() {
            let depth_step = (self.rng.gen::<f32>() - 0.5) * 2.0 * jitter;

            let (head, tail) = self.particles.split_at_mut(i + 1);
            let particle = &mut head[i];

            particle.update(self.size, depth_step);
            particle.draw(frame);

            if self.config.show_connections {
                for other in tail.iter() {
                    let distance = particle.position.distance(other.position);
                    if distance < self.config.connect_distance {
                        let alpha =
                            (1.0 - distance / self.config.connect_distance) * CONNECTION_ALPHA;
                        frame.line(
                            particle.position,
                            other.position,
                            self.config.connection_color,
                            alpha,
                            CONNECTION_WIDTH,
                        );
                    }
                }
            }

            if let Some(pointer) = self.pointer {
                particle.repel_from(pointer, self.config.mouse_radius);
            }
        }
    }
}
