//! Background builder and runner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::Vec3;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::error::Error;
use crate::particle::Particle;
use crate::spawn::SpawnContext;
use crate::system::SystemConfig;
use crate::window::App;

pub(crate) type Spawner = Box<dyn FnMut(&mut SpawnContext) -> Particle>;

/// Cooperative stop flag for a running background.
///
/// Clone it out of the builder before `run()`, hand it to whatever owns the
/// view's lifetime, and call [`stop`](StopHandle::stop); the frame loop exits
/// on its next tick and `run()` returns.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Request the frame loop to exit.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// An animated particle background builder.
///
/// Use method chaining to configure, then call `.run()` to open the window
/// and start the frame loop. `run()` blocks until the window closes, a
/// [`StopHandle`] fires, or initialization fails.
///
/// ```ignore
/// use plexus::Background;
///
/// Background::new()
///     .with_particle_count(80)
///     .with_connect_distance(150.0)
///     .with_mouse_radius(120.0)
///     .run()?;
/// ```
pub struct Background {
    config: SystemConfig,
    spawner: Option<Spawner>,
    title: String,
    window_size: (u32, u32),
    stop: StopHandle,
}

impl Background {
    /// Create a background with default settings.
    pub fn new() -> Self {
        Self {
            config: SystemConfig::default(),
            spawner: None,
            title: "plexus".to_string(),
            window_size: (1280, 720),
            stop: StopHandle::new(),
        }
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.config.particle_count = count;
        self
    }

    /// Set the maximum distance at which particles are linked by a line.
    pub fn with_connect_distance(mut self, distance: f32) -> Self {
        self.config.connect_distance = distance;
        self
    }

    /// Enable or disable connection lines.
    pub fn with_connections(mut self, show: bool) -> Self {
        self.config.show_connections = show;
        self
    }

    /// Set the pointer-repulsion radius.
    pub fn with_mouse_radius(mut self, radius: f32) -> Self {
        self.config.mouse_radius = radius;
        self
    }

    /// Set the colors particles pick from at spawn time.
    pub fn with_palette(mut self, palette: Vec<Vec3>) -> Self {
        self.config.palette = palette;
        self
    }

    /// Set the connection line color.
    pub fn with_connection_color(mut self, color: Vec3) -> Self {
        self.config.connection_color = color;
        self
    }

    /// Set the surface clear color.
    pub fn with_background_color(mut self, color: Vec3) -> Self {
        self.config.background_color = color;
        self
    }

    /// Set the amplitude of the per-frame depth random walk.
    pub fn with_depth_jitter(mut self, jitter: f32) -> Self {
        self.config.depth_jitter = jitter;
        self
    }

    /// Replace the built-in spawner.
    /// Called once per particle slot with a fresh [`SpawnContext`].
    pub fn with_spawner<F>(mut self, spawner: F) -> Self
    where
        F: FnMut(&mut SpawnContext) -> Particle + 'static,
    {
        self.spawner = Some(Box::new(spawner));
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Get a handle that can stop the running background from outside.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Open the window and run the frame loop. Blocks until the window
    /// closes or the stop handle fires.
    ///
    /// Initialization failures (no event loop, no window, no usable GPU
    /// surface) are returned before any frame is drawn.
    pub fn run(self) -> Result<(), Error> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(
            self.config,
            self.spawner,
            self.title,
            self.window_size,
            self.stop,
        );
        event_loop.run_app(&mut app)?;

        match app.into_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_config() {
        let bg = Background::new()
            .with_particle_count(80)
            .with_connect_distance(150.0)
            .with_connections(true)
            .with_mouse_radius(120.0)
            .with_depth_jitter(0.5)
            .with_title("stars");

        assert_eq!(bg.config.particle_count, 80);
        assert_eq!(bg.config.connect_distance, 150.0);
        assert!(bg.config.show_connections);
        assert_eq!(bg.config.mouse_radius, 120.0);
        assert_eq!(bg.config.depth_jitter, 0.5);
        assert_eq!(bg.title, "stars");
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let bg = Background::new();
        assert_eq!(bg.config.particle_count, 100);
        assert_eq!(bg.config.connect_distance, 100.0);
        assert!(bg.config.show_connections);
        assert_eq!(bg.config.mouse_radius, 150.0);
        assert_eq!(bg.config.palette.len(), 3);
    }

    #[test]
    fn test_stop_handle_is_shared() {
        let bg = Background::new();
        let handle = bg.stop_handle();
        assert!(!handle.is_stopped());
        handle.stop();
        assert!(bg.stop.is_stopped());
    }
}
