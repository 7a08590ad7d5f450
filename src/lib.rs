//! # plexus
//!
//! An animated "constellation" window background: drifting glow particles,
//! proximity-based connecting lines, and a pointer-repulsion field.
//!
//! ## Quick Start
//!
//! ```ignore
//! use plexus::Background;
//!
//! fn main() -> Result<(), plexus::Error> {
//!     Background::new()
//!         .with_particle_count(80)
//!         .with_connect_distance(150.0)
//!         .with_mouse_radius(120.0)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! Each [`Particle`] carries a 2D position and velocity plus a synthetic
//! depth in `[0, 100]` that only scales its drawn radius — a cheap
//! perspective effect. Particles drift at a fixed per-frame speed, reflect
//! off the window edges, and are pushed away from the pointer.
//!
//! ### The frame tick
//!
//! [`ParticleSystem::frame_tick`] runs one frame: every particle in index
//! order is integrated, drawn, linked to each later particle within the
//! connect distance (line opacity fades linearly with distance), and then
//! repelled from the pointer if one is present. The tick records into a
//! [`Frame`] display list; it never touches a window or schedules itself,
//! so tests drive it directly with synthetic input.
//!
//! ### Running as a window
//!
//! [`Background`] wires the system to a winit window and a wgpu renderer.
//! `run()` blocks for the life of the window; a [`StopHandle`] tears the
//! loop down from outside.
//!
//! Motion is expressed per frame, not per second: the loop is paced by the
//! display's refresh rate and does not measure elapsed time.
//!
//! [`ParticleSystem::frame_tick`]: crate::ParticleSystem::frame_tick

mod background;
mod error;
mod frame;
mod gpu;
pub mod input;
mod particle;
pub mod spawn;
mod system;
pub mod visuals;
mod window;

pub use background::{Background, StopHandle};
pub use error::Error;
pub use frame::{DrawCommand, Frame};
pub use glam::{Vec2, Vec3};
pub use particle::{Particle, MAX_DEPTH};
pub use spawn::SpawnContext;
pub use system::{ParticleSystem, SystemConfig};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use plexus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::background::{Background, StopHandle};
    pub use crate::error::Error;
    pub use crate::frame::{DrawCommand, Frame};
    pub use crate::particle::Particle;
    pub use crate::spawn::SpawnContext;
    pub use crate::system::{ParticleSystem, SystemConfig};
    pub use crate::visuals::rgb;
    pub use crate::{Vec2, Vec3};
}
