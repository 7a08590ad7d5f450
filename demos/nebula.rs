//! Unlinked haze: a custom spawner with slow drift and heavy glow.
//!
//! Run with: `cargo run --example nebula`

use plexus::prelude::*;

fn main() -> Result<(), Error> {
    Background::new()
        .with_title("plexus - nebula")
        .with_particle_count(160)
        .with_connections(false)
        .with_background_color(rgb(0x02121a))
        .with_spawner(|ctx| {
            let position = ctx.random_in_bounds();
            let velocity = ctx.drift_velocity(0.6);
            let size = ctx.random_range(2.0, 6.0);
            let depth = ctx.random() * 100.0;
            Particle::new(position, velocity, size, depth)
                .with_style(rgb(0x4dd0e1), ctx.random_range(10.0, 25.0))
        })
        .run()
}
