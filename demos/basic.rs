//! The classic look: 80 linked purple particles reacting to the pointer.
//!
//! Run with: `cargo run --example basic`

use plexus::Background;

fn main() -> Result<(), plexus::Error> {
    Background::new()
        .with_title("plexus - basic")
        .with_particle_count(80)
        .with_connect_distance(150.0)
        .with_connections(true)
        .with_mouse_radius(120.0)
        .run()
}
