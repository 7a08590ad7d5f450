//! A heavier mesh: more particles, shorter links, wider pointer field.
//!
//! Run with: `cargo run --example dense`

use plexus::Background;

fn main() -> Result<(), plexus::Error> {
    Background::new()
        .with_title("plexus - dense")
        .with_particle_count(200)
        .with_connect_distance(90.0)
        .with_mouse_radius(180.0)
        .run()
}
