//! A single drifting particle.

use glam::{Vec2, Vec3};

use crate::frame::Frame;
use crate::visuals::rgb;

/// Depth ceiling of the simulated z-axis.
pub const MAX_DEPTH: f32 = 100.0;

/// Fraction of the original radius lost at maximum depth.
const DEPTH_SHRINK: f32 = 0.5;

/// Velocity gained per frame at zero distance from the pointer.
const REPEL_STRENGTH: f32 = 0.5;

/// Speed cap enforced on the repulsion path.
const MAX_SPEED: f32 = 3.0;

/// Distances below this are treated as coincident; no repulsion direction
/// can be derived from them.
const MIN_DISTANCE: f32 = 1e-4;

/// One point of the constellation: 2D kinematics plus a synthetic depth that
/// only scales the drawn radius.
///
/// Particles are created once at system start and mutated every frame; the
/// pool never grows or shrinks.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    /// Position in surface pixels.
    pub position: Vec2,
    /// Velocity in pixels per frame.
    pub velocity: Vec2,
    /// Current drawn radius. Recomputed from depth on every update.
    pub size: f32,
    /// Simulated distance from the camera, clamped to `[0, MAX_DEPTH]`.
    pub depth: f32,
    /// Fill color.
    pub color: Vec3,
    /// Halo color.
    pub glow_color: Vec3,
    /// Halo radius in pixels.
    pub glow: f32,
    original_size: f32,
}

impl Particle {
    /// Create a particle with the default purple style.
    ///
    /// `size` becomes the fixed original radius the depth scaling works
    /// from; `depth` is clamped into range.
    pub fn new(position: Vec2, velocity: Vec2, size: f32, depth: f32) -> Self {
        let color = rgb(0xbb86fc);
        Self {
            position,
            velocity,
            size,
            depth: depth.clamp(0.0, MAX_DEPTH),
            color,
            glow_color: color,
            glow: 5.0,
            original_size: size,
        }
    }

    /// Replace the fill/halo colors and the halo radius.
    pub fn with_style(mut self, color: Vec3, glow: f32) -> Self {
        self.color = color;
        self.glow_color = color;
        self.glow = glow;
        self
    }

    /// The radius at zero depth, fixed at creation.
    pub fn original_size(&self) -> f32 {
        self.original_size
    }

    /// Advance one frame: integrate position, reflect off the `[0, bounds]`
    /// box, random-walk depth by `depth_step`, and recompute size.
    ///
    /// Boundary handling flips the velocity sign without moving the particle
    /// back inside, so a particle can be drawn out of bounds for one frame
    /// before the reversed velocity carries it back.
    pub fn update(&mut self, bounds: Vec2, depth_step: f32) {
        self.position += self.velocity;

        if self.position.x > bounds.x || self.position.x < 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y > bounds.y || self.position.y < 0.0 {
            self.velocity.y = -self.velocity.y;
        }

        self.depth = (self.depth + depth_step).clamp(0.0, MAX_DEPTH);

        // Perspective: deeper particles draw smaller.
        let depth_factor = 1.0 - (self.depth / MAX_DEPTH) * DEPTH_SHRINK;
        self.size = self.original_size * depth_factor;
    }

    /// Push this particle away from `point` if it sits inside `radius`.
    ///
    /// The impulse is strongest at the center and fades linearly to zero at
    /// the radius edge. Impulses accumulate across frames; the resulting
    /// speed is capped at 3.0. Coincident points are skipped, so no division
    /// by zero can leak NaN into the velocity.
    pub fn repel_from(&mut self, point: Vec2, radius: f32) {
        let offset = self.position - point;
        let distance = offset.length();
        if distance >= radius || distance < MIN_DISTANCE {
            return;
        }

        let force = (radius - distance) / radius;
        self.velocity += offset / distance * force * REPEL_STRENGTH;

        let speed = self.velocity.length();
        if speed > MAX_SPEED {
            self.velocity = self.velocity / speed * MAX_SPEED;
        }
    }

    /// Record this particle as a glowing circle.
    pub fn draw(&self, frame: &mut Frame) {
        frame.circle(self.position, self.size, self.color, self.glow_color, self.glow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_position_integrates_velocity() {
        let mut p = Particle::new(Vec2::new(10.0, 20.0), Vec2::new(0.5, -0.25), 2.0, 0.0);
        p.update(BOUNDS, 0.0);
        assert_eq!(p.position, Vec2::new(10.5, 19.75));
    }

    #[test]
    fn test_right_wall_reflects_velocity() {
        let mut p = Particle::new(Vec2::new(800.0, 300.0), Vec2::new(1.0, 0.0), 2.0, 0.0);
        p.update(BOUNDS, 0.0);
        assert!(p.velocity.x < 0.0);
        // Position is not clamped back inside.
        assert!(p.position.x > BOUNDS.x);
    }

    #[test]
    fn test_left_wall_reflects_velocity() {
        let mut p = Particle::new(Vec2::new(0.2, 300.0), Vec2::new(-1.0, 0.0), 2.0, 0.0);
        p.update(BOUNDS, 0.0);
        assert!(p.velocity.x > 0.0);
    }

    #[test]
    fn test_vertical_walls_reflect_velocity() {
        let mut p = Particle::new(Vec2::new(400.0, 600.0), Vec2::new(0.0, 0.7), 2.0, 0.0);
        p.update(BOUNDS, 0.0);
        assert!(p.velocity.y < 0.0);

        let mut p = Particle::new(Vec2::new(400.0, 0.1), Vec2::new(0.0, -0.7), 2.0, 0.0);
        p.update(BOUNDS, 0.0);
        assert!(p.velocity.y > 0.0);
    }

    #[test]
    fn test_depth_stays_clamped() {
        let mut p = Particle::new(Vec2::new(400.0, 300.0), Vec2::ZERO, 2.0, 99.5);
        for _ in 0..50 {
            p.update(BOUNDS, 1.0);
        }
        assert_eq!(p.depth, MAX_DEPTH);

        for _ in 0..500 {
            p.update(BOUNDS, -1.0);
        }
        assert_eq!(p.depth, 0.0);
    }

    #[test]
    fn test_size_tracks_depth() {
        let mut p = Particle::new(Vec2::new(400.0, 300.0), Vec2::ZERO, 4.0, 0.0);
        for step in [0.7, -0.3, 25.0, -1.0, 80.0] {
            p.update(BOUNDS, step);
            let expected = p.original_size() * (1.0 - (p.depth / MAX_DEPTH) * 0.5);
            assert!((p.size - expected).abs() < 1e-6);
        }
        // At the depth ceiling the particle draws at half its original size.
        p.update(BOUNDS, MAX_DEPTH);
        assert!((p.size - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_repulsion_points_away_from_pointer() {
        let mut p = Particle::new(Vec2::new(110.0, 100.0), Vec2::ZERO, 2.0, 0.0);
        p.repel_from(Vec2::new(100.0, 100.0), 120.0);
        assert!(p.velocity.x > 0.0);
        assert_eq!(p.velocity.y, 0.0);

        // Magnitude: (radius - distance) / radius * 0.5.
        let expected = (120.0 - 10.0) / 120.0 * 0.5;
        assert!((p.velocity.x - expected).abs() < 1e-6);
    }

    #[test]
    fn test_repulsion_outside_radius_is_inert() {
        let mut p = Particle::new(Vec2::new(300.0, 100.0), Vec2::ZERO, 2.0, 0.0);
        p.repel_from(Vec2::new(100.0, 100.0), 120.0);
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_repulsion_speed_clamped() {
        let mut p = Particle::new(Vec2::new(101.0, 100.0), Vec2::ZERO, 2.0, 0.0);
        for _ in 0..100 {
            p.repel_from(Vec2::new(100.0, 100.0), 120.0);
        }
        assert!(p.velocity.length() <= 3.0 + 1e-4);
        assert!(p.velocity.is_finite());
    }

    #[test]
    fn test_repulsion_at_zero_distance_is_skipped() {
        let mut p = Particle::new(Vec2::new(100.0, 100.0), Vec2::new(0.1, 0.0), 2.0, 0.0);
        p.repel_from(Vec2::new(100.0, 100.0), 120.0);
        assert_eq!(p.velocity, Vec2::new(0.1, 0.0));
        assert!(p.velocity.is_finite());
    }

    #[test]
    fn test_drift_speed_is_not_clamped() {
        // The 3.0 cap lives on the repulsion path only; bounce-accumulated
        // drift keeps whatever speed it has.
        let mut p = Particle::new(Vec2::new(400.0, 300.0), Vec2::new(5.0, 0.0), 2.0, 0.0);
        p.update(BOUNDS, 0.0);
        assert_eq!(p.velocity.length(), 5.0);
    }

    #[test]
    fn test_draw_records_current_state() {
        use crate::frame::DrawCommand;

        let mut p = Particle::new(Vec2::new(42.0, 7.0), Vec2::ZERO, 3.0, 0.0);
        p = p.with_style(rgb(0x6200ea), 9.0);

        let mut frame = Frame::new();
        frame.begin(BOUNDS);
        p.draw(&mut frame);

        match frame.commands()[0] {
            DrawCommand::Circle {
                center,
                radius,
                color,
                glow,
                ..
            } => {
                assert_eq!(center, Vec2::new(42.0, 7.0));
                assert_eq!(radius, 3.0);
                assert_eq!(color, rgb(0x6200ea));
                assert_eq!(glow, 9.0);
            }
            _ => panic!("expected a circle"),
        }
    }
}
