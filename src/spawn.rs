//! Spawn context for particle initialization.
//!
//! Provides helper methods to reduce boilerplate when spawning particles,
//! whether through the built-in spawner or a custom closure passed to
//! [`Background::with_spawner`].
//!
//! [`Background::with_spawner`]: crate::Background::with_spawner

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Context provided to spawner functions, one per particle slot.
///
/// ```ignore
/// Background::new().with_spawner(|ctx| {
///     Particle::new(
///         ctx.random_in_bounds(),
///         ctx.drift_velocity(1.5),
///         ctx.random_range(1.0, 4.0),
///         ctx.random() * 100.0,
///     )
/// })
/// ```
pub struct SpawnContext {
    /// Index of the particle being spawned (0 to count-1).
    pub index: usize,
    /// Total number of particles being spawned.
    pub count: usize,
    /// Surface size in pixels.
    pub bounds: Vec2,
    // Use the helper methods instead of accessing this directly.
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a new spawn context for a particle slot.
    pub(crate) fn new(index: usize, count: usize, bounds: Vec2) -> Self {
        // Seed RNG based on index for variety across slots,
        // but different each program execution.
        let seed = index as u64
            ^ std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42);

        Self {
            index,
            count,
            bounds,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Normalized progress through the spawn (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.count.max(1) as f32
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Random point inside the surface bounds.
    pub fn random_in_bounds(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(0.0..self.bounds.x.max(1.0)),
            self.rng.gen_range(0.0..self.bounds.y.max(1.0)),
        )
    }

    /// Random drift velocity: each axis uniform in `[-scale/2, scale/2)`.
    pub fn drift_velocity(&mut self, scale: f32) -> Vec2 {
        Vec2::new(
            (self.rng.gen::<f32>() - 0.5) * scale,
            (self.rng.gen::<f32>() - 0.5) * scale,
        )
    }

    /// Pick a random element from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_progress() {
        let ctx = SpawnContext::new(50, 100, BOUNDS);
        assert!((ctx.progress() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_random_in_bounds() {
        let mut ctx = SpawnContext::new(0, 1, BOUNDS);
        for _ in 0..100 {
            let pos = ctx.random_in_bounds();
            assert!(pos.x >= 0.0 && pos.x < BOUNDS.x);
            assert!(pos.y >= 0.0 && pos.y < BOUNDS.y);
        }
    }

    #[test]
    fn test_drift_velocity_range() {
        let mut ctx = SpawnContext::new(0, 1, BOUNDS);
        for _ in 0..100 {
            let v = ctx.drift_velocity(1.5);
            assert!(v.x >= -0.75 && v.x < 0.75);
            assert!(v.y >= -0.75 && v.y < 0.75);
        }
    }

    #[test]
    fn test_pick_stays_in_slice() {
        let mut ctx = SpawnContext::new(0, 1, BOUNDS);
        let items = [1, 2, 3];
        for _ in 0..50 {
            assert!(items.contains(ctx.pick(&items)));
        }
    }
}
