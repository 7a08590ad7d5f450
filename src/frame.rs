//! The recorded display list a [`ParticleSystem`] paints into.
//!
//! [`Frame`] decouples the simulation from any real surface: the per-frame
//! loop records circles and line segments, the GPU renderer consumes them,
//! and tests inspect them directly without a window or a display loop.
//!
//! Paint state carries over between commands the way a shared 2D context
//! would: each circle sets the current glow, and a line records whatever glow
//! the most recent circle left behind. Draw order and that bleed-through are
//! part of the observable contract, not an accident to normalize away.
//!
//! [`ParticleSystem`]: crate::ParticleSystem

use glam::{Vec2, Vec3};

/// A single recorded draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// A filled circle with a glow halo.
    Circle {
        /// Center in surface pixels.
        center: Vec2,
        /// Radius in pixels.
        radius: f32,
        /// Fill color.
        color: Vec3,
        /// Halo color.
        glow_color: Vec3,
        /// Halo radius in pixels beyond the circle edge.
        glow: f32,
    },
    /// A stroked line segment.
    Line {
        /// Start point in surface pixels.
        from: Vec2,
        /// End point in surface pixels.
        to: Vec2,
        /// Stroke color.
        color: Vec3,
        /// Stroke opacity in 0.0-1.0.
        alpha: f32,
        /// Stroke width in pixels.
        width: f32,
        /// Halo radius inherited from the last circle drawn.
        glow: f32,
    },
}

/// An ordered list of draw commands for one frame.
#[derive(Debug, Default)]
pub struct Frame {
    size: Vec2,
    commands: Vec<DrawCommand>,
    // Glow left on the shared paint state by the last circle.
    glow_state: f32,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: drop all recorded commands and reset paint state.
    ///
    /// `size` is the current surface size in pixels.
    pub fn begin(&mut self, size: Vec2) {
        self.size = size;
        self.commands.clear();
        self.glow_state = 0.0;
    }

    /// Record a filled circle and set the current glow state.
    pub fn circle(&mut self, center: Vec2, radius: f32, color: Vec3, glow_color: Vec3, glow: f32) {
        self.glow_state = glow;
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            glow_color,
            glow,
        });
    }

    /// Record a line segment, capturing the current glow state.
    pub fn line(&mut self, from: Vec2, to: Vec2, color: Vec3, alpha: f32, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            alpha,
            width,
            glow: self.glow_state,
        });
    }

    /// Surface size the frame was recorded against.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// All commands in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Iterator over the recorded circles, in draw order.
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    /// Iterator over the recorded lines, in draw order.
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_clears_commands() {
        let mut frame = Frame::new();
        frame.begin(Vec2::new(100.0, 100.0));
        frame.circle(Vec2::ZERO, 2.0, Vec3::ONE, Vec3::ONE, 5.0);
        assert_eq!(frame.commands().len(), 1);

        frame.begin(Vec2::new(200.0, 100.0));
        assert!(frame.commands().is_empty());
        assert_eq!(frame.size(), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_line_inherits_glow_from_last_circle() {
        let mut frame = Frame::new();
        frame.begin(Vec2::new(100.0, 100.0));
        frame.circle(Vec2::ZERO, 2.0, Vec3::ONE, Vec3::ONE, 12.0);
        frame.line(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec3::ONE, 0.3, 0.5);

        match frame.commands()[1] {
            DrawCommand::Line { glow, .. } => assert_eq!(glow, 12.0),
            _ => panic!("expected a line"),
        }
    }

    #[test]
    fn test_line_before_any_circle_has_no_glow() {
        let mut frame = Frame::new();
        frame.begin(Vec2::new(100.0, 100.0));
        frame.line(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec3::ONE, 0.3, 0.5);

        match frame.commands()[0] {
            DrawCommand::Line { glow, .. } => assert_eq!(glow, 0.0),
            _ => panic!("expected a line"),
        }
    }

    #[test]
    fn test_commands_keep_draw_order() {
        let mut frame = Frame::new();
        frame.begin(Vec2::new(100.0, 100.0));
        frame.circle(Vec2::ZERO, 1.0, Vec3::ONE, Vec3::ONE, 5.0);
        frame.line(Vec2::ZERO, Vec2::ONE, Vec3::ONE, 0.5, 0.5);
        frame.circle(Vec2::ONE, 1.0, Vec3::ONE, Vec3::ONE, 5.0);

        assert!(matches!(frame.commands()[0], DrawCommand::Circle { .. }));
        assert!(matches!(frame.commands()[1], DrawCommand::Line { .. }));
        assert!(matches!(frame.commands()[2], DrawCommand::Circle { .. }));
        assert_eq!(frame.circles().count(), 2);
        assert_eq!(frame.lines().count(), 1);
    }
}
