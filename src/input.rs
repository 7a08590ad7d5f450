//! Pointer tracking over raw window events.
//!
//! The system only cares about one input: where the pointer is, or that it
//! has left the window. `Input` folds the relevant winit events into that
//! state so the frame loop can hand [`ParticleSystem`] a plain
//! `Option<Vec2>`.
//!
//! [`ParticleSystem`]: crate::ParticleSystem

use glam::Vec2;
use winit::event::WindowEvent;

/// Tracks the pointer position in surface pixels.
///
/// `None` when the pointer is outside the window.
#[derive(Debug, Default)]
pub struct Input {
    pointer: Option<Vec2>,
}

impl Input {
    /// Create a tracker with no pointer present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pointer position, if inside the window.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = Some(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer = None;
            }
            _ => {}
        }
    }
}
