use serde::{Deserialize, Serialize};

use super::transform::normalize;

/// Directional key state of a player-controlled entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Input {
    /// Unit direction implied by the pressed keys. Opposing keys cancel.
    pub fn direction(&self) -> (f32, f32) {
        let dx = f32::from(u8::from(self.right)) - f32::from(u8::from(self.left));
        let dy = f32::from(u8::from(self.down)) - f32::from(u8::from(self.up));
        normalize(dx, dy)
    }

    /// Release every key.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
