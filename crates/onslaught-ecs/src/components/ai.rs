use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// How an AI-driven entity picks its heading each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiBehavior {
    /// Head for the target's center.
    SeekPlayer,
    /// Circle on a heading that turns with elapsed time.
    Patrol,
    /// Stand still.
    Idle,
}

/// Steering state. Nothing moves while no player exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ai {
    pub behavior: AiBehavior,
    /// Preferred target. Falls back to any player when stale.
    pub target: Option<EntityId>,
    /// Seek only while the target center is within this distance.
    pub detection_radius: Option<f32>,
}

impl Ai {
    /// No target and no detection limit.
    pub fn new(behavior: AiBehavior) -> Self {
        Self {
            behavior,
            target: None,
            detection_radius: None,
        }
    }

    /// A [`AiBehavior::SeekPlayer`] aimed at `target`.
    pub fn seeking(target: Option<EntityId>) -> Self {
        Self {
            behavior: AiBehavior::SeekPlayer,
            target,
            detection_radius: None,
        }
    }

    /// Limit seeking to targets within `radius`.
    pub fn with_detection_radius(mut self, radius: f32) -> Self {
        self.detection_radius = Some(radius);
        self
    }
}
