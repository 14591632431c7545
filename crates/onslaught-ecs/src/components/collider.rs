use serde::{Deserialize, Serialize};

use super::Transform;

/// Collision category. Pairs of the same category never interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderType {
    Player,
    Enemy,
    Projectile,
    /// Reserved; no pair involving a pickup is resolved yet.
    Pickup,
}

/// Hit box, positioned relative to the owning entity's [`Transform`] origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Decides which pair rule applies on overlap.
    pub collider_type: ColliderType,
    /// Triggers report overlaps but never block movement.
    pub is_trigger: bool,
    /// Box origin relative to the transform origin.
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Collider {
    /// A solid collider with no offset.
    pub fn new(collider_type: ColliderType, width: f32, height: f32) -> Self {
        Self {
            collider_type,
            is_trigger: false,
            offset_x: 0.0,
            offset_y: 0.0,
            width,
            height,
        }
    }

    /// Mark as a trigger.
    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Shift the box away from the transform origin.
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// World-space `(left, top, right, bottom)` of this collider.
    pub fn bounds(&self, at: &Transform) -> (f32, f32, f32, f32) {
        let left = at.x + self.offset_x;
        let top = at.y + self.offset_y;
        (left, top, left + self.width, top + self.height)
    }

    /// Strict AABB overlap: boxes that only touch along an edge do not
    /// overlap.
    pub fn overlaps(&self, at: &Transform, other: &Collider, other_at: &Transform) -> bool {
        let (al, at_, ar, ab) = self.bounds(at);
        let (bl, bt, br, bb) = other.bounds(other_at);
        al < br && ar > bl && at_ < bb && ab > bt
    }
}
