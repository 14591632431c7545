//! The per-tick render snapshot handed to the presentation layer.
//!
//! The snapshot is rebuilt in place every unpaused tick. Its four bucket
//! vectors keep their capacity between ticks, so once the entity count
//! stabilizes rebuilding it allocates nothing.

use crate::components::{Color, RenderType, Tag};
use crate::entity::EntityId;

/// Health values copied out for health bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthSnapshot {
    pub current: f32,
    pub max: f32,
}

/// One drawable entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRecord {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub render_type: RenderType,
    pub z_index: i32,
    pub visible: bool,
    pub color: Option<Color>,
    pub opacity: Option<f32>,
    pub tag: Option<Tag>,
    pub health: Option<HealthSnapshot>,
}

/// Drawable records grouped by [`RenderType`], each bucket in ascending
/// `(z_index, id)` order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSnapshot {
    pub players: Vec<RenderRecord>,
    pub enemies: Vec<RenderRecord>,
    pub projectiles: Vec<RenderRecord>,
    pub other: Vec<RenderRecord>,
}

impl RenderSnapshot {
    /// Empty every bucket, keeping capacity.
    pub fn clear(&mut self) {
        self.players.clear();
        self.enemies.clear();
        self.projectiles.clear();
        self.other.clear();
    }

    pub fn push(&mut self, record: RenderRecord) {
        match record.render_type {
            RenderType::Player => self.players.push(record),
            RenderType::Enemy => self.enemies.push(record),
            RenderType::Projectile => self.projectiles.push(record),
            RenderType::Other => self.other.push(record),
        }
    }

    pub fn len(&self) -> usize {
        self.players.len() + self.enemies.len() + self.projectiles.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every record, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &RenderRecord> {
        self.players
            .iter()
            .chain(&self.enemies)
            .chain(&self.projectiles)
            .chain(&self.other)
    }

    /// Sum of bucket capacities; stays flat once the scene stabilizes.
    pub fn capacity(&self) -> usize {
        self.players.capacity()
            + self.enemies.capacity()
            + self.projectiles.capacity()
            + self.other.capacity()
    }
}
