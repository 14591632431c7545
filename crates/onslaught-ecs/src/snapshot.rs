//! Serializable world snapshots and the deterministic state hash.
//!
//! [`WorldSnapshot`] captures every active entity with all of its
//! components, sorted by id, together with the simulation clock and score.
//! Two worlds that ran the same systems on the same inputs with the same
//! seed produce byte-identical snapshot JSON, and therefore the same
//! BLAKE3 [`World::state_hash`].

use serde::{Deserialize, Serialize};

use crate::component::ComponentBundle;
use crate::entity::EntityId;
use crate::world::World;
use crate::EcsError;

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// One entity and the components attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub components: ComponentBundle,
}

/// Complete simulation state at a tick boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub elapsed: f64,
    pub score: u64,
    pub high_score: u64,
    pub spawn_count: u64,
    /// Ascending by id.
    pub entities: Vec<EntitySnapshot>,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String, EcsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, EcsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// BLAKE3 hex digest of the compact JSON encoding.
    pub fn hash(&self) -> Result<String, EcsError> {
        let mut hasher = blake3::Hasher::new();
        serde_json::to_writer(&mut hasher, self)?;
        Ok(hasher.finalize().to_hex().to_string())
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.entities
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|idx| &self.entities[idx])
    }
}

// ---------------------------------------------------------------------------
// World capture
// ---------------------------------------------------------------------------

impl World {
    pub fn capture_snapshot(&self) -> WorldSnapshot {
        let resources = self.resources();
        let entities = self
            .pool()
            .active()
            .map(|id| EntitySnapshot {
                id,
                components: self.components().bundle_of(id),
            })
            .collect();
        WorldSnapshot {
            tick: resources.clock.tick,
            elapsed: resources.clock.elapsed,
            score: resources.score.score(),
            high_score: resources.score.high_score(),
            spawn_count: resources.spawn_count,
            entities,
        }
    }

    /// Hash of [`capture_snapshot`](Self::capture_snapshot).
    pub fn state_hash(&self) -> Result<String, EcsError> {
        self.capture_snapshot().hash()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
