//! The system interface and per-tick execution context.
//!
//! A [`System`] declares the components it needs and a priority. Each
//! unpaused tick the world hands it a [`SystemContext`] plus the ids of all
//! active entities whose component mask contains the requirement.
//!
//! The context grants mutable access to component values and resources but
//! only shared access to the entity pool, so a system cannot create or
//! destroy entities mid-tick. Structural changes go through
//! [`SystemContext::commands`] and land after every system has run.

use serde::{Deserialize, Serialize};

use crate::command::CommandBuffer;
use crate::component::{Component, ComponentMask};
use crate::components::{GameState, Tag};
use crate::entity::{EntityId, EntityPool};
use crate::resource::Resources;
use crate::storage::ComponentStore;
use crate::world::World;
use crate::EcsError;

// ---------------------------------------------------------------------------
// SystemId
// ---------------------------------------------------------------------------

/// Stable numeric identity of a system, carried by every command it issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemId(pub u32);

impl SystemId {
    /// Work done by the world itself or by host code outside any system.
    pub const ENGINE: SystemId = SystemId(0);
    pub const GAME_STATE: SystemId = SystemId(1);
    pub const SCORE: SystemId = SystemId(2);
    pub const PLAYER: SystemId = SystemId(3);
    pub const INPUT: SystemId = SystemId(4);
    pub const MOVEMENT: SystemId = SystemId(5);
    pub const AI: SystemId = SystemId(6);
    pub const SPAWN: SystemId = SystemId(7);
    pub const PROJECTILE: SystemId = SystemId(8);
    pub const COLLISION: SystemId = SystemId(9);
    pub const RENDER: SystemId = SystemId(10);
}

// ---------------------------------------------------------------------------
// SystemContext
// ---------------------------------------------------------------------------

/// Everything a system may touch during [`System::update`].
pub struct SystemContext<'w> {
    pub components: &'w mut ComponentStore,
    pub pool: &'w EntityPool,
    pub commands: &'w mut CommandBuffer,
    pub resources: &'w mut Resources,
}

impl SystemContext<'_> {
    pub fn get<C: Component>(&self, id: EntityId) -> Option<&C> {
        self.components.get(id)
    }

    pub fn get_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        self.components.get_mut(id)
    }

    pub fn first_with_tag(&self, tag: Tag) -> Option<EntityId> {
        self.components.first_with_tag(tag)
    }

    pub fn count_with_tag(&self, tag: Tag) -> usize {
        self.components.count_with_tag(tag)
    }

    /// The game-state singleton, looked up fresh on every call.
    pub fn game_state_mut(&mut self) -> Option<&mut GameState> {
        let id = self.components.game_states.iter().map(|(id, _)| id).min()?;
        self.components.game_states.get_mut(id)
    }

    /// Seconds of simulated time, including the current tick.
    pub fn elapsed(&self) -> f64 {
        self.resources.clock.elapsed
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// One stage of the per-tick pipeline.
pub trait System {
    fn id(&self) -> SystemId;

    /// Human-readable name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Components an entity must carry to be handed to [`update`](Self::update).
    /// An empty mask selects every active entity.
    fn required(&self) -> ComponentMask;

    /// Lower runs first. Ties keep insertion order.
    fn priority(&self) -> i32;

    /// One-time setup. Must be idempotent: create what is missing, leave
    /// what exists.
    fn initialize(&mut self, _world: &mut World) -> Result<(), EcsError> {
        Ok(())
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entities: &[EntityId], dt: f32);

    /// Release anything the system owns.
    fn cleanup(&mut self, _world: &mut World) {}
}
