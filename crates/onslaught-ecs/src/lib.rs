//! Onslaught ECS -- the entity-component-system core of the Onslaught
//! survival simulation.
//!
//! Entities are plain integer ids handed out by a recycling
//! [`EntityPool`](entity::EntityPool). Components come from a closed
//! catalog and live in per-kind sparse sets. Systems run in ascending
//! priority order each tick, see only the entities matching their declared
//! component mask, and defer every spawn and despawn to a
//! [`CommandBuffer`](command::CommandBuffer) that is applied once the last
//! system returns.
//!
//! # Quick Start
//!
//! ```
//! use onslaught_ecs::prelude::*;
//!
//! let mut world = World::new(PoolConfig::default(), 42);
//! let player = world.spawn(
//!     ComponentBundle::new()
//!         .with(Tag::Player)
//!         .with(Transform::new(496.0, 368.0, 32.0, 32.0))
//!         .with(Health::new(100.0)),
//! );
//!
//! assert_eq!(world.first_with_tag(Tag::Player), Some(player));
//! assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(100.0));
//! ```

#![deny(unsafe_code)]

pub mod command;
pub mod component;
pub mod components;
pub mod entity;
pub mod render;
pub mod resource;
pub mod snapshot;
pub mod storage;
pub mod system;
pub mod world;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by ECS operations.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// The entity is not active (released or never allocated).
    #[error("entity {entity} is not active")]
    InactiveEntity { entity: entity::EntityId },

    /// A singleton component that initialization must create is absent.
    #[error("required singleton component '{component}' is missing after initialization")]
    MissingSingleton { component: &'static str },

    /// `tick` was called with a negative or non-finite delta time.
    #[error("invalid delta time {dt}: must be finite and non-negative")]
    InvalidDeltaTime { dt: f32 },

    /// A system refused to initialize.
    #[error("system '{system}' failed to initialize: {reason}")]
    SystemInit { system: &'static str, reason: String },

    /// Snapshot (de)serialization failed.
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::command::{ApplyReport, CausalReason, Command, CommandBuffer, CommandKind};
    pub use crate::component::{Component, ComponentBundle, ComponentKind, ComponentMask};
    pub use crate::components::{
        normalize, Ai, AiBehavior, Collider, ColliderType, Color, GameState, Health, Input,
        Projectile, Render, RenderType, Tag, Timer, Transform, Velocity,
    };
    pub use crate::entity::{EntityId, EntityPool, PoolConfig};
    pub use crate::render::{HealthSnapshot, RenderRecord, RenderSnapshot};
    pub use crate::resource::{
        GameEvent, InputState, Key, KeyBindings, KeySource, Resources, Score, SimClock,
    };
    pub use crate::snapshot::{EntitySnapshot, WorldSnapshot};
    pub use crate::storage::{ComponentStore, SparseSet};
    pub use crate::system::{System, SystemContext, SystemId};
    pub use crate::world::{TickDiagnostics, TickReport, World};
    pub use crate::EcsError;
}
