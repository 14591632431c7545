//! Deferred structural changes with causality metadata.
//!
//! Systems never create or destroy entities directly while a tick is in
//! flight. They queue [`Command`]s on the [`CommandBuffer`] and the world
//! applies them in FIFO order once every system has run. Consequently a
//! system never observes an entity spawned by a later system in the same
//! tick, and despawns cannot invalidate the entity list another system is
//! iterating.
//!
//! Each command records which system issued it and why, which makes
//! "where did this enemy come from" answerable from logs.
//!
//! # Example
//!
//! ```
//! use onslaught_ecs::prelude::*;
//!
//! let mut world = World::new(PoolConfig::default(), 7);
//! let mut cmds = CommandBuffer::new();
//! cmds.spawn(
//!     ComponentBundle::new().with(Tag::Enemy),
//!     SystemId::SPAWN,
//!     CausalReason::Timer("spawn_interval"),
//! );
//! assert!(world.count_with_tag(Tag::Enemy) == 0);
//! let report = world.apply_commands(&mut cmds);
//! assert_eq!(report.spawned, 1);
//! assert_eq!(world.count_with_tag(Tag::Enemy), 1);
//! ```

use tracing::{trace, warn};

use crate::component::ComponentBundle;
use crate::entity::{EntityId, EntityPool};
use crate::storage::ComponentStore;
use crate::system::SystemId;

// ---------------------------------------------------------------------------
// CausalReason
// ---------------------------------------------------------------------------

/// Why a command was issued.
///
/// Prefer the most specific variant. `SystemInternal` is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CausalReason {
    /// Caused by player input.
    PlayerInput,
    /// Caused by an overlap between two entities.
    CollisionResponse(EntityId, EntityId),
    /// Caused by a game rule (e.g. "enemy_killed").
    GameRule(&'static str),
    /// Caused by a timer completing.
    Timer(&'static str),
    /// Internal bookkeeping.
    SystemInternal(&'static str),
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// The structural change a command performs.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    /// Acquire a fresh id and attach the bundle.
    Spawn(ComponentBundle),
    /// Release the entity and all of its components.
    Despawn(EntityId),
}

/// A single deferred structural change.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub kind: CommandKind,
    pub issued_by: SystemId,
    pub reason: CausalReason,
}

// ---------------------------------------------------------------------------
// ApplyReport
// ---------------------------------------------------------------------------

/// Outcome of one [`CommandBuffer::apply`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub spawned: usize,
    pub despawned: usize,
    /// Despawns of ids that were no longer active (for example, two
    /// systems removing the same enemy in one tick).
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// CommandBuffer
// ---------------------------------------------------------------------------

/// Collects commands during a tick and applies them in insertion order.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
    last_apply_report: ApplyReport,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the creation of an entity carrying `bundle`.
    pub fn spawn(&mut self, bundle: ComponentBundle, issued_by: SystemId, reason: CausalReason) {
        self.commands.push(Command {
            kind: CommandKind::Spawn(bundle),
            issued_by,
            reason,
        });
    }

    /// Queue the removal of `target`.
    pub fn despawn(&mut self, target: EntityId, issued_by: SystemId, reason: CausalReason) {
        self.commands.push(Command {
            kind: CommandKind::Despawn(target),
            issued_by,
            reason,
        });
    }

    /// Whether a despawn of `target` is already queued.
    pub fn is_despawn_queued(&self, target: EntityId) -> bool {
        self.commands
            .iter()
            .any(|cmd| cmd.kind == CommandKind::Despawn(target))
    }

    /// Queued commands in insertion order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop every queued command without applying it.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Report from the most recent [`apply`](Self::apply).
    pub fn last_apply_report(&self) -> ApplyReport {
        self.last_apply_report
    }

    /// Apply every queued command in FIFO order, then empty the buffer.
    ///
    /// Despawning an inactive id is logged and counted as a failure; it
    /// never aborts the rest of the batch.
    pub fn apply(&mut self, pool: &mut EntityPool, store: &mut ComponentStore) -> ApplyReport {
        let mut report = ApplyReport::default();
        for cmd in self.commands.drain(..) {
            match cmd.kind {
                CommandKind::Spawn(bundle) => {
                    let id = pool.acquire();
                    store.insert_bundle(id, bundle);
                    report.spawned += 1;
                    trace!(
                        entity = %id,
                        system = ?cmd.issued_by,
                        reason = ?cmd.reason,
                        "spawned"
                    );
                }
                CommandKind::Despawn(target) => {
                    if pool.is_active(target) {
                        pool.release(target, store);
                        report.despawned += 1;
                        trace!(
                            entity = %target,
                            system = ?cmd.issued_by,
                            reason = ?cmd.reason,
                            "despawned"
                        );
                    } else {
                        report.failed += 1;
                        warn!(
                            entity = %target,
                            system = ?cmd.issued_by,
                            reason = ?cmd.reason,
                            "despawn of inactive entity skipped"
                        );
                    }
                }
            }
        }
        self.last_apply_report = report;
        report
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
