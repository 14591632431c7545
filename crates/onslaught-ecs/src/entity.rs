//! Entity identifiers and the recycling entity pool.
//!
//! An [`EntityId`] is an opaque, monotonically increasing integer. Identifiers
//! start at 1 and are never handed out twice while active. Released
//! identifiers go back onto a bounded free list and are popped again (LIFO)
//! by later [`EntityPool::acquire`] calls, so a long-running session keeps
//! its component storage dense instead of growing without bound.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::component::ComponentMask;
use crate::storage::ComponentStore;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// An entity identifier: a key into component storage, nothing more.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Construct an `EntityId` from its raw value.
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw `u32` representation.
    #[inline]
    pub fn to_raw(self) -> u32 {
        self.0
    }

    /// Slot index used by the sparse component arrays.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PoolConfig
// ---------------------------------------------------------------------------

/// Sizing for an [`EntityPool`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Identifiers reserved on the free list up front.
    pub initial_size: usize,
    /// Maximum length of the free list. Identifiers released while the
    /// free list is full are dropped and never reused.
    pub max_free: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_size: 50,
            max_free: 1000,
        }
    }
}

// ---------------------------------------------------------------------------
// EntityPool
// ---------------------------------------------------------------------------

/// Allocates and recycles [`EntityId`]s and tracks which ones are active.
///
/// Every identifier the pool has ever produced is in exactly one of three
/// states: on the free list, active, or dropped (released while the free
/// list was at capacity).
#[derive(Debug)]
pub struct EntityPool {
    /// Next never-used identifier.
    next_id: u32,
    /// Recyclable identifiers; `acquire` pops from the back.
    free: Vec<EntityId>,
    /// Active flag per identifier, indexed by raw id.
    active: Vec<bool>,
    active_count: usize,
    config: PoolConfig,
}

impl EntityPool {
    /// Create a pool and prewarm its free list.
    pub fn new(config: PoolConfig) -> Self {
        let mut pool = Self {
            next_id: 1,
            free: Vec::with_capacity(config.max_free.min(config.initial_size.max(16))),
            active: Vec::new(),
            active_count: 0,
            config,
        };
        pool.prewarm();
        pool
    }

    /// Reserve `initial_size` identifiers. They are pushed in descending
    /// order so the first `acquire` returns the lowest id.
    fn prewarm(&mut self) {
        let count = self.config.initial_size.min(self.config.max_free);
        let first = self.next_id;
        self.next_id += count as u32;
        self.free
            .extend((first..self.next_id).rev().map(EntityId::from_raw));
        self.active.resize(self.next_id as usize, false);
    }

    /// Take an identifier off the free list (or mint a new one) and mark it
    /// active.
    pub fn acquire(&mut self) -> EntityId {
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                let id = EntityId::from_raw(self.next_id);
                self.next_id += 1;
                id
            }
        };
        if id.index() >= self.active.len() {
            self.active.resize(id.index() + 1, false);
        }
        self.active[id.index()] = true;
        self.active_count += 1;
        id
    }

    /// Deactivate `id`, strip every component it carries from `store`, and
    /// return the identifier to the free list if there is room.
    ///
    /// Returns `false` (and logs) when `id` is not active.
    pub fn release(&mut self, id: EntityId, store: &mut ComponentStore) -> bool {
        if !self.is_active(id) {
            warn!(entity = %id, "release of inactive entity ignored");
            return false;
        }
        self.active[id.index()] = false;
        self.active_count -= 1;
        store.clear_entity(id);
        if self.free.len() < self.config.max_free {
            self.free.push(id);
        }
        true
    }

    /// Whether `id` is currently active.
    pub fn is_active(&self, id: EntityId) -> bool {
        self.active.get(id.index()).copied().unwrap_or(false)
    }

    /// Active identifiers in ascending order.
    pub fn active(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(idx, _)| EntityId::from_raw(idx as u32))
    }

    /// Number of active identifiers.
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Number of identifiers waiting on the free list.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Fill `out` with every active entity carrying all components in
    /// `required`, in ascending id order. `out` is cleared first so callers
    /// can reuse one buffer across ticks.
    pub fn query_into(&self, store: &ComponentStore, required: ComponentMask, out: &mut Vec<EntityId>) {
        out.clear();
        out.extend(self.active().filter(|&id| store.mask(id).contains(required)));
    }

    /// Allocating convenience form of [`query_into`](Self::query_into).
    pub fn query(&self, store: &ComponentStore, required: ComponentMask) -> Vec<EntityId> {
        let mut out = Vec::new();
        self.query_into(store, required, &mut out);
        out
    }

    /// Forget every identifier and restart numbering at 1.
    ///
    /// The caller is responsible for clearing component storage.
    pub fn reset(&mut self) {
        self.next_id = 1;
        self.free.clear();
        self.active.clear();
        self.active_count = 0;
        self.prewarm();
    }
}

impl Default for EntityPool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
