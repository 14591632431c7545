//! Sparse-set component storage.
//!
//! Each component kind gets its own [`SparseSet`]: a sparse index keyed by
//! entity id pointing into a densely packed value array. Lookups are O(1),
//! iteration walks contiguous memory, and removal is a swap-remove.
//!
//! [`ComponentStore`] exposes the columns as public fields so a system can
//! borrow several kinds at once (reading transforms while writing
//! velocities). Presence can only change through the store's own methods,
//! which keep the per-entity [`ComponentMask`] in sync.

use crate::component::{Component, ComponentBundle, ComponentKind, ComponentMask};
use crate::components::{
    Ai, Collider, GameState, Health, Input, Projectile, Render, Tag, Timer, Transform, Velocity,
};
use crate::entity::EntityId;

const EMPTY: u32 = u32::MAX;

// ---------------------------------------------------------------------------
// SparseSet
// ---------------------------------------------------------------------------

/// Storage for one component kind.
#[derive(Debug, Clone)]
pub struct SparseSet<T> {
    /// Indexed by entity id; `EMPTY` or a position in `dense`.
    sparse: Vec<u32>,
    dense: Vec<T>,
    /// Owner of each dense slot.
    owners: Vec<EntityId>,
}

impl<T> SparseSet<T> {
    /// An empty set.
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            owners: Vec::new(),
        }
    }

    #[inline]
    fn slot(&self, id: EntityId) -> Option<usize> {
        match self.sparse.get(id.index()) {
            Some(&idx) if idx != EMPTY => Some(idx as usize),
            _ => None,
        }
    }

    /// Whether `id` has a value here.
    pub fn contains(&self, id: EntityId) -> bool {
        self.slot(id).is_some()
    }

    /// Value owned by `id`, if any. O(1).
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slot(id).map(|idx| &self.dense[idx])
    }

    /// Mutable value owned by `id`, if any.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.slot(id).map(move |idx| &mut self.dense[idx])
    }

    /// Insert or overwrite. Returns the previous value.
    pub(crate) fn insert(&mut self, id: EntityId, value: T) -> Option<T> {
        if let Some(idx) = self.slot(id) {
            return Some(std::mem::replace(&mut self.dense[idx], value));
        }
        if id.index() >= self.sparse.len() {
            self.sparse.resize(id.index() + 1, EMPTY);
        }
        self.sparse[id.index()] = self.dense.len() as u32;
        self.dense.push(value);
        self.owners.push(id);
        None
    }

    /// Swap-remove. The last dense value moves into the freed slot.
    pub(crate) fn remove(&mut self, id: EntityId) -> Option<T> {
        let idx = self.slot(id)?;
        self.sparse[id.index()] = EMPTY;
        let value = self.dense.swap_remove(idx);
        self.owners.swap_remove(idx);
        if let Some(&moved) = self.owners.get(idx) {
            self.sparse[moved.index()] = idx as u32;
        }
        Some(value)
    }

    pub(crate) fn clear(&mut self) {
        self.sparse.clear();
        self.dense.clear();
        self.owners.clear();
    }

    /// `(owner, value)` pairs in storage order (not id order).
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.owners.iter().copied().zip(self.dense.iter())
    }

    /// Mutable counterpart of [`iter`](Self::iter).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.owners.iter().copied().zip(self.dense.iter_mut())
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// ComponentStore
// ---------------------------------------------------------------------------

/// One [`SparseSet`] per catalog kind plus a presence mask per entity.
#[derive(Debug, Clone, Default)]
pub struct ComponentStore {
    pub transforms: SparseSet<Transform>,
    pub velocities: SparseSet<Velocity>,
    pub healths: SparseSet<Health>,
    pub colliders: SparseSet<Collider>,
    pub renders: SparseSet<Render>,
    pub inputs: SparseSet<Input>,
    pub ais: SparseSet<Ai>,
    pub projectiles: SparseSet<Projectile>,
    pub tags: SparseSet<Tag>,
    pub timers: SparseSet<Timer>,
    pub game_states: SparseSet<GameState>,
    masks: Vec<ComponentMask>,
}

impl ComponentStore {
    /// Kinds attached to `id`. Empty for unknown ids.
    pub fn mask(&self, id: EntityId) -> ComponentMask {
        self.masks
            .get(id.index())
            .copied()
            .unwrap_or(ComponentMask::empty())
    }

    fn mask_mut(&mut self, id: EntityId) -> &mut ComponentMask {
        if id.index() >= self.masks.len() {
            self.masks.resize(id.index() + 1, ComponentMask::empty());
        }
        &mut self.masks[id.index()]
    }

    /// Attach (or overwrite) a component. Returns the previous value.
    pub fn insert<C: Component>(&mut self, id: EntityId, component: C) -> Option<C> {
        self.mask_mut(id).insert(C::KIND.mask());
        C::storage_mut(self).insert(id, component)
    }

    /// Detach a component. Returns it if it was attached.
    pub fn remove<C: Component>(&mut self, id: EntityId) -> Option<C> {
        self.mask_mut(id).remove(C::KIND.mask());
        C::storage_mut(self).remove(id)
    }

    /// Component of kind `C` on `id`.
    pub fn get<C: Component>(&self, id: EntityId) -> Option<&C> {
        C::storage(self).get(id)
    }

    pub fn get_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        C::storage_mut(self).get_mut(id)
    }

    /// Mask check, no storage lookup.
    pub fn has<C: Component>(&self, id: EntityId) -> bool {
        self.mask(id).contains(C::KIND.mask())
    }

    /// Attach every component the bundle carries.
    pub fn insert_bundle(&mut self, id: EntityId, bundle: ComponentBundle) {
        let ComponentBundle {
            transform,
            velocity,
            health,
            collider,
            render,
            input,
            ai,
            projectile,
            tag,
            timer,
            game_state,
        } = bundle;
        if let Some(c) = transform {
            self.insert(id, c);
        }
        if let Some(c) = velocity {
            self.insert(id, c);
        }
        if let Some(c) = health {
            self.insert(id, c);
        }
        if let Some(c) = collider {
            self.insert(id, c);
        }
        if let Some(c) = render {
            self.insert(id, c);
        }
        if let Some(c) = input {
            self.insert(id, c);
        }
        if let Some(c) = ai {
            self.insert(id, c);
        }
        if let Some(c) = projectile {
            self.insert(id, c);
        }
        if let Some(c) = tag {
            self.insert(id, c);
        }
        if let Some(c) = timer {
            self.insert(id, c);
        }
        if let Some(c) = game_state {
            self.insert(id, c);
        }
    }

    /// Detach every component from `id`.
    pub fn clear_entity(&mut self, id: EntityId) {
        let mask = self.mask(id);
        for kind in mask.kinds() {
            match kind {
                ComponentKind::Transform => {
                    self.transforms.remove(id);
                }
                ComponentKind::Velocity => {
                    self.velocities.remove(id);
                }
                ComponentKind::Health => {
                    self.healths.remove(id);
                }
                ComponentKind::Collider => {
                    self.colliders.remove(id);
                }
                ComponentKind::Render => {
                    self.renders.remove(id);
                }
                ComponentKind::Input => {
                    self.inputs.remove(id);
                }
                ComponentKind::Ai => {
                    self.ais.remove(id);
                }
                ComponentKind::Projectile => {
                    self.projectiles.remove(id);
                }
                ComponentKind::Tag => {
                    self.tags.remove(id);
                }
                ComponentKind::Timer => {
                    self.timers.remove(id);
                }
                ComponentKind::GameState => {
                    self.game_states.remove(id);
                }
            }
        }
        if let Some(m) = self.masks.get_mut(id.index()) {
            *m = ComponentMask::empty();
        }
    }

    /// Drop every component of every entity.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.velocities.clear();
        self.healths.clear();
        self.colliders.clear();
        self.renders.clear();
        self.inputs.clear();
        self.ais.clear();
        self.projectiles.clear();
        self.tags.clear();
        self.timers.clear();
        self.game_states.clear();
        self.masks.clear();
    }

    /// Lowest id carrying `tag`.
    pub fn first_with_tag(&self, tag: Tag) -> Option<EntityId> {
        self.tags
            .iter()
            .filter(|(_, &t)| t == tag)
            .map(|(id, _)| id)
            .min()
    }

    /// Number of entities carrying `tag`.
    pub fn count_with_tag(&self, tag: Tag) -> usize {
        self.tags.iter().filter(|(_, &t)| t == tag).count()
    }

    /// Rebuild a bundle from the components currently attached to `id`.
    pub fn bundle_of(&self, id: EntityId) -> ComponentBundle {
        ComponentBundle {
            transform: self.transforms.get(id).copied(),
            velocity: self.velocities.get(id).copied(),
            health: self.healths.get(id).copied(),
            collider: self.colliders.get(id).copied(),
            render: self.renders.get(id).copied(),
            input: self.inputs.get(id).copied(),
            ai: self.ais.get(id).copied(),
            projectile: self.projectiles.get(id).cloned(),
            tag: self.tags.get(id).copied(),
            timer: self.timers.get(id).copied(),
            game_state: self.game_states.get(id).copied(),
        }
    }
}

// ---------------------------------------------------------------------------
// Component impls
// ---------------------------------------------------------------------------

macro_rules! impl_component {
    ($ty:ty, $kind:ident, $column:ident, $slot:ident) => {
        impl Component for $ty {
            const KIND: ComponentKind = ComponentKind::$kind;

            #[inline]
            fn storage(store: &ComponentStore) -> &SparseSet<Self> {
                &store.$column
            }

            #[inline]
            fn storage_mut(store: &mut ComponentStore) -> &mut SparseSet<Self> {
                &mut store.$column
            }

            #[inline]
            fn bundle_slot(bundle: &mut ComponentBundle) -> &mut Option<Self> {
                &mut bundle.$slot
            }
        }
    };
}

impl_component!(Transform, Transform, transforms, transform);
impl_component!(Velocity, Velocity, velocities, velocity);
impl_component!(Health, Health, healths, health);
impl_component!(Collider, Collider, colliders, collider);
impl_component!(Render, Render, renders, render);
impl_component!(Input, Input, inputs, input);
impl_component!(Ai, Ai, ais, ai);
impl_component!(Projectile, Projectile, projectiles, projectile);
impl_component!(Tag, Tag, tags, tag);
impl_component!(Timer, Timer, timers, timer);
impl_component!(GameState, GameState, game_states, game_state);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
