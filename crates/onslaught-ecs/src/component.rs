//! The component catalog: kinds, masks, and spawn bundles.
//!
//! The set of component kinds is closed. Every kind has a bit in
//! [`ComponentMask`], a storage column in
//! [`ComponentStore`](crate::storage::ComponentStore), and a slot in
//! [`ComponentBundle`]. The [`Component`] trait ties a Rust type to all
//! three so generic accessors resolve at compile time.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::{
    Ai, Collider, GameState, Health, Input, Projectile, Render, Tag, Timer, Transform, Velocity,
};
use crate::storage::{ComponentStore, SparseSet};

// ---------------------------------------------------------------------------
// ComponentKind
// ---------------------------------------------------------------------------

/// One entry of the fixed component catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Transform,
    Velocity,
    Health,
    Collider,
    Render,
    Input,
    Ai,
    Projectile,
    Tag,
    Timer,
    GameState,
}

impl ComponentKind {
    /// Every kind, in catalog order.
    pub const ALL: [ComponentKind; 11] = [
        ComponentKind::Transform,
        ComponentKind::Velocity,
        ComponentKind::Health,
        ComponentKind::Collider,
        ComponentKind::Render,
        ComponentKind::Input,
        ComponentKind::Ai,
        ComponentKind::Projectile,
        ComponentKind::Tag,
        ComponentKind::Timer,
        ComponentKind::GameState,
    ];

    pub fn mask(self) -> ComponentMask {
        match self {
            ComponentKind::Transform => ComponentMask::TRANSFORM,
            ComponentKind::Velocity => ComponentMask::VELOCITY,
            ComponentKind::Health => ComponentMask::HEALTH,
            ComponentKind::Collider => ComponentMask::COLLIDER,
            ComponentKind::Render => ComponentMask::RENDER,
            ComponentKind::Input => ComponentMask::INPUT,
            ComponentKind::Ai => ComponentMask::AI,
            ComponentKind::Projectile => ComponentMask::PROJECTILE,
            ComponentKind::Tag => ComponentMask::TAG,
            ComponentKind::Timer => ComponentMask::TIMER,
            ComponentKind::GameState => ComponentMask::GAME_STATE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Transform => "transform",
            ComponentKind::Velocity => "velocity",
            ComponentKind::Health => "health",
            ComponentKind::Collider => "collider",
            ComponentKind::Render => "render",
            ComponentKind::Input => "input",
            ComponentKind::Ai => "ai",
            ComponentKind::Projectile => "projectile",
            ComponentKind::Tag => "tag",
            ComponentKind::Timer => "timer",
            ComponentKind::GameState => "game_state",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ComponentMask
// ---------------------------------------------------------------------------

bitflags! {
    /// A set of component kinds. Systems declare their requirements as a
    /// mask and the world hands them every entity whose mask contains it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ComponentMask: u16 {
        const TRANSFORM  = 1 << 0;
        const VELOCITY   = 1 << 1;
        const HEALTH     = 1 << 2;
        const COLLIDER   = 1 << 3;
        const RENDER     = 1 << 4;
        const INPUT      = 1 << 5;
        const AI         = 1 << 6;
        const PROJECTILE = 1 << 7;
        const TAG        = 1 << 8;
        const TIMER      = 1 << 9;
        const GAME_STATE = 1 << 10;
    }
}

impl ComponentMask {
    /// Kinds present in this mask, in catalog order.
    pub fn kinds(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.mask()))
    }
}

impl From<ComponentKind> for ComponentMask {
    fn from(kind: ComponentKind) -> Self {
        kind.mask()
    }
}

// ---------------------------------------------------------------------------
// Component trait
// ---------------------------------------------------------------------------

/// A Rust type that is a member of the component catalog.
///
/// Implemented for exactly the eleven catalog types; there is no dynamic
/// registration.
pub trait Component: Sized + 'static {
    const KIND: ComponentKind;

    fn storage(store: &ComponentStore) -> &SparseSet<Self>;
    fn storage_mut(store: &mut ComponentStore) -> &mut SparseSet<Self>;
    fn bundle_slot(bundle: &mut ComponentBundle) -> &mut Option<Self>;
}

// ---------------------------------------------------------------------------
// ComponentBundle
// ---------------------------------------------------------------------------

/// Components to attach to an entity at spawn time.
///
/// Bundles are what deferred spawn commands carry, so a spawned entity
/// appears with all of its components at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<Velocity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<Health>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collider: Option<Collider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<Render>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Input>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<Ai>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projectile: Option<Projectile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<Timer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameState>,
}

impl ComponentBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) one component.
    pub fn with<C: Component>(mut self, component: C) -> Self {
        *C::bundle_slot(&mut self) = Some(component);
        self
    }

    /// Add (or replace) one component in place.
    pub fn add<C: Component>(&mut self, component: C) -> &mut Self {
        *C::bundle_slot(self) = Some(component);
        self
    }

    /// Mask of the kinds this bundle carries.
    pub fn mask(&self) -> ComponentMask {
        let mut mask = ComponentMask::empty();
        mask.set(ComponentMask::TRANSFORM, self.transform.is_some());
        mask.set(ComponentMask::VELOCITY, self.velocity.is_some());
        mask.set(ComponentMask::HEALTH, self.health.is_some());
        mask.set(ComponentMask::COLLIDER, self.collider.is_some());
        mask.set(ComponentMask::RENDER, self.render.is_some());
        mask.set(ComponentMask::INPUT, self.input.is_some());
        mask.set(ComponentMask::AI, self.ai.is_some());
        mask.set(ComponentMask::PROJECTILE, self.projectile.is_some());
        mask.set(ComponentMask::TAG, self.tag.is_some());
        mask.set(ComponentMask::TIMER, self.timer.is_some());
        mask.set(ComponentMask::GAME_STATE, self.game_state.is_some());
        mask
    }

    pub fn is_empty(&self) -> bool {
        self.mask().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_distinct_bit() {
        let mut seen = ComponentMask::empty();
        for kind in ComponentKind::ALL {
            assert!(!seen.intersects(kind.mask()), "{kind} shares a bit");
            seen |= kind.mask();
        }
        assert_eq!(seen, ComponentMask::all());
    }

    #[test]
    fn mask_round_trips_through_kinds() {
        let mask = ComponentMask::TRANSFORM | ComponentMask::TAG | ComponentMask::TIMER;
        let kinds: Vec<_> = mask.kinds().collect();
        assert_eq!(
            kinds,
            vec![ComponentKind::Transform, ComponentKind::Tag, ComponentKind::Timer]
        );
    }

    #[test]
    fn bundle_mask_tracks_slots() {
        let bundle = ComponentBundle::new()
            .with(Tag::Enemy)
            .with(Health::new(10.0))
            .with(Tag::Player);
        assert_eq!(bundle.mask(), ComponentMask::TAG | ComponentMask::HEALTH);
        assert_eq!(bundle.tag, Some(Tag::Player));
        assert!(ComponentBundle::new().is_empty());
    }
}
