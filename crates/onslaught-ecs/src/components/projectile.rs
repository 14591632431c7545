use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// A damaging shot. Removed once its pierce budget is spent or it comes
/// to rest against the stage boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Damage dealt to each enemy hit.
    pub damage: f32,
    /// Enemies this projectile may still damage.
    pub pierce_left: u32,
    /// Entity that fired it, if any.
    pub owner: Option<EntityId>,
    /// Enemies already damaged, so one projectile never hits the same
    /// enemy twice.
    pub hit_targets: Vec<EntityId>,
}

impl Projectile {
    /// `pierce` is how many distinct enemies it may damage.
    pub fn new(damage: f32, pierce: u32, owner: Option<EntityId>) -> Self {
        Self {
            damage,
            pierce_left: pierce,
            owner,
            hit_targets: Vec::new(),
        }
    }

    /// Consume one pierce unit. Returns `true` once the budget is spent.
    pub fn decrement_pierce(&mut self) -> bool {
        self.pierce_left = self.pierce_left.saturating_sub(1);
        self.pierce_left == 0
    }

    /// Whether `target` was already damaged by this projectile.
    pub fn has_hit(&self, target: EntityId) -> bool {
        self.hit_targets.contains(&target)
    }

    /// Remember `target`. Recording the same target twice is a no-op.
    pub fn record_hit(&mut self, target: EntityId) {
        if !self.has_hit(target) {
            self.hit_targets.push(target);
        }
    }

    /// No pierce budget left.
    pub fn is_spent(&self) -> bool {
        self.pierce_left == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pierce_counts_down_to_spent() {
        let mut p = Projectile::new(5.0, 2, None);
        assert!(!p.decrement_pierce());
        assert!(p.decrement_pierce());
        assert!(p.is_spent());
        assert!(p.decrement_pierce());
        assert_eq!(p.pierce_left, 0);
    }

    #[test]
    fn hits_are_recorded_once() {
        let mut p = Projectile::new(5.0, 3, None);
        let e = EntityId::from_raw(7);
        assert!(!p.has_hit(e));
        p.record_hit(e);
        p.record_hit(e);
        assert!(p.has_hit(e));
        assert_eq!(p.hit_targets.len(), 1);
    }
}
