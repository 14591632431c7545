use serde::{Deserialize, Serialize};

/// Hit points. `0 <= current <= max` holds after every mutation made
/// through these methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    /// Damage is ignored entirely while set. Healing still applies.
    pub is_invulnerable: bool,
}

impl Health {
    /// Full health. A negative maximum is treated as zero.
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            max,
            is_invulnerable: false,
        }
    }

    /// Builder form of setting [`is_invulnerable`](Self::is_invulnerable).
    pub fn invulnerable(mut self) -> Self {
        self.is_invulnerable = true;
        self
    }

    /// Subtract `amount` and return how much was actually removed.
    ///
    /// Invulnerable targets and non-positive amounts absorb nothing.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if self.is_invulnerable || amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current - amount).clamp(0.0, self.max);
        before - self.current
    }

    /// Add `amount`, capped at `max`, and return how much was actually
    /// restored.
    pub fn apply_healing(&mut self, amount: f32) -> f32 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current + amount).clamp(0.0, self.max);
        self.current - before
    }

    /// No hit points left.
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// `current / max`, or 0 for a zero maximum.
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_at_zero() {
        let mut h = Health::new(10.0);
        assert_eq!(h.apply_damage(4.0), 4.0);
        assert_eq!(h.apply_damage(100.0), 6.0);
        assert_eq!(h.current, 0.0);
        assert!(h.is_dead());
    }

    #[test]
    fn invulnerable_absorbs_nothing() {
        let mut h = Health::new(10.0).invulnerable();
        assert_eq!(h.apply_damage(5.0), 0.0);
        assert_eq!(h.current, 10.0);
    }

    #[test]
    fn non_positive_damage_is_ignored() {
        let mut h = Health::new(10.0);
        assert_eq!(h.apply_damage(0.0), 0.0);
        assert_eq!(h.apply_damage(-3.0), 0.0);
        assert_eq!(h.apply_damage(f32::NAN), 0.0);
        assert_eq!(h.current, 10.0);
    }

    #[test]
    fn healing_caps_at_max() {
        let mut h = Health::new(10.0);
        h.apply_damage(3.0);
        assert_eq!(h.apply_healing(5.0), 3.0);
        assert_eq!(h.current, 10.0);
        assert_eq!(h.apply_healing(-1.0), 0.0);
    }
}
