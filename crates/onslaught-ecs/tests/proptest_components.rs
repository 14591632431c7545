//! Property tests for component-level invariants.

use onslaught_ecs::prelude::*;
use proptest::prelude::*;

const EPS: f32 = 1e-4;

#[derive(Debug, Clone)]
enum HealthOp {
    Damage(f32),
    Heal(f32),
    ToggleInvulnerable,
}

fn health_op_strategy() -> impl Strategy<Value = HealthOp> {
    prop_oneof![
        (-50.0f32..200.0).prop_map(HealthOp::Damage),
        (-50.0f32..200.0).prop_map(HealthOp::Heal),
        Just(HealthOp::ToggleInvulnerable),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(5_000))]

    /// `0 <= current <= max` after every operation, and invulnerable or
    /// non-positive damage changes nothing.
    #[test]
    fn health_stays_clamped(
        max in 0.0f32..500.0,
        ops in prop::collection::vec(health_op_strategy(), 1..40),
    ) {
        let mut health = Health::new(max);
        for op in ops {
            let before = health.current;
            match op {
                HealthOp::Damage(amount) => {
                    let dealt = health.apply_damage(amount);
                    if health.is_invulnerable || amount <= 0.0 {
                        prop_assert_eq!(dealt, 0.0);
                        prop_assert_eq!(health.current, before);
                    } else {
                        prop_assert!((before - health.current - dealt).abs() < EPS);
                    }
                }
                HealthOp::Heal(amount) => {
                    let healed = health.apply_healing(amount);
                    prop_assert!(healed >= 0.0);
                    prop_assert!((health.current - before - healed).abs() < EPS);
                }
                HealthOp::ToggleInvulnerable => {
                    health.is_invulnerable = !health.is_invulnerable;
                }
            }
            prop_assert!(health.current >= 0.0);
            prop_assert!(health.current <= health.max);
        }
    }

    /// Any non-zero direction normalizes to unit length.
    #[test]
    fn velocity_direction_is_unit_or_zero(dx in -1.0e4f32..1.0e4, dy in -1.0e4f32..1.0e4) {
        let mut velocity = Velocity::new(1.0);
        velocity.set_direction(dx, dy);
        let (x, y) = velocity.direction();
        if dx == 0.0 && dy == 0.0 {
            prop_assert_eq!((x, y), (0.0, 0.0));
        } else {
            prop_assert!((x.hypot(y) - 1.0).abs() < EPS);
            // Direction is preserved, not just length.
            prop_assert!(x * dx >= 0.0 && y * dy >= 0.0);
        }
    }

    /// A looping timer completes exactly floor(total / duration) times when
    /// fed small steps, give or take one for float accumulation.
    #[test]
    fn looping_timer_completion_count(
        duration in 0.1f32..2.0,
        step in 0.001f32..0.05,
        steps in 1..2_000usize,
    ) {
        let mut timer = Timer::new(duration, true);
        let completions = (0..steps).filter(|_| timer.update(step)).count();
        let expected = ((steps as f32 * step) / duration).floor() as i64;
        prop_assert!((completions as i64 - expected).abs() <= 1);
        prop_assert!(timer.remaining > 0.0 && timer.remaining <= duration + EPS);
    }

    /// A projectile with pierce N records at most N distinct hits before it
    /// reports spent.
    #[test]
    fn pierce_budget_bounds_hits(pierce in 1..10u32, targets in prop::collection::vec(1..20u32, 1..40)) {
        let mut projectile = Projectile::new(5.0, pierce, None);
        for raw in targets {
            if projectile.is_spent() {
                break;
            }
            let target = EntityId::from_raw(raw);
            if projectile.has_hit(target) {
                continue;
            }
            projectile.record_hit(target);
            projectile.decrement_pierce();
        }
        prop_assert!(projectile.hit_targets.len() as u32 <= pierce);
    }
}
