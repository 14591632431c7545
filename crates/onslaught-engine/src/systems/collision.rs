//! Pairwise AABB overlap and its two gameplay consequences: contact damage
//! to the player and projectile hits on enemies.

use std::collections::BTreeMap;

use onslaught_ecs::prelude::*;
use tracing::debug;

use super::COLLISION_PRIORITY;
use crate::config::CombatConfig;

#[derive(Debug, Clone, Copy)]
struct Body {
    id: EntityId,
    collider: Collider,
    transform: Transform,
}

/// Resolves overlaps between colliders of different types.
///
/// Every pair is tested once per tick, so the cost is quadratic in the
/// number of colliders.
#[derive(Debug)]
pub struct CollisionSystem {
    combat: CombatConfig,
    bodies: Vec<Body>,
    /// Earliest sim time each player may take contact damage again. Only
    /// used when `contact_cooldown > 0`.
    next_contact: BTreeMap<EntityId, f64>,
}

impl CollisionSystem {
    pub fn new(combat: &CombatConfig) -> Self {
        Self {
            combat: *combat,
            bodies: Vec::new(),
            next_contact: BTreeMap::new(),
        }
    }

    fn contact(&mut self, ctx: &mut SystemContext<'_>, player: EntityId) {
        let now = ctx.elapsed();
        let cooldown = f64::from(self.combat.contact_cooldown);
        if cooldown > 0.0 && self.next_contact.get(&player).is_some_and(|&at| now < at) {
            return;
        }
        let Some(health) = ctx.components.healths.get_mut(player) else {
            return;
        };
        let dealt = health.apply_damage(self.combat.contact_damage);
        if dealt <= 0.0 {
            return;
        }
        let remaining = health.current;
        if cooldown > 0.0 {
            self.next_contact.insert(player, now + cooldown);
        }
        ctx.resources.emit(GameEvent::PlayerDamaged {
            player,
            amount: dealt,
            remaining,
        });
    }

    fn hit(&mut self, ctx: &mut SystemContext<'_>, shot: EntityId, enemy: EntityId) {
        if ctx.commands.is_despawn_queued(shot) || ctx.commands.is_despawn_queued(enemy) {
            return;
        }
        let Some(projectile) = ctx.components.projectiles.get(shot) else {
            return;
        };
        if projectile.is_spent() || projectile.has_hit(enemy) || projectile.owner == Some(enemy) {
            return;
        }
        let (damage, owner) = (projectile.damage, projectile.owner);

        let Some(health) = ctx.components.healths.get_mut(enemy) else {
            return;
        };
        if health.is_dead() {
            return;
        }
        health.apply_damage(damage);
        let killed = health.is_dead();

        let spent = match ctx.components.projectiles.get_mut(shot) {
            Some(projectile) => {
                projectile.record_hit(enemy);
                projectile.decrement_pierce()
            }
            None => false,
        };

        if killed {
            ctx.commands.despawn(
                enemy,
                SystemId::COLLISION,
                CausalReason::CollisionResponse(shot, enemy),
            );
            ctx.resources.score.increment(self.combat.points_per_kill);
            ctx.resources.emit(GameEvent::EnemyKilled { enemy, by: owner });
            debug!(enemy = %enemy, projectile = %shot, "enemy killed");
        }
        if spent {
            ctx.commands.despawn(
                shot,
                SystemId::COLLISION,
                CausalReason::CollisionResponse(shot, enemy),
            );
        }
    }
}

impl System for CollisionSystem {
    fn id(&self) -> SystemId {
        SystemId::COLLISION
    }

    fn name(&self) -> &'static str {
        "collision"
    }

    fn required(&self) -> ComponentMask {
        ComponentMask::TRANSFORM | ComponentMask::COLLIDER
    }

    fn priority(&self) -> i32 {
        COLLISION_PRIORITY
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entities: &[EntityId], _dt: f32) {
        if !self.next_contact.is_empty() {
            self.next_contact.retain(|id, _| ctx.pool.is_active(*id));
        }

        self.bodies.clear();
        for &id in entities {
            let (Some(&collider), Some(&transform)) = (
                ctx.components.colliders.get(id),
                ctx.components.transforms.get(id),
            ) else {
                continue;
            };
            self.bodies.push(Body {
                id,
                collider,
                transform,
            });
        }

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (a, b) = (self.bodies[i], self.bodies[j]);
                if a.collider.collider_type == b.collider.collider_type {
                    continue;
                }
                if !a.collider.overlaps(&a.transform, &b.collider, &b.transform) {
                    continue;
                }
                match (a.collider.collider_type, b.collider.collider_type) {
                    (ColliderType::Player, ColliderType::Enemy) => self.contact(ctx, a.id),
                    (ColliderType::Enemy, ColliderType::Player) => self.contact(ctx, b.id),
                    (ColliderType::Projectile, ColliderType::Enemy) => self.hit(ctx, a.id, b.id),
                    (ColliderType::Enemy, ColliderType::Projectile) => self.hit(ctx, b.id, a.id),
                    _ => {}
                }
            }
        }
    }
}
