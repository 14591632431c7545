use onslaught_ecs::prelude::*;

use super::AI_PRIORITY;
use crate::config::EnemyConfig;

/// Steers AI-driven entities.
///
/// Seekers head for the player's center; patrollers trace a circle whose
/// heading is a function of simulated time; idlers stand still. With no
/// player in the world every velocity is left as it was.
#[derive(Debug)]
pub struct AiSystem {
    patrol_angular_speed: f32,
}

impl AiSystem {
    pub fn new(enemy: &EnemyConfig) -> Self {
        Self {
            patrol_angular_speed: enemy.patrol_angular_speed,
        }
    }

    /// Live player to chase: the remembered target if it still is one,
    /// otherwise the first player.
    fn resolve_target(ctx: &SystemContext<'_>, remembered: Option<EntityId>) -> Option<EntityId> {
        remembered
            .filter(|&id| ctx.pool.is_active(id) && ctx.get::<Tag>(id) == Some(&Tag::Player))
            .or_else(|| ctx.first_with_tag(Tag::Player))
    }
}

impl System for AiSystem {
    fn id(&self) -> SystemId {
        SystemId::AI
    }

    fn name(&self) -> &'static str {
        "ai"
    }

    fn required(&self) -> ComponentMask {
        ComponentMask::AI | ComponentMask::TRANSFORM | ComponentMask::VELOCITY
    }

    fn priority(&self) -> i32 {
        AI_PRIORITY
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entities: &[EntityId], _dt: f32) {
        if ctx.first_with_tag(Tag::Player).is_none() {
            return;
        }
        let heading = (ctx.elapsed() as f32) * self.patrol_angular_speed;

        for &id in entities {
            let Some(ai) = ctx.components.ais.get(id).copied() else {
                continue;
            };
            let Some(&me) = ctx.components.transforms.get(id) else {
                continue;
            };

            let direction = match ai.behavior {
                AiBehavior::SeekPlayer => {
                    let target = Self::resolve_target(ctx, ai.target);
                    if let Some(stored) = ctx.components.ais.get_mut(id) {
                        stored.target = target;
                    }
                    let Some(player) = target.and_then(|t| ctx.components.transforms.get(t).copied())
                    else {
                        continue;
                    };
                    let in_range = ai
                        .detection_radius
                        .map_or(true, |radius| me.distance_between(&player) <= radius);
                    if in_range {
                        let (px, py) = player.center();
                        let (sx, sy) = me.center();
                        (px - sx, py - sy)
                    } else {
                        (0.0, 0.0)
                    }
                }
                AiBehavior::Patrol => (heading.cos(), heading.sin()),
                AiBehavior::Idle => (0.0, 0.0),
            };

            if let Some(velocity) = ctx.components.velocities.get_mut(id) {
                velocity.set_direction(direction.0, direction.1);
            }
        }
    }
}
