use std::f32::consts::TAU;

use onslaught_ecs::prelude::*;
use rand::Rng;
use tracing::debug;

use super::PROJECTILE_PRIORITY;
use crate::config::GameConfig;
use crate::factory;

/// Give `entity` an auto-fire timer, or re-arm the one it already has.
///
/// Calling this twice never stacks timers: an existing timer takes the
/// new interval and restarts a full period.
pub fn add_weapon_timer(world: &mut World, entity: EntityId, interval: f32) -> Result<(), EcsError> {
    if let Some(timer) = world.get_mut::<Timer>(entity) {
        timer.duration = interval;
        timer.reset(true);
        return Ok(());
    }
    world.insert(entity, factory::weapon_timer(interval))?;
    Ok(())
}

/// Fires projectiles in random directions from every armed player and
/// culls projectiles that have come to rest on the stage boundary.
#[derive(Debug)]
pub struct ProjectileSystem {
    config: GameConfig,
    stale: Vec<EntityId>,
}

impl ProjectileSystem {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.clone(),
            stale: Vec::new(),
        }
    }

    fn at_boundary(&self, t: &Transform) -> bool {
        t.x <= 0.0
            || t.y <= 0.0
            || t.x >= self.config.stage.width - t.width
            || t.y >= self.config.stage.height - t.height
    }
}

impl System for ProjectileSystem {
    fn id(&self) -> SystemId {
        SystemId::PROJECTILE
    }

    fn name(&self) -> &'static str {
        "projectile"
    }

    fn required(&self) -> ComponentMask {
        ComponentMask::TAG | ComponentMask::TIMER | ComponentMask::TRANSFORM
    }

    fn priority(&self) -> i32 {
        PROJECTILE_PRIORITY
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entities: &[EntityId], dt: f32) {
        for &id in entities {
            if ctx.components.tags.get(id) != Some(&Tag::Player) {
                continue;
            }
            let Some(timer) = ctx.components.timers.get_mut(id) else {
                continue;
            };
            if !timer.update(dt) {
                continue;
            }
            let Some(transform) = ctx.components.transforms.get(id) else {
                continue;
            };
            let (cx, cy) = transform.center();
            let angle = ctx.resources.rng.gen_range(0.0..TAU);
            ctx.commands.spawn(
                factory::projectile_bundle(&self.config, id, cx, cy, angle),
                SystemId::PROJECTILE,
                CausalReason::Timer("weapon"),
            );
            ctx.resources.emit(GameEvent::ProjectileFired { owner: id, angle });
            debug!(owner = %id, angle, "projectile fired");
        }

        if !self.config.projectile.despawn_at_bounds {
            return;
        }
        self.stale.clear();
        for (id, _) in ctx.components.projectiles.iter() {
            let resting = ctx
                .components
                .transforms
                .get(id)
                .is_some_and(|t| self.at_boundary(t));
            if resting && !ctx.commands.is_despawn_queued(id) {
                self.stale.push(id);
            }
        }
        for &id in &self.stale {
            ctx.commands.despawn(
                id,
                SystemId::PROJECTILE,
                CausalReason::GameRule("projectile_out_of_bounds"),
            );
        }
    }
}
