use onslaught_ecs::prelude::*;
use tracing::{info, warn};

use super::projectile::add_weapon_timer;
use super::PLAYER_PRIORITY;
use crate::config::GameConfig;
use crate::factory;

/// Guarantees a player exists.
///
/// Creates the player during initialization and queues a replacement on
/// any tick that finds none.
#[derive(Debug)]
pub struct PlayerSystem {
    config: GameConfig,
}

impl PlayerSystem {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl System for PlayerSystem {
    fn id(&self) -> SystemId {
        SystemId::PLAYER
    }

    fn name(&self) -> &'static str {
        "player"
    }

    fn required(&self) -> ComponentMask {
        ComponentMask::TAG
    }

    fn priority(&self) -> i32 {
        PLAYER_PRIORITY
    }

    fn initialize(&mut self, world: &mut World) -> Result<(), EcsError> {
        if world.first_with_tag(Tag::Player).is_some() {
            return Ok(());
        }
        let id = world.spawn(factory::player_bundle(&self.config));
        add_weapon_timer(world, id, self.config.player.attack_rate)?;
        info!(entity = %id, "player created");
        Ok(())
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entities: &[EntityId], _dt: f32) {
        let has_player = entities
            .iter()
            .any(|&id| ctx.get::<Tag>(id) == Some(&Tag::Player));
        if has_player {
            return;
        }
        warn!("no player entity, recreating");
        ctx.commands.spawn(
            factory::player_bundle(&self.config)
                .with(factory::weapon_timer(self.config.player.attack_rate)),
            SystemId::PLAYER,
            CausalReason::GameRule("player_missing"),
        );
    }

    fn cleanup(&mut self, world: &mut World) {
        while let Some(id) = world.first_with_tag(Tag::Player) {
            world.remove_entity(id);
        }
    }
}
