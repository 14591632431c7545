use onslaught_ecs::prelude::*;
use tracing::info;

use super::GAME_STATE_PRIORITY;
use crate::factory;

/// Owns the game-state singleton and ends the run when the player dies.
#[derive(Debug, Default)]
pub struct GameStateSystem;

impl GameStateSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for GameStateSystem {
    fn id(&self) -> SystemId {
        SystemId::GAME_STATE
    }

    fn name(&self) -> &'static str {
        "game_state"
    }

    fn required(&self) -> ComponentMask {
        ComponentMask::GAME_STATE
    }

    fn priority(&self) -> i32 {
        GAME_STATE_PRIORITY
    }

    fn initialize(&mut self, world: &mut World) -> Result<(), EcsError> {
        if world.game_state_entity().is_none() {
            let id = world.spawn(factory::game_state_bundle());
            info!(entity = %id, "game state created");
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _entities: &[EntityId], _dt: f32) {
        let Some(player) = ctx.first_with_tag(Tag::Player) else {
            return;
        };
        let dead = ctx.get::<Health>(player).is_some_and(Health::is_dead);
        if !dead {
            return;
        }
        let score = ctx.resources.score.score();
        let Some(state) = ctx.game_state_mut() else {
            return;
        };
        if state.is_game_over {
            return;
        }
        state.set_game_over(true);
        ctx.resources.emit(GameEvent::GameOver { score });
        info!(player = %player, score, "game over");
    }

    fn cleanup(&mut self, world: &mut World) {
        if let Some(id) = world.game_state_entity() {
            world.remove_entity(id);
        }
    }
}
