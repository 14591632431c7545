//! The gameplay systems, in the order they run each tick.
//!
//! | priority | system     | entities                         |
//! |---------:|------------|----------------------------------|
//! |     -200 | game state | game-state singleton             |
//! |     -100 | score      | all                              |
//! |        0 | player     | tagged                           |
//! |        0 | input      | input + velocity + tag           |
//! |        1 | movement   | transform + velocity             |
//! |        2 | ai         | ai + transform + velocity        |
//! |        5 | spawn      | tag + timer                      |
//! |        6 | projectile | tag + timer + transform          |
//! |       10 | collision  | transform + collider             |
//! |      100 | render     | transform + render               |
//!
//! Player and input share priority 0; player is registered first.

mod ai;
mod collision;
mod game_state;
mod input;
mod movement;
mod player;
mod projectile;
mod render;
mod score;
mod spawn;

pub use ai::AiSystem;
pub use collision::CollisionSystem;
pub use game_state::GameStateSystem;
pub use input::InputSystem;
pub use movement::MovementSystem;
pub use player::PlayerSystem;
pub use projectile::{add_weapon_timer, ProjectileSystem};
pub use render::RenderSystem;
pub use score::ScoreSystem;
pub use spawn::{spawn_interval, SpawnSystem};

use onslaught_ecs::system::System;

use crate::config::GameConfig;

pub const GAME_STATE_PRIORITY: i32 = -200;
pub const SCORE_PRIORITY: i32 = -100;
pub const PLAYER_PRIORITY: i32 = 0;
pub const INPUT_PRIORITY: i32 = 0;
pub const MOVEMENT_PRIORITY: i32 = 1;
pub const AI_PRIORITY: i32 = 2;
pub const SPAWN_PRIORITY: i32 = 5;
pub const PROJECTILE_PRIORITY: i32 = 6;
pub const COLLISION_PRIORITY: i32 = 10;
pub const RENDER_PRIORITY: i32 = 100;

/// Every gameplay system, configured from `config`, in registration order.
pub fn default_systems(config: &GameConfig) -> Vec<Box<dyn System>> {
    vec![
        Box::new(GameStateSystem::new()),
        Box::new(ScoreSystem::new()),
        Box::new(PlayerSystem::new(config)),
        Box::new(InputSystem::new()),
        Box::new(MovementSystem::new(&config.stage)),
        Box::new(AiSystem::new(&config.enemy)),
        Box::new(SpawnSystem::new(config)),
        Box::new(ProjectileSystem::new(config)),
        Box::new(CollisionSystem::new(&config.combat)),
        Box::new(RenderSystem::new()),
    ]
}
