//! Component bundles for every entity the game creates.
//!
//! Systems never assemble gameplay entities by hand; they ask for a bundle
//! here so a player spawned at startup and a player recreated mid-run are
//! identical.

use onslaught_ecs::prelude::*;

use crate::config::GameConfig;

pub const PLAYER_Z: i32 = 10;
pub const ENEMY_Z: i32 = 5;
pub const PROJECTILE_Z: i32 = 3;

/// The player, centered on the stage. The weapon timer is attached
/// separately (see [`weapon_timer`]).
pub fn player_bundle(config: &GameConfig) -> ComponentBundle {
    let size = config.player.size;
    let x = config.stage.width / 2.0 - size / 2.0;
    let y = config.stage.height / 2.0 - size / 2.0;
    ComponentBundle::new()
        .with(Tag::Player)
        .with(Transform::new(x, y, size, size))
        .with(Velocity::new(config.player.speed))
        .with(Health::new(config.player.health))
        .with(Collider::new(ColliderType::Player, size, size))
        .with(Render::new(RenderType::Player, PLAYER_Z).with_color(Color::GREEN))
        .with(Input::default())
}

/// Looping auto-fire timer.
pub fn weapon_timer(interval: f32) -> Timer {
    Timer::new(interval, true)
}

/// A seek-player enemy at `(x, y)`.
pub fn enemy_bundle(config: &GameConfig, x: f32, y: f32, target: Option<EntityId>) -> ComponentBundle {
    let size = config.enemy.size;
    let mut ai = Ai::seeking(target);
    ai.detection_radius = config.enemy.detection_radius;
    ComponentBundle::new()
        .with(Tag::Enemy)
        .with(Transform::new(x, y, size, size))
        .with(Velocity::new(config.enemy.speed))
        .with(Health::new(config.enemy.health))
        .with(Collider::new(ColliderType::Enemy, size, size))
        .with(Render::new(RenderType::Enemy, ENEMY_Z).with_color(Color::RED))
        .with(ai)
}

/// A projectile centered on `(cx, cy)` travelling at `angle` radians.
pub fn projectile_bundle(
    config: &GameConfig,
    owner: EntityId,
    cx: f32,
    cy: f32,
    angle: f32,
) -> ComponentBundle {
    let size = config.projectile.size;
    let mut velocity = Velocity::new(config.projectile.speed);
    velocity.set_direction(angle.cos(), angle.sin());
    ComponentBundle::new()
        .with(Tag::Projectile)
        .with(Transform::new(cx - size / 2.0, cy - size / 2.0, size, size))
        .with(velocity)
        .with(Collider::new(ColliderType::Projectile, size, size).trigger())
        .with(Render::new(RenderType::Projectile, PROJECTILE_Z).with_color(Color::YELLOW))
        .with(Projectile::new(
            config.projectile.damage,
            config.projectile.pierce,
            Some(owner),
        ))
}

/// The entity that owns the enemy spawn timer.
pub fn spawner_bundle(config: &GameConfig) -> ComponentBundle {
    ComponentBundle::new()
        .with(Tag::Spawner)
        .with(Timer::looping_with_delay(
            config.spawn.base_interval,
            config.spawn.initial_delay,
        ))
}

pub fn game_state_bundle() -> ComponentBundle {
    ComponentBundle::new().with(GameState::default())
}
