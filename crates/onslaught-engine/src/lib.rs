//! Onslaught Engine -- gameplay systems, configuration and the host facade
//! for a top-down survival game.
//!
//! This crate builds on [`onslaught_ecs`] to provide everything a host loop
//! needs: a validated [`GameConfig`](config::GameConfig), entity factories,
//! the ten gameplay systems, a frame clock that caps and scales host
//! deltas, input replay, and tracing setup.
//!
//! # Quick Start
//!
//! ```
//! use onslaught_engine::prelude::*;
//!
//! let mut game = Game::new(GameConfig::default()).unwrap();
//! game.set_key(Key::ArrowRight, true);
//! game.run_ticks(120).unwrap();
//!
//! assert_eq!(game.snapshot().players.len(), 1);
//! assert!(game.world().resources().spawn_count >= 2);
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod factory;
pub mod game;
pub mod logging;
pub mod replay;
pub mod systems;
pub mod tick;

/// Re-export the ECS crate for convenience.
pub use onslaught_ecs;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common engine usage.
pub mod prelude {
    pub use onslaught_ecs::prelude::*;

    pub use crate::config::{
        CombatConfig, ConfigError, EnemyConfig, GameConfig, PlayerConfig, ProjectileConfig,
        SpawnConfig, StageConfig, TimingConfig, DEFAULT_SEED,
    };
    pub use crate::error::EngineError;
    pub use crate::game::Game;
    pub use crate::logging::init_tracing;
    pub use crate::replay::{
        replay, ReplayDivergence, ReplayEntry, ReplayLog, ReplayRecorder, ReplayResult,
    };
    pub use crate::systems::{add_weapon_timer, spawn_interval};
    pub use crate::tick::FrameClock;
}
