//! Game configuration.
//!
//! [`GameConfig`] carries every tunable the simulation reads: stage size,
//! per-entity stats, spawn pacing, combat rules, timing, pool sizing and
//! the RNG seed. Every section defaults to the shipped game's values, and
//! missing JSON fields fall back to those defaults, so a config file only
//! needs to list what it changes.
//!
//! ```
//! use onslaught_engine::config::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "spawn": { "max_enemies": 5 }, "seed": 9 }"#).unwrap();
//! assert_eq!(config.spawn.max_enemies, 5);
//! assert_eq!(config.stage.width, 1024.0);
//! ```

use std::path::{Path, PathBuf};

use onslaught_ecs::entity::PoolConfig;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors produced while loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid JSON for [`GameConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its allowed range.
    #[error("invalid config value '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Play-field size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub size: f32,
    pub speed: f32,
    pub health: f32,
    /// Seconds between automatic shots.
    pub attack_rate: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: 32.0,
            speed: 1.0,
            health: 100.0,
            attack_rate: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub size: f32,
    pub speed: f32,
    pub health: f32,
    /// When set, enemies only chase a player within this many pixels.
    pub detection_radius: Option<f32>,
    /// Radians per second of simulated time for patrolling enemies.
    pub patrol_angular_speed: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            size: 32.0,
            speed: 2.0,
            health: 10.0,
            detection_radius: None,
            patrol_angular_speed: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub size: f32,
    pub speed: f32,
    pub damage: f32,
    /// Enemies one projectile may damage.
    pub pierce: u32,
    /// Remove projectiles that reach the edge of the stage.
    pub despawn_at_bounds: bool,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            size: 8.0,
            speed: 8.0,
            damage: 5.0,
            pierce: 1,
            despawn_at_bounds: true,
        }
    }
}

/// Enemy spawn pacing. The interval decays from `base_interval` toward
/// `min_interval` as `base * e^(-t / progression)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub max_enemies: usize,
    pub initial_delay: f32,
    pub base_interval: f32,
    pub min_interval: f32,
    /// Seconds; larger values slow the ramp-up.
    pub progression: f32,
    /// Spawn one enemy as soon as the spawner is created.
    pub spawn_on_start: bool,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_enemies: 20,
            initial_delay: 1.0,
            base_interval: 3.0,
            min_interval: 1.0,
            progression: 30.0,
            spawn_on_start: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Damage per tick of player/enemy overlap.
    pub contact_damage: f32,
    /// Seconds between contact hits on one player. Zero means every tick.
    pub contact_cooldown: f32,
    pub points_per_kill: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            contact_damage: 1.0,
            contact_cooldown: 0.0,
            points_per_kill: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Step used by fixed-rate drivers, in seconds.
    pub fixed_dt: f32,
    /// Upper bound on a single variable step, in seconds.
    pub max_dt: f32,
    pub time_scale: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_dt: 0.1,
            time_scale: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// GameConfig
// ---------------------------------------------------------------------------

pub const DEFAULT_SEED: u64 = 0x5eed;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub stage: StageConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub projectile: ProjectileConfig,
    pub spawn: SpawnConfig,
    pub combat: CombatConfig,
    pub timing: TimingConfig,
    pub pool: PoolConfig,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stage: StageConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            projectile: ProjectileConfig::default(),
            spawn: SpawnConfig::default(),
            combat: CombatConfig::default(),
            timing: TimingConfig::default(),
            pool: PoolConfig::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value the simulation divides by, clamps against, or
    /// otherwise relies on being sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("stage.width", self.stage.width)?;
        positive("stage.height", self.stage.height)?;

        positive("player.size", self.player.size)?;
        positive("player.speed", self.player.speed)?;
        positive("player.health", self.player.health)?;
        positive("player.attack_rate", self.player.attack_rate)?;
        fits("player.size", self.player.size, &self.stage)?;

        positive("enemy.size", self.enemy.size)?;
        positive("enemy.speed", self.enemy.speed)?;
        positive("enemy.health", self.enemy.health)?;
        fits("enemy.size", self.enemy.size, &self.stage)?;
        if let Some(radius) = self.enemy.detection_radius {
            positive("enemy.detection_radius", radius)?;
        }
        finite("enemy.patrol_angular_speed", self.enemy.patrol_angular_speed)?;

        positive("projectile.size", self.projectile.size)?;
        positive("projectile.speed", self.projectile.speed)?;
        positive("projectile.damage", self.projectile.damage)?;
        fits("projectile.size", self.projectile.size, &self.stage)?;
        if self.projectile.pierce == 0 {
            return Err(invalid("projectile.pierce", "must be at least 1"));
        }

        positive("spawn.initial_delay", self.spawn.initial_delay)?;
        positive("spawn.base_interval", self.spawn.base_interval)?;
        positive("spawn.min_interval", self.spawn.min_interval)?;
        positive("spawn.progression", self.spawn.progression)?;
        if self.spawn.min_interval > self.spawn.base_interval {
            return Err(invalid(
                "spawn.min_interval",
                format!(
                    "floor {} is above the base interval {}",
                    self.spawn.min_interval, self.spawn.base_interval
                ),
            ));
        }

        non_negative("combat.contact_damage", self.combat.contact_damage)?;
        non_negative("combat.contact_cooldown", self.combat.contact_cooldown)?;

        positive("timing.fixed_dt", self.timing.fixed_dt)?;
        positive("timing.max_dt", self.timing.max_dt)?;
        positive("timing.time_scale", self.timing.time_scale)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite, got {value}")))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must not be negative, got {value}")))
    }
}

fn fits(field: &'static str, size: f32, stage: &StageConfig) -> Result<(), ConfigError> {
    if size <= stage.width && size <= stage.height {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!("{size} does not fit a {}x{} stage", stage.width, stage.height),
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.stage.width, 1024.0);
        assert_eq!(config.stage.height, 768.0);
        assert_eq!(config.player.health, 100.0);
        assert_eq!(config.enemy.speed, 2.0);
        assert_eq!(config.projectile.damage, 5.0);
        assert_eq!(config.spawn.max_enemies, 20);
        assert_eq!(config.pool.initial_size, 50);
        assert_eq!(config.pool.max_free, 1000);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = GameConfig::from_json_str(r#"{ "enemy": { "health": 25 } }"#).unwrap();
        assert_eq!(config.enemy.health, 25.0);
        assert_eq!(config.enemy.size, 32.0);
        assert_eq!(config.timing, TimingConfig::default());
    }

    #[test]
    fn floor_above_base_is_rejected() {
        let err = GameConfig::from_json_str(
            r#"{ "spawn": { "base_interval": 1.0, "min_interval": 2.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "spawn.min_interval",
                ..
            }
        ));
    }

    #[test]
    fn non_positive_values_are_rejected() {
        let mut config = GameConfig::default();
        config.timing.max_dt = 0.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.player.speed = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.projectile.pierce = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            GameConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed": 1234, "stage": {{ "width": 640 }} }}"#).unwrap();
        let config = GameConfig::from_path(file.path()).unwrap();
        assert_eq!(config.seed, 1234);
        assert_eq!(config.stage.width, 640.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn json_round_trip() {
        let mut config = GameConfig::default();
        config.enemy.detection_radius = Some(300.0);
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json_str(&json).unwrap(), config);
    }
}
