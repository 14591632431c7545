//! The host-facing facade.
//!
//! [`Game`] wires a [`World`] to the ten gameplay systems, validates the
//! configuration up front, and exposes the lifecycle, stepping, input and
//! state calls a host loop needs.

use onslaught_ecs::prelude::*;
use tracing::info;

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::systems;
use crate::tick::FrameClock;

pub struct Game {
    world: World,
    config: GameConfig,
    clock: FrameClock,
}

impl Game {
    /// Build and initialize a game.
    ///
    /// Fails if the configuration is invalid or initialization does not
    /// leave a game-state singleton behind.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut world = World::new(config.pool, config.seed);
        for system in systems::default_systems(&config) {
            world.add_system(system);
        }
        world.initialize()?;
        world.require_game_state()?;
        info!(
            seed = config.seed,
            width = config.stage.width,
            height = config.stage.height,
            "game created"
        );
        Ok(Self {
            clock: FrameClock::new(&config.timing),
            world,
            config,
        })
    }

    // -- lifecycle ----------------------------------------------------------

    /// Re-run system setup, creating whatever is missing.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        self.world.initialize()?;
        self.world.require_game_state()?;
        Ok(())
    }

    /// Remove everything the systems own. The game is inert until
    /// [`initialize`](Self::initialize) or [`reset`](Self::reset).
    pub fn cleanup(&mut self) {
        self.world.cleanup();
    }

    /// Start a fresh run with the same configuration and seed.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.world.reset()?;
        self.world.require_game_state()?;
        Ok(())
    }

    // -- stepping -----------------------------------------------------------

    /// Advance by exactly `dt` simulated seconds.
    pub fn tick(&mut self, dt: f32) -> Result<TickReport, EngineError> {
        Ok(self.world.tick(dt)?)
    }

    /// Advance by a raw host delta, capped and scaled by the frame clock.
    pub fn advance(&mut self, raw_dt: f32) -> Result<TickReport, EngineError> {
        let dt = self.clock.step(raw_dt);
        self.tick(dt)
    }

    /// Run `n` fixed steps. Returns how many actually ran (paused ticks do
    /// not count).
    pub fn run_ticks(&mut self, n: u64) -> Result<u64, EngineError> {
        let dt = self.clock.fixed_step();
        let mut ran = 0;
        for _ in 0..n {
            if self.tick(dt)?.ran {
                ran += 1;
            }
        }
        Ok(ran)
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    // -- input --------------------------------------------------------------

    pub fn set_key(&mut self, key: Key, down: bool) {
        self.world.resources_mut().input.set(key, down);
    }

    /// Replace the key state with whatever `source` reports.
    pub fn apply_keys(&mut self, source: &impl KeySource) {
        self.world.resources_mut().input.copy_from(source);
    }

    pub fn release_keys(&mut self) {
        self.world.resources_mut().input.release_all();
    }

    // -- outputs ------------------------------------------------------------

    /// Drawable state as of the last unpaused tick.
    pub fn snapshot(&self) -> &RenderSnapshot {
        self.world.snapshot()
    }

    pub fn events(&self) -> &[GameEvent] {
        self.world.events()
    }

    pub fn score(&self) -> u64 {
        self.world.resources().score.score()
    }

    pub fn high_score(&self) -> u64 {
        self.world.resources().score.high_score()
    }

    pub fn player(&self) -> Option<EntityId> {
        self.world.first_with_tag(Tag::Player)
    }

    pub fn enemy_count(&self) -> usize {
        self.world.count_with_tag(Tag::Enemy)
    }

    pub fn state_hash(&self) -> Result<String, EngineError> {
        Ok(self.world.state_hash()?)
    }

    // -- game state ---------------------------------------------------------

    pub fn game_state(&self) -> Option<&GameState> {
        self.world.game_state()
    }

    pub fn is_paused(&self) -> bool {
        self.world.is_paused()
    }

    fn state_mut(&mut self) -> Result<&mut GameState, EngineError> {
        self.world
            .game_state_mut()
            .ok_or(EngineError::Ecs(EcsError::MissingSingleton {
                component: "game_state",
            }))
    }

    pub fn set_paused(&mut self, paused: bool) -> Result<(), EngineError> {
        self.state_mut()?.set_paused(paused);
        info!(paused, "pause toggled");
        Ok(())
    }

    pub fn set_game_over(&mut self, game_over: bool) -> Result<(), EngineError> {
        self.state_mut()?.set_game_over(game_over);
        info!(game_over, "game over toggled");
        Ok(())
    }

    pub fn set_show_level_up(&mut self, show: bool) -> Result<(), EngineError> {
        self.state_mut()?.set_show_level_up(show);
        info!(show, "level-up screen toggled");
        Ok(())
    }

    /// Bump the level and show the level-up screen. Returns the new level.
    pub fn level_up(&mut self) -> Result<u32, EngineError> {
        let state = self.state_mut()?;
        state.level_up();
        let level = state.current_level;
        info!(level, "level up");
        Ok(level)
    }

    // -- access -------------------------------------------------------------

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn new_game_has_the_standing_cast() {
        let game = Game::new(GameConfig::default()).unwrap();
        let world = game.world();
        assert_eq!(world.system_count(), 10);
        assert_eq!(world.count_with_tag(Tag::Player), 1);
        assert_eq!(world.count_with_tag(Tag::Spawner), 1);
        assert_eq!(game.enemy_count(), 1);
        assert!(world.game_state().is_some());
        let player = game.player().unwrap();
        assert!(world.has::<Timer>(player));
    }

    #[test]
    fn systems_run_in_priority_order() {
        let game = Game::new(GameConfig::default()).unwrap();
        assert_eq!(
            game.world().system_names(),
            vec![
                "game_state",
                "score",
                "player",
                "input",
                "movement",
                "ai",
                "spawn",
                "projectile",
                "collision",
                "render"
            ]
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.player.speed = 0.0;
        assert!(matches!(
            Game::new(config),
            Err(EngineError::Config(ConfigError::Invalid { .. }))
        ));
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        let before = game.world().entity_count();
        game.initialize().unwrap();
        assert_eq!(game.world().entity_count(), before);
    }

    #[test]
    fn cleanup_then_initialize_restores_entities() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        game.cleanup();
        assert!(game.player().is_none());
        assert!(game.world().game_state().is_none());
        assert!(game.set_paused(true).is_err());
        game.initialize().unwrap();
        assert!(game.player().is_some());
    }

    #[test]
    fn advance_caps_long_frames() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        game.advance(3.0).unwrap();
        assert!((game.world().resources().clock.elapsed - 0.1).abs() < 1e-6);
    }

    #[test]
    fn paused_game_does_not_tick() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        game.set_paused(true).unwrap();
        assert_eq!(game.run_ticks(5).unwrap(), 0);
        assert_eq!(game.world().tick_count(), 0);
        game.set_paused(false).unwrap();
        assert_eq!(game.run_ticks(5).unwrap(), 5);
    }

    #[test]
    fn level_up_pauses_until_hidden() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        assert_eq!(game.level_up().unwrap(), 2);
        assert!(game.is_paused());
        game.set_show_level_up(false).unwrap();
        assert!(!game.is_paused());
    }

    #[test]
    fn keys_steer_the_player() {
        let mut config = GameConfig::default();
        config.spawn.spawn_on_start = false;
        let mut game = Game::new(config).unwrap();
        let player = game.player().unwrap();
        let x0 = game.world().get::<Transform>(player).unwrap().x;
        game.set_key(Key::D, true);
        game.run_ticks(10).unwrap();
        let x1 = game.world().get::<Transform>(player).unwrap().x;
        assert!((x1 - x0 - 10.0).abs() < 1e-3);

        game.release_keys();
        game.run_ticks(1).unwrap();
        let v = game.world().get::<Velocity>(player).unwrap();
        assert_eq!(v.direction(), (0.0, 0.0));
    }
}
