use onslaught_ecs::prelude::*;
use rand::Rng;
use tracing::{debug, info};

use super::SPAWN_PRIORITY;
use crate::config::{GameConfig, SpawnConfig};
use crate::factory;

/// Seconds between spawns after `elapsed` seconds of play.
///
/// Decays exponentially from `base_interval` toward `min_interval`, so
/// the result never increases as `elapsed` grows and never drops below the
/// floor.
pub fn spawn_interval(spawn: &SpawnConfig, elapsed: f64) -> f32 {
    let decay = (-elapsed / f64::from(spawn.progression)).exp();
    let interval = (f64::from(spawn.base_interval) * decay) as f32;
    interval.max(spawn.min_interval)
}

/// Pick a point just outside one of the four stage edges.
fn edge_position(rng: &mut impl Rng, config: &GameConfig) -> (f32, f32) {
    let size = config.enemy.size;
    let width = config.stage.width;
    let height = config.stage.height;
    let span_x = (width - size).max(0.0);
    let span_y = (height - size).max(0.0);
    match rng.gen_range(0..4u8) {
        0 => (rng.gen::<f32>() * span_x, -size),
        1 => (width, rng.gen::<f32>() * span_y),
        2 => (rng.gen::<f32>() * span_x, height),
        _ => (-size, rng.gen::<f32>() * span_y),
    }
}

/// Drives the spawner's timer and creates enemies on the stage edges.
#[derive(Debug)]
pub struct SpawnSystem {
    config: GameConfig,
}

impl SpawnSystem {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl System for SpawnSystem {
    fn id(&self) -> SystemId {
        SystemId::SPAWN
    }

    fn name(&self) -> &'static str {
        "spawn"
    }

    fn required(&self) -> ComponentMask {
        ComponentMask::TAG | ComponentMask::TIMER
    }

    fn priority(&self) -> i32 {
        SPAWN_PRIORITY
    }

    fn initialize(&mut self, world: &mut World) -> Result<(), EcsError> {
        if world.first_with_tag(Tag::Spawner).is_none() {
            let id = world.spawn(factory::spawner_bundle(&self.config));
            info!(entity = %id, "spawner created");
            let below_cap = world.count_with_tag(Tag::Enemy) < self.config.spawn.max_enemies;
            if self.config.spawn.spawn_on_start && below_cap {
                let (x, y) = edge_position(&mut world.resources_mut().rng, &self.config);
                let target = world.first_with_tag(Tag::Player);
                let enemy = world.spawn(factory::enemy_bundle(&self.config, x, y, target));
                world.resources_mut().spawn_count += 1;
                debug!(entity = %enemy, x, y, "initial enemy spawned");
            }
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entities: &[EntityId], dt: f32) {
        let elapsed = ctx.elapsed();
        for &id in entities {
            if ctx.components.tags.get(id) != Some(&Tag::Spawner) {
                continue;
            }
            let Some(timer) = ctx.components.timers.get_mut(id) else {
                continue;
            };
            if !timer.update(dt) {
                continue;
            }
            timer.duration = spawn_interval(&self.config.spawn, elapsed);

            let enemies = ctx.count_with_tag(Tag::Enemy);
            if enemies >= self.config.spawn.max_enemies {
                debug!(enemies, cap = self.config.spawn.max_enemies, "spawn skipped at cap");
                continue;
            }

            let (x, y) = edge_position(&mut ctx.resources.rng, &self.config);
            let target = ctx.first_with_tag(Tag::Player);
            ctx.commands.spawn(
                factory::enemy_bundle(&self.config, x, y, target),
                SystemId::SPAWN,
                CausalReason::Timer("spawn"),
            );
            ctx.resources.spawn_count += 1;
            ctx.resources.emit(GameEvent::EnemySpawned { x, y });
            debug!(x, y, total = ctx.resources.spawn_count, "enemy queued");
        }
    }

    fn cleanup(&mut self, world: &mut World) {
        while let Some(id) = world.first_with_tag(Tag::Spawner) {
            world.remove_entity(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.spawn.spawn_on_start = false;
        config
    }

    #[test]
    fn interval_starts_at_base_and_decays_to_floor() {
        let spawn = SpawnConfig::default();
        assert_eq!(spawn_interval(&spawn, 0.0), spawn.base_interval);
        let later = spawn_interval(&spawn, 30.0);
        assert!((later - 3.0 * (-1.0f32).exp()).abs() < 1e-5);
        assert_eq!(spawn_interval(&spawn, 10_000.0), spawn.min_interval);
    }

    #[test]
    fn edge_positions_sit_outside_the_stage() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let (x, y) = edge_position(&mut rng, &config);
            let size = config.enemy.size;
            let outside = x <= -size
                || x >= config.stage.width
                || y <= -size
                || y >= config.stage.height;
            assert!(outside, "({x}, {y}) is not on an edge");
        }
    }

    #[test]
    fn initialize_is_idempotent() {
        let config = GameConfig::default();
        let mut world = World::default();
        let mut system = SpawnSystem::new(&config);
        system.initialize(&mut world).unwrap();
        system.initialize(&mut world).unwrap();
        assert_eq!(world.count_with_tag(Tag::Spawner), 1);
        assert_eq!(world.count_with_tag(Tag::Enemy), 1);
        assert_eq!(world.resources().spawn_count, 1);
    }

    #[test]
    fn opening_enemy_respects_the_cap() {
        let mut config = GameConfig::default();
        config.spawn.max_enemies = 0;
        let mut world = World::default();
        world.add_system(Box::new(SpawnSystem::new(&config)));
        world.initialize().unwrap();
        assert_eq!(world.count_with_tag(Tag::Spawner), 1);
        assert_eq!(world.count_with_tag(Tag::Enemy), 0);
        assert_eq!(world.resources().spawn_count, 0);

        world.tick(config.spawn.initial_delay).unwrap();
        assert_eq!(world.count_with_tag(Tag::Enemy), 0);
    }

    #[test]
    fn spawns_after_initial_delay() {
        let config = quiet_config();
        let mut world = World::default();
        world.add_system(Box::new(SpawnSystem::new(&config)));
        world.initialize().unwrap();
        assert_eq!(world.count_with_tag(Tag::Enemy), 0);

        world.tick(0.5).unwrap();
        assert_eq!(world.count_with_tag(Tag::Enemy), 0);
        world.tick(0.5).unwrap();
        assert_eq!(world.count_with_tag(Tag::Enemy), 1);
        assert!(matches!(world.events(), [GameEvent::EnemySpawned { .. }]));
    }

    #[test]
    fn cap_blocks_spawns() {
        let mut config = quiet_config();
        config.spawn.max_enemies = 2;
        let mut world = World::default();
        world.add_system(Box::new(SpawnSystem::new(&config)));
        world.initialize().unwrap();
        for i in 0..2 {
            world.spawn(factory::enemy_bundle(&config, i as f32 * 40.0, 0.0, None));
        }
        world.tick(1.0).unwrap();
        assert_eq!(world.count_with_tag(Tag::Enemy), 2);
        assert!(world.events().is_empty());
    }

    #[test]
    fn untagged_timers_are_ignored() {
        let config = quiet_config();
        let mut world = World::default();
        world.add_system(Box::new(SpawnSystem::new(&config)));
        world.spawn(
            ComponentBundle::new()
                .with(Tag::Player)
                .with(Timer::new(0.1, true)),
        );
        world.tick(0.2).unwrap();
        assert_eq!(world.count_with_tag(Tag::Enemy), 0);
    }
}
