//! The [`World`]: entities, components, systems, and the tick.
//!
//! A tick runs every system in ascending priority order. Each system sees
//! the entities that matched its requirements when its turn came, and may
//! queue spawns and despawns on the command buffer. Once the last system
//! returns, the buffer is applied in FIFO order. While the game-state
//! singleton reports paused, `tick` does nothing at all.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::command::{ApplyReport, CommandBuffer};
use crate::component::{Component, ComponentBundle, ComponentMask};
use crate::components::{GameState, Tag};
use crate::entity::{EntityId, EntityPool, PoolConfig};
use crate::render::RenderSnapshot;
use crate::resource::{GameEvent, Resources};
use crate::storage::ComponentStore;
use crate::system::{System, SystemContext};
use crate::EcsError;

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Timing of the last unpaused tick.
#[derive(Debug, Clone, Default)]
pub struct TickDiagnostics {
    /// Wall-clock time per system, in execution order.
    pub system_times: Vec<(&'static str, Duration)>,
    pub command_apply_time: Duration,
    /// Systems plus command application.
    pub total_time: Duration,
    pub apply_report: ApplyReport,
}

/// What a call to [`World::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// `false` when the tick was skipped because the game is paused.
    pub ran: bool,
    /// Tick counter after this call.
    pub tick: u64,
    pub apply: ApplyReport,
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

struct ScheduledSystem {
    priority: i32,
    system: Box<dyn System>,
}

/// Owner of every entity, component, and system.
pub struct World {
    pool: EntityPool,
    store: ComponentStore,
    /// Sorted by priority; stable, so equal priorities keep insertion order.
    systems: Vec<ScheduledSystem>,
    commands: CommandBuffer,
    resources: Resources,
    /// Reused entity list handed to each system.
    query_buf: Vec<EntityId>,
    diagnostics: TickDiagnostics,
}

impl World {
    pub fn new(pool: PoolConfig, seed: u64) -> Self {
        Self {
            pool: EntityPool::new(pool),
            store: ComponentStore::default(),
            systems: Vec::new(),
            commands: CommandBuffer::new(),
            resources: Resources::new(seed),
            query_buf: Vec::new(),
            diagnostics: TickDiagnostics::default(),
        }
    }

    // -- systems ------------------------------------------------------------

    /// Schedule a system at its own declared priority.
    pub fn add_system(&mut self, system: Box<dyn System>) {
        let priority = system.priority();
        self.add_system_with_priority(system, priority);
    }

    /// Schedule a system at an explicit priority.
    pub fn add_system_with_priority(&mut self, system: Box<dyn System>, priority: i32) {
        debug!(system = system.name(), priority, "system added");
        self.systems.push(ScheduledSystem { priority, system });
        self.systems.sort_by_key(|s| s.priority);
    }

    /// System names in execution order.
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.system.name()).collect()
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    // -- lifecycle ----------------------------------------------------------

    /// Run every system's `initialize` in priority order.
    ///
    /// Systems are detached from the world while they initialize so each one
    /// can freely create entities. Stops at the first failure.
    pub fn initialize(&mut self) -> Result<(), EcsError> {
        let mut systems = std::mem::take(&mut self.systems);
        let result = systems
            .iter_mut()
            .try_for_each(|s| s.system.initialize(self));
        self.reattach(systems);
        result?;
        info!(
            systems = self.systems.len(),
            entities = self.pool.active_count(),
            "world initialized"
        );
        Ok(())
    }

    /// Run every system's `cleanup` in priority order.
    pub fn cleanup(&mut self) {
        let mut systems = std::mem::take(&mut self.systems);
        for s in &mut systems {
            s.system.cleanup(self);
        }
        self.reattach(systems);
    }

    /// Put detached systems back, keeping any added in the meantime.
    fn reattach(&mut self, mut systems: Vec<ScheduledSystem>) {
        systems.append(&mut self.systems);
        systems.sort_by_key(|s| s.priority);
        self.systems = systems;
    }

    /// Clean up, drop every entity, rewind resources, and initialize again.
    ///
    /// The high score and the RNG seed survive.
    pub fn reset(&mut self) -> Result<(), EcsError> {
        self.cleanup();
        self.commands.clear();
        self.store.clear();
        self.pool.reset();
        self.resources.reset();
        self.diagnostics = TickDiagnostics::default();
        info!("world reset");
        self.initialize()
    }

    // -- tick ---------------------------------------------------------------

    /// Advance the simulation by `dt` seconds.
    ///
    /// Returns a skipped report while paused. Fails only for a negative or
    /// non-finite `dt`, in which case nothing runs.
    pub fn tick(&mut self, dt: f32) -> Result<TickReport, EcsError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(EcsError::InvalidDeltaTime { dt });
        }
        if self.is_paused() {
            return Ok(TickReport {
                ran: false,
                tick: self.resources.clock.tick,
                apply: ApplyReport::default(),
            });
        }

        let tick_start = Instant::now();
        self.resources.events.clear();
        self.resources.clock.advance(dt);
        self.diagnostics.system_times.clear();

        let Self {
            pool,
            store,
            systems,
            commands,
            resources,
            query_buf,
            diagnostics,
        } = self;

        for scheduled in systems.iter_mut() {
            let start = Instant::now();
            pool.query_into(store, scheduled.system.required(), query_buf);
            let mut ctx = SystemContext {
                components: &mut *store,
                pool: &*pool,
                commands: &mut *commands,
                resources: &mut *resources,
            };
            scheduled.system.update(&mut ctx, query_buf, dt);
            diagnostics
                .system_times
                .push((scheduled.system.name(), start.elapsed()));
        }

        let apply_start = Instant::now();
        let apply = commands.apply(pool, store);
        diagnostics.command_apply_time = apply_start.elapsed();
        diagnostics.apply_report = apply;
        diagnostics.total_time = tick_start.elapsed();

        Ok(TickReport {
            ran: true,
            tick: resources.clock.tick,
            apply,
        })
    }

    /// Apply an externally built command buffer immediately.
    pub fn apply_commands(&mut self, commands: &mut CommandBuffer) -> ApplyReport {
        commands.apply(&mut self.pool, &mut self.store)
    }

    // -- entities -----------------------------------------------------------

    /// Create an empty entity immediately.
    pub fn create_entity(&mut self) -> EntityId {
        self.pool.acquire()
    }

    /// Create an entity carrying `bundle` immediately.
    pub fn spawn(&mut self, bundle: ComponentBundle) -> EntityId {
        let id = self.pool.acquire();
        self.store.insert_bundle(id, bundle);
        id
    }

    /// Destroy `id` and all of its components. Returns `false` (and logs)
    /// for an inactive id.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        self.pool.release(id, &mut self.store)
    }

    pub fn is_active(&self, id: EntityId) -> bool {
        self.pool.is_active(id)
    }

    pub fn entity_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    pub fn components(&self) -> &ComponentStore {
        &self.store
    }

    /// Active entities carrying every kind in `required`, ascending.
    pub fn query(&self, required: ComponentMask) -> Vec<EntityId> {
        self.pool.query(&self.store, required)
    }

    pub fn first_with_tag(&self, tag: Tag) -> Option<EntityId> {
        self.store.first_with_tag(tag)
    }

    pub fn count_with_tag(&self, tag: Tag) -> usize {
        self.store.count_with_tag(tag)
    }

    // -- components ---------------------------------------------------------

    /// Attach a component to an active entity. Returns the previous value.
    pub fn insert<C: Component>(&mut self, id: EntityId, component: C) -> Result<Option<C>, EcsError> {
        if !self.pool.is_active(id) {
            warn!(entity = %id, component = %C::KIND, "insert on inactive entity");
            return Err(EcsError::InactiveEntity { entity: id });
        }
        Ok(self.store.insert(id, component))
    }

    pub fn get<C: Component>(&self, id: EntityId) -> Option<&C> {
        self.store.get(id)
    }

    pub fn get_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        self.store.get_mut(id)
    }

    pub fn has<C: Component>(&self, id: EntityId) -> bool {
        self.store.has::<C>(id)
    }

    pub fn remove_component<C: Component>(&mut self, id: EntityId) -> Option<C> {
        self.store.remove(id)
    }

    // -- game state ---------------------------------------------------------

    /// The entity holding the [`GameState`] singleton.
    pub fn game_state_entity(&self) -> Option<EntityId> {
        self.store.game_states.iter().map(|(id, _)| id).min()
    }

    pub fn game_state(&self) -> Option<&GameState> {
        self.game_state_entity()
            .and_then(|id| self.store.game_states.get(id))
    }

    pub fn game_state_mut(&mut self) -> Option<&mut GameState> {
        let id = self.game_state_entity()?;
        self.store.game_states.get_mut(id)
    }

    /// The singleton's entity, or an error if initialization never
    /// created it.
    pub fn require_game_state(&self) -> Result<EntityId, EcsError> {
        self.game_state_entity()
            .ok_or(EcsError::MissingSingleton { component: "game_state" })
    }

    /// Paused per the singleton. A world without one is never paused.
    pub fn is_paused(&self) -> bool {
        self.game_state().is_some_and(|gs| gs.is_paused)
    }

    // -- resources ----------------------------------------------------------

    /// Render snapshot of the last unpaused tick.
    pub fn snapshot(&self) -> &RenderSnapshot {
        &self.resources.render
    }

    /// Events of the last unpaused tick.
    pub fn events(&self) -> &[GameEvent] {
        &self.resources.events
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    pub fn tick_count(&self) -> u64 {
        self.resources.clock.tick
    }

    pub fn last_diagnostics(&self) -> &TickDiagnostics {
        &self.diagnostics
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(PoolConfig::default(), 0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CausalReason;
    use crate::components::{Health, Transform};
    use crate::system::SystemId;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records every call it receives into a shared log.
    struct Probe {
        name: &'static str,
        priority: i32,
        required: ComponentMask,
        log: Log,
        spawn_each_tick: bool,
    }

    impl Probe {
        fn boxed(name: &'static str, priority: i32, log: &Log) -> Box<Self> {
            Box::new(Self {
                name,
                priority,
                required: ComponentMask::empty(),
                log: Rc::clone(log),
                spawn_each_tick: false,
            })
        }
    }

    impl System for Probe {
        fn id(&self) -> SystemId {
            SystemId::ENGINE
        }

        fn name(&self) -> &'static str {
            self.name
        }

        fn required(&self) -> ComponentMask {
            self.required
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn initialize(&mut self, _world: &mut World) -> Result<(), EcsError> {
            self.log.borrow_mut().push(format!("init:{}", self.name));
            Ok(())
        }

        fn update(&mut self, ctx: &mut SystemContext<'_>, entities: &[EntityId], _dt: f32) {
            self.log
                .borrow_mut()
                .push(format!("{}:{}", self.name, entities.len()));
            if self.spawn_each_tick {
                ctx.commands.spawn(
                    ComponentBundle::new().with(Tag::Enemy),
                    SystemId::ENGINE,
                    CausalReason::SystemInternal("probe"),
                );
            }
        }

        fn cleanup(&mut self, _world: &mut World) {
            self.log.borrow_mut().push(format!("cleanup:{}", self.name));
        }
    }

    fn world() -> World {
        World::new(
            PoolConfig {
                initial_size: 0,
                max_free: 100,
            },
            1,
        )
    }

    #[test]
    fn systems_run_in_priority_order_with_stable_ties() {
        let log = Log::default();
        let mut w = world();
        w.add_system(Probe::boxed("late", 10, &log));
        w.add_system(Probe::boxed("tie_a", 0, &log));
        w.add_system(Probe::boxed("early", -5, &log));
        w.add_system(Probe::boxed("tie_b", 0, &log));
        assert_eq!(w.system_names(), vec!["early", "tie_a", "tie_b", "late"]);

        w.tick(0.016).unwrap();
        let names: Vec<_> = log
            .borrow()
            .iter()
            .map(|s| s.split(':').next().unwrap_or_default().to_owned())
            .collect();
        assert_eq!(names, vec!["early", "tie_a", "tie_b", "late"]);
    }

    #[test]
    fn explicit_priority_overrides_declared() {
        let log = Log::default();
        let mut w = world();
        w.add_system(Probe::boxed("a", 0, &log));
        w.add_system_with_priority(Probe::boxed("b", 0, &log), -1);
        assert_eq!(w.system_names(), vec!["b", "a"]);
    }

    #[test]
    fn spawns_are_invisible_until_the_next_tick() {
        let log = Log::default();
        let mut w = world();
        let mut spawner = Probe::boxed("spawner", 0, &log);
        spawner.spawn_each_tick = true;
        w.add_system(spawner);
        w.add_system(Probe::boxed("observer", 1, &log));

        let report = w.tick(0.016).unwrap();
        assert_eq!(report.apply.spawned, 1);
        w.tick(0.016).unwrap();

        let log = log.borrow();
        assert_eq!(log[0], "spawner:0");
        assert_eq!(log[1], "observer:0");
        assert_eq!(log[2], "spawner:1");
        assert_eq!(log[3], "observer:1");
    }

    #[test]
    fn systems_receive_only_matching_entities() {
        let log = Log::default();
        let mut w = world();
        let mut probe = Probe::boxed("health_only", 0, &log);
        probe.required = ComponentMask::HEALTH;
        w.add_system(probe);

        w.spawn(ComponentBundle::new().with(Health::new(5.0)));
        w.spawn(ComponentBundle::new().with(Transform::new(0.0, 0.0, 1.0, 1.0)));
        w.tick(0.016).unwrap();
        assert_eq!(log.borrow()[0], "health_only:1");
    }

    #[test]
    fn paused_world_skips_everything() {
        let log = Log::default();
        let mut w = world();
        w.add_system(Probe::boxed("any", 0, &log));
        w.spawn(ComponentBundle::new().with(GameState::default()));
        if let Some(gs) = w.game_state_mut() {
            gs.set_paused(true);
        }

        let report = w.tick(0.016).unwrap();
        assert!(!report.ran);
        assert_eq!(w.tick_count(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn invalid_delta_is_rejected() {
        let mut w = world();
        assert!(matches!(
            w.tick(f32::NAN),
            Err(EcsError::InvalidDeltaTime { .. })
        ));
        assert!(w.tick(-0.1).is_err());
        assert!(w.tick(0.0).is_ok());
    }

    #[test]
    fn lifecycle_calls_every_system() {
        let log = Log::default();
        let mut w = world();
        w.add_system(Probe::boxed("a", 1, &log));
        w.add_system(Probe::boxed("b", 0, &log));
        w.initialize().unwrap();
        w.cleanup();
        assert_eq!(
            *log.borrow(),
            vec!["init:b", "init:a", "cleanup:b", "cleanup:a"]
        );
        assert_eq!(w.system_count(), 2);
    }

    #[test]
    fn reset_clears_entities_and_restarts_ids() {
        let mut w = world();
        w.spawn(ComponentBundle::new().with(Tag::Enemy));
        w.spawn(ComponentBundle::new().with(Tag::Enemy));
        w.tick(0.5).unwrap();
        w.reset().unwrap();
        assert_eq!(w.entity_count(), 0);
        assert_eq!(w.tick_count(), 0);
        assert_eq!(w.create_entity().to_raw(), 1);
    }

    #[test]
    fn insert_on_inactive_entity_fails() {
        let mut w = world();
        let id = w.create_entity();
        assert!(w.remove_entity(id));
        assert!(!w.remove_entity(id));
        assert!(w.insert(id, Tag::Player).is_err());
    }

    #[test]
    fn missing_singleton_is_reported() {
        let mut w = world();
        assert!(matches!(
            w.require_game_state(),
            Err(EcsError::MissingSingleton { .. })
        ));
        let gs = w.spawn(ComponentBundle::new().with(GameState::default()));
        assert_eq!(w.require_game_state().unwrap(), gs);
    }
}
