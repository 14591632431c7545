use onslaught_ecs::prelude::*;

use super::SCORE_PRIORITY;

/// Resets the score at the start of a run.
///
/// Points are awarded where kills happen (the collision system); this
/// system only owns the counter's lifecycle.
#[derive(Debug, Default)]
pub struct ScoreSystem;

impl ScoreSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for ScoreSystem {
    fn id(&self) -> SystemId {
        SystemId::SCORE
    }

    fn name(&self) -> &'static str {
        "score"
    }

    fn required(&self) -> ComponentMask {
        ComponentMask::empty()
    }

    fn priority(&self) -> i32 {
        SCORE_PRIORITY
    }

    fn initialize(&mut self, world: &mut World) -> Result<(), EcsError> {
        world.resources_mut().score.reset();
        Ok(())
    }

    fn update(&mut self, _ctx: &mut SystemContext<'_>, _entities: &[EntityId], _dt: f32) {}
}
