use onslaught_ecs::prelude::*;

use super::INPUT_PRIORITY;

/// Copies the host's key state into player `Input` components and steers
/// the player's velocity from it.
#[derive(Debug, Default)]
pub struct InputSystem;

impl InputSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for InputSystem {
    fn id(&self) -> SystemId {
        SystemId::INPUT
    }

    fn name(&self) -> &'static str {
        "input"
    }

    fn required(&self) -> ComponentMask {
        ComponentMask::INPUT | ComponentMask::VELOCITY | ComponentMask::TAG
    }

    fn priority(&self) -> i32 {
        INPUT_PRIORITY
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entities: &[EntityId], _dt: f32) {
        let (up, down, left, right) = ctx.resources.key_bindings.read(&ctx.resources.input);
        for &id in entities {
            if ctx.components.tags.get(id) != Some(&Tag::Player) {
                continue;
            }
            let Some(input) = ctx.components.inputs.get_mut(id) else {
                continue;
            };
            *input = Input {
                up,
                down,
                left,
                right,
            };
            let (dx, dy) = input.direction();
            if let Some(velocity) = ctx.components.velocities.get_mut(id) {
                velocity.set_direction(dx, dy);
            }
        }
    }
}
