use onslaught_ecs::prelude::*;

use super::MOVEMENT_PRIORITY;
use crate::config::StageConfig;

/// Movement is tuned in pixels per frame at this rate.
pub const REFERENCE_FPS: f32 = 60.0;

/// Integrates velocity and keeps every box inside the stage.
#[derive(Debug)]
pub struct MovementSystem {
    width: f32,
    height: f32,
}

impl MovementSystem {
    pub fn new(stage: &StageConfig) -> Self {
        Self {
            width: stage.width,
            height: stage.height,
        }
    }
}

impl System for MovementSystem {
    fn id(&self) -> SystemId {
        SystemId::MOVEMENT
    }

    fn name(&self) -> &'static str {
        "movement"
    }

    fn required(&self) -> ComponentMask {
        ComponentMask::TRANSFORM | ComponentMask::VELOCITY
    }

    fn priority(&self) -> i32 {
        MOVEMENT_PRIORITY
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entities: &[EntityId], dt: f32) {
        let scale = dt * REFERENCE_FPS;
        for &id in entities {
            let Some(&velocity) = ctx.components.velocities.get(id) else {
                continue;
            };
            let Some(transform) = ctx.components.transforms.get_mut(id) else {
                continue;
            };
            transform.x += velocity.velocity_x * velocity.speed * scale;
            transform.y += velocity.velocity_y * velocity.speed * scale;
            // Boxes larger than the stage pin to the origin.
            transform.x = transform.x.min(self.width - transform.width).max(0.0);
            transform.y = transform.y.min(self.height - transform.height).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with(system: MovementSystem) -> World {
        let mut world = World::default();
        world.add_system(Box::new(system));
        world
    }

    #[test]
    fn moves_by_speed_per_reference_frame() {
        let mut world = world_with(MovementSystem::new(&StageConfig::default()));
        let mut velocity = Velocity::new(2.0);
        velocity.set_direction(1.0, 0.0);
        let id = world.spawn(
            ComponentBundle::new()
                .with(Transform::new(100.0, 100.0, 10.0, 10.0))
                .with(velocity),
        );
        world.tick(1.0 / 60.0).unwrap();
        let t = world.get::<Transform>(id).unwrap();
        assert!((t.x - 102.0).abs() < 1e-4);
        assert_eq!(t.y, 100.0);
    }

    #[test]
    fn clamps_each_axis_independently() {
        let mut world = world_with(MovementSystem::new(&StageConfig::default()));
        let mut velocity = Velocity::new(100.0);
        velocity.set_direction(1.0, -1.0);
        let id = world.spawn(
            ComponentBundle::new()
                .with(Transform::new(1000.0, 5.0, 32.0, 32.0))
                .with(velocity),
        );
        world.tick(0.1).unwrap();
        let t = world.get::<Transform>(id).unwrap();
        assert_eq!(t.x, 1024.0 - 32.0);
        assert_eq!(t.y, 0.0);
    }

    #[test]
    fn offstage_spawn_is_pulled_inside() {
        let mut world = world_with(MovementSystem::new(&StageConfig::default()));
        let id = world.spawn(
            ComponentBundle::new()
                .with(Transform::new(-32.0, 900.0, 32.0, 32.0))
                .with(Velocity::new(1.0)),
        );
        world.tick(0.0).unwrap();
        let t = world.get::<Transform>(id).unwrap();
        assert_eq!((t.x, t.y), (0.0, 768.0 - 32.0));
    }
}
