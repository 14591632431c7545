use onslaught_ecs::prelude::*;

use super::RENDER_PRIORITY;

/// Rebuilds the render snapshot in place every tick.
///
/// Visible entities are ordered by `(z_index, id)` and then routed into
/// their bucket, so each bucket is in paint order. The sort buffer and the
/// snapshot buckets keep their capacity between ticks.
#[derive(Debug, Default)]
pub struct RenderSystem {
    order: Vec<(i32, EntityId)>,
}

impl RenderSystem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for RenderSystem {
    fn id(&self) -> SystemId {
        SystemId::RENDER
    }

    fn name(&self) -> &'static str {
        "render"
    }

    fn required(&self) -> ComponentMask {
        ComponentMask::TRANSFORM | ComponentMask::RENDER
    }

    fn priority(&self) -> i32 {
        RENDER_PRIORITY
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entities: &[EntityId], _dt: f32) {
        self.order.clear();
        self.order.extend(entities.iter().filter_map(|&id| {
            ctx.components
                .renders
                .get(id)
                .filter(|r| r.visible)
                .map(|r| (r.z_index, id))
        }));
        self.order.sort_unstable();

        let components = &*ctx.components;
        let snapshot = &mut ctx.resources.render;
        snapshot.clear();
        for &(_, id) in &self.order {
            let (Some(t), Some(r)) = (components.transforms.get(id), components.renders.get(id))
            else {
                continue;
            };
            snapshot.push(RenderRecord {
                id,
                x: t.x,
                y: t.y,
                width: t.width,
                height: t.height,
                render_type: r.render_type,
                z_index: r.z_index,
                visible: r.visible,
                color: r.color,
                opacity: r.opacity,
                tag: components.tags.get(id).copied(),
                health: components.healths.get(id).map(|h| HealthSnapshot {
                    current: h.current,
                    max: h.max,
                }),
            });
        }
    }
}
