//! Property tests for the entity pool and component storage.
//!
//! Random sequences of acquire/release/insert/remove operations must keep
//! the pool's bookkeeping and the store's presence masks consistent.

use std::collections::BTreeSet;

use onslaught_ecs::prelude::*;
use proptest::prelude::*;

/// Operations we can perform on a pool plus store.
#[derive(Debug, Clone)]
enum PoolOp {
    Acquire,
    AcquireTagged(u8),
    Release(usize),
    ReleaseStale(usize),
    InsertHealth(usize, f32),
    RemoveHealth(usize),
}

fn tag_of(n: u8) -> Tag {
    match n % 4 {
        0 => Tag::Player,
        1 => Tag::Enemy,
        2 => Tag::Projectile,
        _ => Tag::Spawner,
    }
}

fn pool_op_strategy() -> impl Strategy<Value = PoolOp> {
    prop_oneof![
        Just(PoolOp::Acquire),
        any::<u8>().prop_map(PoolOp::AcquireTagged),
        (0..64usize).prop_map(PoolOp::Release),
        (0..64usize).prop_map(PoolOp::ReleaseStale),
        (0..64usize, 1.0f32..200.0).prop_map(|(i, max)| PoolOp::InsertHealth(i, max)),
        (0..64usize).prop_map(PoolOp::RemoveHealth),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn random_pool_ops_preserve_invariants(
        max_free in 0..16usize,
        ops in prop::collection::vec(pool_op_strategy(), 1..80),
    ) {
        let mut pool = EntityPool::new(PoolConfig { initial_size: 4, max_free });
        let mut store = ComponentStore::default();
        let mut alive: Vec<EntityId> = Vec::new();
        let mut released: Vec<EntityId> = Vec::new();

        for op in ops {
            match op {
                PoolOp::Acquire => {
                    let id = pool.acquire();
                    prop_assert!(!alive.contains(&id), "{id} handed out twice");
                    prop_assert!(store.mask(id).is_empty(), "recycled {id} kept components");
                    released.retain(|&r| r != id);
                    alive.push(id);
                }
                PoolOp::AcquireTagged(n) => {
                    let id = pool.acquire();
                    prop_assert!(!alive.contains(&id));
                    store.insert(id, tag_of(n));
                    released.retain(|&r| r != id);
                    alive.push(id);
                }
                PoolOp::Release(idx) => {
                    if !alive.is_empty() {
                        let id = alive.remove(idx % alive.len());
                        prop_assert!(pool.release(id, &mut store));
                        released.push(id);
                    }
                }
                PoolOp::ReleaseStale(idx) => {
                    if !released.is_empty() {
                        let id = released[idx % released.len()];
                        prop_assert!(!pool.release(id, &mut store));
                    }
                }
                PoolOp::InsertHealth(idx, max) => {
                    if !alive.is_empty() {
                        let id = alive[idx % alive.len()];
                        store.insert(id, Health::new(max));
                    }
                }
                PoolOp::RemoveHealth(idx) => {
                    if !alive.is_empty() {
                        let id = alive[idx % alive.len()];
                        store.remove::<Health>(id);
                        prop_assert!(!store.has::<Health>(id));
                    }
                }
            }

            // Active set matches our tracking exactly.
            prop_assert_eq!(pool.active_count(), alive.len());
            let expected: BTreeSet<_> = alive.iter().copied().collect();
            let actual: BTreeSet<_> = pool.active().collect();
            prop_assert_eq!(actual, expected);

            // Released ids are inactive and carry nothing.
            for &id in &released {
                prop_assert!(!pool.is_active(id));
                prop_assert!(store.mask(id).is_empty());
            }

            // The free list never exceeds its cap.
            prop_assert!(pool.free_count() <= max_free);

            // Storage only holds components of active entities.
            for (id, _) in store.healths.iter() {
                prop_assert!(pool.is_active(id));
            }
            for (id, _) in store.tags.iter() {
                prop_assert!(pool.is_active(id));
            }
        }
    }

    #[test]
    fn query_returns_exactly_matching_entities(
        layout in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 0..40),
    ) {
        let mut world = World::new(PoolConfig::default(), 0);
        let mut expected = Vec::new();
        for &(has_tag, has_health, has_transform) in &layout {
            let mut bundle = ComponentBundle::new();
            if has_tag {
                bundle.add(Tag::Enemy);
            }
            if has_health {
                bundle.add(Health::new(10.0));
            }
            if has_transform {
                bundle.add(Transform::new(0.0, 0.0, 1.0, 1.0));
            }
            let id = world.spawn(bundle);
            if has_tag && has_health {
                expected.push(id);
            }
        }

        let found = world.query(ComponentMask::TAG | ComponentMask::HEALTH);
        prop_assert_eq!(found, expected);
    }
}
