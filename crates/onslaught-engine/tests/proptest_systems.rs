//! Property tests for spawn pacing and frame-clock stepping.

use onslaught_engine::prelude::*;
use proptest::prelude::*;

fn spawn_config_strategy() -> impl Strategy<Value = SpawnConfig> {
    (0.1f32..10.0, 0.01f32..1.0, 0.5f32..300.0).prop_map(|(base, floor_frac, progression)| {
        SpawnConfig {
            base_interval: base,
            min_interval: base * floor_frac,
            progression,
            ..SpawnConfig::default()
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    /// Successive recomputations never lengthen the interval and never go
    /// below the floor.
    #[test]
    fn spawn_interval_is_non_increasing(
        spawn in spawn_config_strategy(),
        mut times in prop::collection::vec(0.0f64..5_000.0, 2..50),
    ) {
        times.sort_by(f64::total_cmp);
        let mut previous = f32::INFINITY;
        for t in times {
            let interval = spawn_interval(&spawn, t);
            prop_assert!(interval <= previous);
            prop_assert!(interval >= spawn.min_interval);
            prop_assert!(interval <= spawn.base_interval);
            previous = interval;
        }
    }

    /// Whatever the host reports, the step is finite, non-negative and
    /// bounded by `max_dt * time_scale`.
    #[test]
    fn frame_clock_steps_are_bounded(
        raw in prop_oneof![
            any::<f32>(),
            -1.0f32..1.0,
            Just(f32::NAN),
            Just(f32::INFINITY),
        ],
        max_dt in 0.001f32..1.0,
        time_scale in 0.0f32..4.0,
    ) {
        let clock = FrameClock::new(&TimingConfig {
            fixed_dt: 1.0 / 60.0,
            max_dt,
            time_scale,
        });
        let dt = clock.step(raw);
        prop_assert!(dt.is_finite());
        prop_assert!(dt >= 0.0);
        prop_assert!(dt <= max_dt * time_scale);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Whatever the seed, ticks never fail and the enemy count never
    /// exceeds the cap.
    #[test]
    fn random_seeds_respect_the_cap(seed in any::<u64>(), cap in 1usize..6) {
        let mut config = GameConfig::default();
        config.seed = seed;
        config.spawn.max_enemies = cap;
        config.spawn.base_interval = 0.2;
        config.spawn.min_interval = 0.1;
        config.spawn.initial_delay = 0.1;
        let mut game = Game::new(config).unwrap();
        for _ in 0..300 {
            game.run_ticks(1).unwrap();
            prop_assert!(game.enemy_count() <= cap);
        }
    }
}
