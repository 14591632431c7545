//! Headless driver -- runs the simulation with no input and no renderer.
//!
//! Run with:
//!   cargo run --bin onslaught-headless -- [config.json] [ticks]
//!
//! Logs the score, the number of live enemies and the final state hash.
//! `RUST_LOG` overrides the default `info` filter.

use anyhow::Context;
use onslaught_engine::prelude::*;
use tracing::info;

const DEFAULT_TICKS: u64 = 3600;

fn main() -> anyhow::Result<()> {
    init_tracing("info")?;

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::from_path(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => GameConfig::default(),
    };
    let ticks = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("tick count '{raw}' is not a number"))?,
        None => DEFAULT_TICKS,
    };

    let mut game = Game::new(config)?;
    let ran = game.run_ticks(ticks)?;
    let diagnostics = game.world().last_diagnostics();

    info!(
        requested = ticks,
        ran,
        score = game.score(),
        high_score = game.high_score(),
        enemies = game.enemy_count(),
        spawned = game.world().resources().spawn_count,
        game_over = game.game_state().is_some_and(|s| s.is_game_over),
        last_tick_us = diagnostics.total_time.as_micros() as u64,
        "run finished"
    );
    info!(hash = %game.state_hash()?, "final state");
    Ok(())
}
