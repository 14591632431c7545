//! Input recording and deterministic replay with checkpoint verification.
//!
//! A [`ReplayRecorder`] captures the key state and delta time of every
//! frame, plus a state-hash checkpoint every N frames, into a
//! [`ReplayLog`]. [`replay`] builds a fresh [`Game`] from the log's
//! configuration, feeds the recorded frames back in, and compares hashes at
//! each checkpoint.
//!
//! # Recording
//!
//! ```
//! use onslaught_engine::prelude::*;
//!
//! let mut game = Game::new(GameConfig::default()).unwrap();
//! let mut recorder = ReplayRecorder::new(game.config().clone(), 10);
//!
//! for frame in 0..60 {
//!     game.set_key(Key::D, frame < 30);
//!     let dt = game.clock().fixed_step();
//!     recorder.record_frame(&game, dt).unwrap();
//!     game.tick(dt).unwrap();
//! }
//!
//! let log = recorder.finish();
//! let result = replay(&log).unwrap();
//! assert!(result.completed);
//! assert!(result.first_divergence.is_none());
//! ```

use std::collections::BTreeMap;

use anyhow::{bail, Context};
use onslaught_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::game::Game;

// ---------------------------------------------------------------------------
// ReplayLog
// ---------------------------------------------------------------------------

/// A recorded run: the configuration it started from plus every frame's
/// input. Serializable to JSON for fixtures and bug reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayLog {
    /// Starting configuration, seed included.
    pub config: GameConfig,
    pub total_frames: u64,
    pub entries: Vec<ReplayEntry>,
}

impl ReplayLog {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReplayEntry {
    /// Input held during `frame` and the delta it was ticked with.
    Frame {
        frame: u64,
        dt: f32,
        input: InputState,
    },
    /// State hash taken before `frame` ran.
    Checkpoint { frame: u64, state_hash: String },
}

// ---------------------------------------------------------------------------
// ReplayResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayResult {
    /// Every recorded frame ran and every checkpoint matched.
    pub completed: bool,
    pub frames_replayed: u64,
    pub first_divergence: Option<ReplayDivergence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayDivergence {
    pub frame: u64,
    pub expected_hash: String,
    pub actual_hash: String,
}

// ---------------------------------------------------------------------------
// ReplayRecorder
// ---------------------------------------------------------------------------

/// Builds a [`ReplayLog`] one frame at a time.
///
/// Call [`record_frame`](Self::record_frame) immediately before each
/// [`Game::tick`], with the same delta.
pub struct ReplayRecorder {
    log: ReplayLog,
    /// Checkpoint every this many frames; 0 disables checkpoints.
    checkpoint_interval: u64,
}

impl ReplayRecorder {
    pub fn new(config: GameConfig, checkpoint_interval: u64) -> Self {
        Self {
            log: ReplayLog {
                config,
                total_frames: 0,
                entries: Vec::new(),
            },
            checkpoint_interval,
        }
    }

    pub fn record_frame(&mut self, game: &Game, dt: f32) -> Result<(), EngineError> {
        let frame = self.log.total_frames;
        if self.checkpoint_interval > 0 && frame % self.checkpoint_interval == 0 {
            self.log.entries.push(ReplayEntry::Checkpoint {
                frame,
                state_hash: game.state_hash()?,
            });
        }
        self.log.entries.push(ReplayEntry::Frame {
            frame,
            dt,
            input: game.world().resources().input,
        });
        self.log.total_frames += 1;
        Ok(())
    }

    pub fn finish(self) -> ReplayLog {
        self.log
    }
}

// ---------------------------------------------------------------------------
// replay()
// ---------------------------------------------------------------------------

/// Re-run `log` on a fresh game and verify its checkpoints.
///
/// Stops at the first diverging checkpoint. Fails if the log is malformed
/// (duplicate or missing frames) or the game cannot be built.
pub fn replay(log: &ReplayLog) -> anyhow::Result<ReplayResult> {
    let mut frames: BTreeMap<u64, (f32, InputState)> = BTreeMap::new();
    let mut checkpoints: BTreeMap<u64, &str> = BTreeMap::new();
    for entry in &log.entries {
        match entry {
            ReplayEntry::Frame { frame, dt, input } => {
                if frames.insert(*frame, (*dt, *input)).is_some() {
                    bail!("replay log has duplicate frame {frame}");
                }
            }
            ReplayEntry::Checkpoint { frame, state_hash } => {
                if checkpoints.insert(*frame, state_hash.as_str()).is_some() {
                    bail!("replay log has duplicate checkpoint at frame {frame}");
                }
            }
        }
    }

    let mut game =
        Game::new(log.config.clone()).context("failed to build game from replay config")?;
    let mut frames_replayed = 0;

    for frame in 0..log.total_frames {
        let Some(&(dt, input)) = frames.get(&frame) else {
            bail!("replay log is missing frame {frame}");
        };
        game.apply_keys(&input);

        if let Some(&expected) = checkpoints.get(&frame) {
            let actual = game.state_hash()?;
            if actual != expected {
                return Ok(ReplayResult {
                    completed: false,
                    frames_replayed,
                    first_divergence: Some(ReplayDivergence {
                        frame,
                        expected_hash: expected.to_owned(),
                        actual_hash: actual,
                    }),
                });
            }
        }

        game.tick(dt)
            .with_context(|| format!("tick failed at replay frame {frame}"))?;
        frames_replayed += 1;
    }

    Ok(ReplayResult {
        completed: true,
        frames_replayed,
        first_divergence: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(config: GameConfig, frames: u64) -> ReplayLog {
        let mut game = Game::new(config.clone()).unwrap();
        let mut recorder = ReplayRecorder::new(config, 15);
        for frame in 0..frames {
            game.set_key(Key::W, frame % 40 < 20);
            game.set_key(Key::ArrowLeft, frame % 70 < 35);
            recorder.record_frame(&game, 1.0 / 60.0).unwrap();
            game.tick(1.0 / 60.0).unwrap();
        }
        recorder.finish()
    }

    #[test]
    fn recording_replays_cleanly() {
        let log = record(GameConfig::default(), 240);
        let result = replay(&log).unwrap();
        assert!(result.completed);
        assert_eq!(result.frames_replayed, 240);
        assert!(result.first_divergence.is_none());
    }

    #[test]
    fn tampered_input_is_caught_at_the_next_checkpoint() {
        let mut log = record(GameConfig::default(), 120);
        for entry in &mut log.entries {
            if let ReplayEntry::Frame { frame: 20, input, .. } = entry {
                input.set(Key::D, true);
                input.set(Key::S, true);
            }
        }
        let result = replay(&log).unwrap();
        assert!(!result.completed);
        assert_eq!(result.first_divergence.unwrap().frame, 30);
        assert_eq!(result.frames_replayed, 30);
    }

    #[test]
    fn duplicate_frames_are_rejected() {
        let mut log = record(GameConfig::default(), 5);
        let dup = log.entries[1].clone();
        log.entries.push(dup);
        assert!(replay(&log).is_err());
    }

    #[test]
    fn missing_frames_are_rejected() {
        let mut log = record(GameConfig::default(), 5);
        log.total_frames = 6;
        assert!(replay(&log).is_err());
    }

    #[test]
    fn log_survives_json() {
        let log = record(GameConfig::default(), 30);
        let back = ReplayLog::from_json(&log.to_json().unwrap()).unwrap();
        assert!(replay(&back).unwrap().completed);
    }
}
