//! World-level state that is not attached to any entity.
//!
//! Key state, score, the simulation clock, the seeded RNG, the per-tick
//! event log, and the render snapshot buffers all live in one
//! [`Resources`] value owned by the world. Nothing here is global.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::render::RenderSnapshot;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Physical keys the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::ArrowUp,
        Key::ArrowDown,
        Key::ArrowLeft,
        Key::ArrowRight,
    ];

    /// Parse a browser-style key name, case-insensitively
    /// (`"w"`, `"KeyW"`, `"ArrowUp"`).
    pub fn from_name(name: &str) -> Option<Key> {
        let lower = name.to_ascii_lowercase();
        let key = match lower.as_str() {
            "w" | "keyw" => Key::W,
            "a" | "keya" => Key::A,
            "s" | "keys" => Key::S,
            "d" | "keyd" => Key::D,
            "arrowup" | "up" => Key::ArrowUp,
            "arrowdown" | "down" => Key::ArrowDown,
            "arrowleft" | "left" => Key::ArrowLeft,
            "arrowright" | "right" => Key::ArrowRight,
            _ => return None,
        };
        Some(key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The `isDown(key)` boundary between the host and the simulation.
pub trait KeySource {
    fn is_down(&self, key: Key) -> bool;
}

/// Two physical keys per logical direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub up: [Key; 2],
    pub down: [Key; 2],
    pub left: [Key; 2],
    pub right: [Key; 2],
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: [Key::W, Key::ArrowUp],
            down: [Key::S, Key::ArrowDown],
            left: [Key::A, Key::ArrowLeft],
            right: [Key::D, Key::ArrowRight],
        }
    }
}

impl KeyBindings {
    /// `(up, down, left, right)` as seen through `source`.
    pub fn read(&self, source: &impl KeySource) -> (bool, bool, bool, bool) {
        let any = |keys: &[Key; 2]| keys.iter().any(|&k| source.is_down(k));
        (
            any(&self.up),
            any(&self.down),
            any(&self.left),
            any(&self.right),
        )
    }
}

/// Current key state, written by the host and read by the input system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    down: [bool; 8],
}

impl InputState {
    pub fn set(&mut self, key: Key, down: bool) {
        self.down[key.index()] = down;
    }

    pub fn release_all(&mut self) {
        self.down = [false; 8];
    }

    /// Keys currently held, in [`Key::ALL`] order.
    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|k| self.down[k.index()])
    }

    /// Replace the whole state with the keys `source` reports as held.
    pub fn copy_from(&mut self, source: &impl KeySource) {
        for key in Key::ALL {
            self.down[key.index()] = source.is_down(key);
        }
    }
}

impl KeySource for InputState {
    fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }
}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

/// Kill counter with a high-water mark that survives [`Score::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    score: u64,
    high_score: u64,
}

impl Score {
    pub fn increment(&mut self, amount: u64) {
        self.score = self.score.saturating_add(amount);
        self.high_score = self.high_score.max(self.score);
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Something notable that happened during the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Enemy queued for creation at `(x, y)`.
    EnemySpawned { x: f32, y: f32 },
    EnemyKilled { enemy: EntityId, by: Option<EntityId> },
    ProjectileFired { owner: EntityId, angle: f32 },
    PlayerDamaged { player: EntityId, amount: f32, remaining: f32 },
    GameOver { score: u64 },
}

// ---------------------------------------------------------------------------
// SimClock
// ---------------------------------------------------------------------------

/// Accumulated simulation time. Advances only on unpaused ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    pub tick: u64,
    /// Seconds of simulated time.
    pub elapsed: f64,
}

impl SimClock {
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed += f64::from(dt);
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Resources {
    pub input: InputState,
    pub key_bindings: KeyBindings,
    pub score: Score,
    pub clock: SimClock,
    /// Events of the most recent unpaused tick.
    pub events: Vec<GameEvent>,
    /// Single source of randomness for the whole simulation.
    pub rng: Pcg32,
    pub render: RenderSnapshot,
    /// Enemies spawned since the last reset.
    pub spawn_count: u64,
    seed: u64,
}

impl Resources {
    pub fn new(seed: u64) -> Self {
        Self {
            input: InputState::default(),
            key_bindings: KeyBindings::default(),
            score: Score::default(),
            clock: SimClock::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            render: RenderSnapshot::default(),
            spawn_count: 0,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Return to the state of a fresh run. Keys and the high score persist.
    pub fn reset(&mut self) {
        self.score.reset();
        self.clock = SimClock::default();
        self.events.clear();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.render.clear();
        self.spawn_count = 0;
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
