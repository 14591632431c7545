use serde::{Deserialize, Serialize};

/// Global run state, stored on a single dedicated entity.
///
/// Game over always implies paused. The level-up screen pauses while shown
/// and unpauses on hide unless the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub is_paused: bool,
    pub is_game_over: bool,
    pub show_level_up: bool,
    pub current_level: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            is_paused: false,
            is_game_over: false,
            show_level_up: false,
            current_level: 1,
        }
    }
}

impl GameState {
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    /// Setting game over also pauses. Clearing it leaves the pause alone.
    pub fn set_game_over(&mut self, game_over: bool) {
        self.is_game_over = game_over;
        if game_over {
            self.is_paused = true;
        }
    }

    pub fn set_show_level_up(&mut self, show: bool) {
        self.show_level_up = show;
        if show {
            self.is_paused = true;
        } else if !self.is_game_over {
            self.is_paused = false;
        }
    }

    /// Advance one level and open the level-up screen.
    pub fn level_up(&mut self) {
        self.current_level += 1;
        self.set_show_level_up(true);
    }

    /// Back to level 1, unpaused.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
