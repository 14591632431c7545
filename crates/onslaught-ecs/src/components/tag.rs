use std::fmt;

use serde::{Deserialize, Serialize};

/// The single label every gameplay entity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tag {
    Player,
    Enemy,
    Projectile,
    Spawner,
}

impl Tag {
    /// Lowercase name, also used by `Display`.
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Player => "player",
            Tag::Enemy => "enemy",
            Tag::Projectile => "projectile",
            Tag::Spawner => "spawner",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(Tag::Spawner.to_string(), "spawner");
        assert_eq!(format!("{}", Tag::Player), Tag::Player.as_str());
    }
}
