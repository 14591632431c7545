//! The fixed component catalog.
//!
//! Components are plain data. The few helpers here only maintain each
//! component's own invariants (health clamping, direction normalization,
//! timer wrap-around); all cross-entity behavior lives in systems.

mod ai;
mod collider;
mod game_state;
mod health;
mod input;
mod projectile;
mod render;
mod tag;
mod timer;
mod transform;

pub use ai::{Ai, AiBehavior};
pub use collider::{Collider, ColliderType};
pub use game_state::GameState;
pub use health::Health;
pub use input::Input;
pub use projectile::Projectile;
pub use render::{Color, Render, RenderType};
pub use tag::Tag;
pub use timer::Timer;
pub use transform::{normalize, Transform, Velocity};
