//! Simulation module
//!
//! All gameplay rules live here:
//! - One `tick` per rendered frame, no delta time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use state::{Entity, GameEvent, GameOverCause, GamePhase, GameState, Projectile, Side};
pub use tick::{enemy_fire, enemy_wander, tick};
