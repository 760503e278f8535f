//! Arena Duel - a two-sprite arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation step, entity/projectile model, collision
//! - `input`: Keyboard-to-velocity mapping
//! - `session`: Start/game-over lifecycle and the two periodic drivers
//! - `renderer`: Paints state onto a 2D surface
//! - `platform`: Surface and front-end contracts
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use input::{InputMapper, Key, KeyReleasePolicy};
pub use session::{Session, SessionPhase};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Sprite extents (player and enemy share the same box)
    pub const SPRITE_WIDTH: f32 = 80.0;
    pub const SPRITE_HEIGHT: f32 = 80.0;

    /// Spawn offsets from the arena corners
    pub const PLAYER_SPAWN_X: f32 = 50.0;
    pub const ENEMY_SPAWN_INSET_X: f32 = 100.0;
    pub const SPAWN_INSET_Y: f32 = 100.0;

    pub const PLAYER_SPEED: f32 = 5.0;
    pub const ENEMY_START_SPEED: f32 = 2.0;
    /// Added to enemy speed every `SPEED_RAMP_EVERY` clock ticks (no cap)
    pub const ENEMY_SPEED_STEP: f32 = 0.1;
    pub const SPEED_RAMP_EVERY: u32 = 10;

    pub const START_HEALTH: u32 = 3;
    pub const SCORE_PER_HIT: u64 = 10;

    /// Projectile geometry
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 5.0;
    /// Vertical offset from sprite midline to projectile top
    pub const PROJECTILE_MUZZLE_OFFSET: f32 = 5.0;
    pub const PLAYER_PROJECTILE_SPEED: f32 = 7.0;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 5.0;

    /// Timer A: enemy fires and the session clock advances
    pub const FIRE_PERIOD_MS: u64 = 1000;
    /// Timer B: enemy picks a new wander direction
    pub const WANDER_PERIOD_MS: u64 = 500;
}
