//! Game balance and arena configuration
//!
//! Every gameplay number lives here so a session can be re-tuned from JSON
//! without touching the simulation. Missing fields fall back to `consts`.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::KeyReleasePolicy;

/// Why a tuning document was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// Tuning file could not be read
    Io(String),
    /// Not valid JSON, or a field had the wrong type
    Parse(String),
    /// Well-formed but describes an unplayable arena
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(m) => write!(f, "tuning read error: {m}"),
            Self::Parse(m) => write!(f, "tuning parse error: {m}"),
            Self::Invalid(m) => write!(f, "invalid tuning: {m}"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Data-driven gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Player and enemy share one sprite box
    pub sprite_width: f32,
    pub sprite_height: f32,
    pub player_spawn_x: f32,
    /// Enemy spawn distance from the right edge
    pub enemy_spawn_inset_x: f32,
    /// Both spawns sit this far above the bottom edge
    pub spawn_inset_y: f32,

    // === Entities ===
    pub player_speed: f32,
    pub enemy_start_speed: f32,
    pub enemy_speed_step: f32,
    /// Clock ticks between enemy speed increases
    pub speed_ramp_every: u32,
    pub start_health: u32,
    pub score_per_hit: u64,

    // === Projectiles ===
    pub projectile_width: f32,
    pub projectile_height: f32,
    /// Muzzle height above the sprite midline
    pub projectile_muzzle_offset: f32,
    pub player_projectile_speed: f32,
    pub enemy_projectile_speed: f32,

    // === Timers ===
    pub fire_period_ms: u64,
    pub wander_period_ms: u64,

    // === Input ===
    pub key_release: KeyReleasePolicy,

    /// Fixed RNG seed; the front end picks one when absent
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            sprite_width: SPRITE_WIDTH,
            sprite_height: SPRITE_HEIGHT,
            player_spawn_x: PLAYER_SPAWN_X,
            enemy_spawn_inset_x: ENEMY_SPAWN_INSET_X,
            spawn_inset_y: SPAWN_INSET_Y,

            player_speed: PLAYER_SPEED,
            enemy_start_speed: ENEMY_START_SPEED,
            enemy_speed_step: ENEMY_SPEED_STEP,
            speed_ramp_every: SPEED_RAMP_EVERY,
            start_health: START_HEALTH,
            score_per_hit: SCORE_PER_HIT,

            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            projectile_muzzle_offset: PROJECTILE_MUZZLE_OFFSET,
            player_projectile_speed: PLAYER_PROJECTILE_SPEED,
            enemy_projectile_speed: ENEMY_PROJECTILE_SPEED,

            fire_period_ms: FIRE_PERIOD_MS,
            wander_period_ms: WANDER_PERIOD_MS,

            key_release: KeyReleasePolicy::default(),
            seed: None,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("sprite_width", self.sprite_width),
            ("sprite_height", self.sprite_height),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("player_spawn_x", self.player_spawn_x),
            ("enemy_spawn_inset_x", self.enemy_spawn_inset_x),
            ("spawn_inset_y", self.spawn_inset_y),
            ("player_speed", self.player_speed),
            ("enemy_start_speed", self.enemy_start_speed),
            ("enemy_speed_step", self.enemy_speed_step),
            ("player_projectile_speed", self.player_projectile_speed),
            ("enemy_projectile_speed", self.enemy_projectile_speed),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if !self.projectile_muzzle_offset.is_finite() {
            return Err(TuningError::Invalid("projectile_muzzle_offset must be finite".into()));
        }
        if self.sprite_width > self.arena_width || self.sprite_height > self.arena_height {
            return Err(TuningError::Invalid("sprite does not fit inside the arena".into()));
        }
        if self.fire_period_ms == 0 || self.wander_period_ms == 0 {
            return Err(TuningError::Invalid("timer periods must be non-zero".into()));
        }
        if self.speed_ramp_every == 0 {
            return Err(TuningError::Invalid("speed_ramp_every must be non-zero".into()));
        }
        Ok(())
    }

    /// Largest top-left corner that keeps a sprite inside the arena
    pub fn sprite_max(&self) -> Vec2 {
        Vec2::new(
            self.arena_width - self.sprite_width,
            self.arena_height - self.sprite_height,
        )
    }

    pub fn sprite_size(&self) -> Vec2 {
        Vec2::new(self.sprite_width, self.sprite_height)
    }

    pub fn projectile_size(&self) -> Vec2 {
        Vec2::new(self.projectile_width, self.projectile_height)
    }

    /// Player anchors near the bottom-left corner
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(self.player_spawn_x, self.arena_height - self.spawn_inset_y)
            .clamp(Vec2::ZERO, self.sprite_max())
    }

    /// Enemy anchors near the bottom-right corner
    pub fn enemy_spawn(&self) -> Vec2 {
        Vec2::new(
            self.arena_width - self.enemy_spawn_inset_x,
            self.arena_height - self.spawn_inset_y,
        )
        .clamp(Vec2::ZERO, self.sprite_max())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "arena_duel_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Read and validate a JSON tuning file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path).map_err(|e| TuningError::Io(e.to_string()))?;
        Self::from_json(&json)
    }

    /// Load tuning from a JSON file, falling back to defaults on any error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.player_spawn(), Vec2::new(50.0, 500.0));
        assert_eq!(tuning.enemy_spawn(), Vec2::new(700.0, 500.0));
        assert_eq!(tuning.sprite_max(), Vec2::new(720.0, 520.0));
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let tuning = Tuning::from_json(r#"{ "arena_width": 1024, "key_release": "PerAxis" }"#)
            .expect("valid tuning");
        assert_eq!(tuning.arena_width, 1024.0);
        assert_eq!(tuning.arena_height, ARENA_HEIGHT);
        assert_eq!(tuning.key_release, KeyReleasePolicy::PerAxis);
        assert_eq!(tuning.enemy_spawn(), Vec2::new(924.0, 500.0));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = Tuning::from_json("{ arena_width: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_unplayable_values() {
        let err = Tuning::from_json(r#"{ "arena_width": 40 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "fire_period_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "player_speed": -1 }"#).unwrap_err();
        assert!(err.to_string().contains("player_speed"));

        let err = Tuning::from_json(r#"{ "spawn_inset_y": -10 }"#).unwrap_err();
        assert!(err.to_string().contains("spawn_inset_y"));
    }

    #[test]
    fn test_spawn_and_muzzle_are_tunable() {
        let tuning = Tuning::from_json(
            r#"{ "player_spawn_x": 0, "enemy_spawn_inset_x": 80, "spawn_inset_y": 300, "projectile_muzzle_offset": 0 }"#,
        )
        .expect("valid tuning");
        assert_eq!(tuning.player_spawn(), Vec2::new(0.0, 300.0));
        assert_eq!(tuning.enemy_spawn(), Vec2::new(720.0, 300.0));
        assert_eq!(tuning.projectile_muzzle_offset, 0.0);
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("arena_duel_no_such_tuning.json");
        let err = Tuning::from_file(&path).unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
        assert!(err.to_string().starts_with("tuning read error"));

        // Falls back to defaults
        assert_eq!(Tuning::load_file(&path), Tuning::default());
    }
}
