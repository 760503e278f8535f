//! Keyboard input mapping
//!
//! Turns discrete key-down/key-up events into velocity intent on the player
//! and one projectile per fire press.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;
use crate::tuning::Tuning;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    /// Anything else; ignored
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            " " => Key::Fire,
            _ => Key::Other,
        }
    }

    pub fn is_directional(self) -> bool {
        matches!(self, Key::Left | Key::Right | Key::Up | Key::Down)
    }
}

/// What releasing a directional key does to player motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyReleasePolicy {
    /// Any directional release stops both axes, even if another key is held
    #[default]
    StopAll,
    /// Only the released key's axis changes; it falls back to the opposite
    /// key on that axis if that one is still held
    PerAxis,
}

/// Directional keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldKeys {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl HeldKeys {
    fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::Fire | Key::Other => {}
        }
    }
}

/// Applies key events to the player entity
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    held: HeldKeys,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget held keys (new session)
    pub fn reset(&mut self) {
        self.held = HeldKeys::default();
    }

    /// Directional keys overwrite the axis they govern; fire appends one shot.
    /// There is no cooldown, so a held fire key fires at the key-repeat rate.
    pub fn key_down(&mut self, key: Key, state: &mut GameState, tuning: &Tuning) {
        let player = &mut state.player;
        let speed = player.speed;
        match key {
            Key::Right => player.vel.x = speed,
            Key::Left => player.vel.x = -speed,
            Key::Up => player.vel.y = -speed,
            Key::Down => player.vel.y = speed,
            Key::Fire => player.fire(tuning),
            Key::Other => return,
        }
        self.held.set(key, true);
    }

    pub fn key_up(&mut self, key: Key, state: &mut GameState, tuning: &Tuning) {
        if !key.is_directional() {
            return;
        }
        self.held.set(key, false);

        let player = &mut state.player;
        match tuning.key_release {
            KeyReleasePolicy::StopAll => {
                player.vel = glam::Vec2::ZERO;
            }
            KeyReleasePolicy::PerAxis => {
                let speed = player.speed;
                let held = self.held;
                match key {
                    Key::Left | Key::Right => {
                        player.vel.x = axis_velocity(held.left, held.right, speed);
                    }
                    _ => {
                        player.vel.y = axis_velocity(held.up, held.down, speed);
                    }
                }
            }
        }
    }
}

/// Velocity on one axis from the keys still held on it
fn axis_velocity(negative: bool, positive: bool, speed: f32) -> f32 {
    match (negative, positive) {
        (true, false) => -speed,
        (false, true) => speed,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn setup(policy: KeyReleasePolicy) -> (InputMapper, GameState, Tuning) {
        let tuning = Tuning {
            key_release: policy,
            ..Default::default()
        };
        let mut state = GameState::new(&tuning, 7);
        state.reset(&tuning, 7);
        (InputMapper::new(), state, tuning)
    }

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::Left);
        assert_eq!(Key::from_dom_key("ArrowDown"), Key::Down);
        assert_eq!(Key::from_dom_key(" "), Key::Fire);
        assert_eq!(Key::from_dom_key("a"), Key::Other);
    }

    #[test]
    fn test_directions_set_independent_axes() {
        let (mut input, mut state, tuning) = setup(KeyReleasePolicy::StopAll);

        input.key_down(Key::Right, &mut state, &tuning);
        assert_eq!(state.player.vel, Vec2::new(5.0, 0.0));

        input.key_down(Key::Up, &mut state, &tuning);
        assert_eq!(state.player.vel, Vec2::new(5.0, -5.0));

        // Last key on an axis wins
        input.key_down(Key::Left, &mut state, &tuning);
        assert_eq!(state.player.vel, Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn test_stop_all_release_cancels_both_axes() {
        let (mut input, mut state, tuning) = setup(KeyReleasePolicy::StopAll);

        input.key_down(Key::Right, &mut state, &tuning);
        input.key_down(Key::Down, &mut state, &tuning);
        input.key_up(Key::Down, &mut state, &tuning);

        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_per_axis_release_keeps_other_axis() {
        let (mut input, mut state, tuning) = setup(KeyReleasePolicy::PerAxis);

        input.key_down(Key::Right, &mut state, &tuning);
        input.key_down(Key::Down, &mut state, &tuning);
        input.key_up(Key::Down, &mut state, &tuning);
        assert_eq!(state.player.vel, Vec2::new(5.0, 0.0));

        // Opposite key still held takes over
        input.key_down(Key::Left, &mut state, &tuning);
        input.key_up(Key::Left, &mut state, &tuning);
        assert_eq!(state.player.vel, Vec2::new(5.0, 0.0));

        input.key_up(Key::Right, &mut state, &tuning);
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_fire_is_one_shot_per_press() {
        let (mut input, mut state, tuning) = setup(KeyReleasePolicy::StopAll);

        input.key_down(Key::Fire, &mut state, &tuning);
        input.key_down(Key::Fire, &mut state, &tuning);
        input.key_up(Key::Fire, &mut state, &tuning);

        assert_eq!(state.player.projectiles.len(), 2);
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (mut input, mut state, tuning) = setup(KeyReleasePolicy::StopAll);
        input.key_down(Key::Right, &mut state, &tuning);
        input.key_down(Key::Other, &mut state, &tuning);
        input.key_up(Key::Other, &mut state, &tuning);
        assert_eq!(state.player.vel, Vec2::new(5.0, 0.0));
        assert!(state.player.projectiles.is_empty());
    }
}
