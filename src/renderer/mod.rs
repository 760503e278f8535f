//! Render step
//!
//! Paints the current state onto any `Surface`. Read-only: nothing here
//! mutates the simulation.

use crate::platform::{Sprite, Surface};
use crate::sim::GameState;
use crate::tuning::Tuning;

/// Projectile fill color
pub const PROJECTILE_COLOR: &str = "yellow";

/// Draw one frame: background, both sprites, then every projectile in flight
pub fn render(state: &GameState, tuning: &Tuning, surface: &mut impl Surface) {
    surface.clear(tuning.arena_width, tuning.arena_height);
    surface.draw_sprite(Sprite::Hero, state.player.rect());
    surface.draw_sprite(Sprite::Villain, state.enemy.rect());

    for shot in state
        .player
        .projectiles
        .iter()
        .chain(state.enemy.projectiles.iter())
    {
        surface.fill_rect(shot.rect(), PROJECTILE_COLOR);
    }
}
