//! Per-frame simulation step and the two timer-driven enemy behaviours
//!
//! `tick` runs once per rendered frame. `enemy_fire` and `enemy_wander` are
//! invoked out of band by the session's periodic timers and may interleave
//! between any two frames.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Entity, GameEvent, GameOverCause, GameState};
use crate::tuning::Tuning;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, tuning: &Tuning) {
    // Nothing moves before start or after game over
    if !state.is_running() {
        return;
    }

    // Player: integrate, hard clamp
    let player = &mut state.player;
    player.pos = (player.pos + player.vel).clamp(Vec2::ZERO, tuning.sprite_max());

    // Enemy: integrate, bounce back in with a fresh random speed
    move_enemy(&mut state.enemy, &mut state.rng, tuning.sprite_max());

    // Player shots vs enemy
    let hits = advance_projectiles(&mut state.player, state.enemy.rect(), tuning.arena_width);
    for _ in 0..hits {
        state.enemy.health = state.enemy.health.saturating_sub(1);
        state.score += tuning.score_per_hit;
        log::debug!("Enemy hit, health {}", state.enemy.health);
        state.push_event(GameEvent::EnemyHit {
            health: state.enemy.health,
        });
        state.push_event(GameEvent::ScoreChanged { score: state.score });
    }

    // Enemy shots vs player
    let hits = advance_projectiles(&mut state.enemy, state.player.rect(), tuning.arena_width);
    for _ in 0..hits {
        state.player.health = state.player.health.saturating_sub(1);
        log::debug!("Player hit, health {}", state.player.health);
        state.push_event(GameEvent::PlayerHit {
            health: state.player.health,
        });
    }

    if state.player.health == 0 {
        state.end(GameOverCause::PlayerDestroyed);
    }

    // Touching the enemy is an instant loss regardless of health
    if state.player.rect().intersects(&state.enemy.rect()) {
        state.end(GameOverCause::Collision);
    }
}

/// Integrate enemy motion and reflect off the arena edges.
///
/// On crossing a bound the position is pinned to it and that axis gets a new
/// random magnitude in `[0, speed)` pointing back into the arena.
fn move_enemy(enemy: &mut Entity, rng: &mut Pcg32, max: Vec2) {
    enemy.pos += enemy.vel;

    let speed = enemy.speed;
    if let Some((pos, vel)) = bounce_axis(enemy.pos.x, max.x, speed, rng) {
        enemy.pos.x = pos;
        enemy.vel.x = vel;
    }
    if let Some((pos, vel)) = bounce_axis(enemy.pos.y, max.y, speed, rng) {
        enemy.pos.y = pos;
        enemy.vel.y = vel;
    }
}

/// Returns the corrected (position, velocity) when `pos` left `[0, max]`
fn bounce_axis(pos: f32, max: f32, speed: f32, rng: &mut Pcg32) -> Option<(f32, f32)> {
    if pos < 0.0 {
        Some((0.0, random_magnitude(rng, speed)))
    } else if pos > max {
        Some((max, -random_magnitude(rng, speed)))
    } else {
        None
    }
}

fn random_magnitude(rng: &mut Pcg32, speed: f32) -> f32 {
    if speed > 0.0 {
        rng.random_range(0.0..speed)
    } else {
        0.0
    }
}

/// Move every shot owned by `shooter`, cull the ones past the far edge, and
/// remove the ones overlapping `target`. Returns the number of hits.
fn advance_projectiles(shooter: &mut Entity, target: super::Rect, arena_width: f32) -> u32 {
    let mut hits = 0;
    shooter.projectiles.retain_mut(|shot| {
        shot.pos.x += shot.dx;
        if shot.has_left_arena(arena_width) {
            return false;
        }
        if shot.rect().touches(&target) {
            hits += 1;
            return false;
        }
        true
    });
    hits
}

/// Fire timer: the enemy shoots once and the session clock advances.
///
/// Every `speed_ramp_every` ticks the enemy gets faster, without a cap.
pub fn enemy_fire(state: &mut GameState, tuning: &Tuning) {
    if !state.is_running() {
        return;
    }

    state.enemy.fire(tuning);

    state.elapsed += 1;
    state.push_event(GameEvent::ClockTicked {
        elapsed: state.elapsed,
    });

    if state.elapsed.is_multiple_of(tuning.speed_ramp_every) {
        state.enemy.speed += tuning.enemy_speed_step;
        log::debug!("Enemy speed up: {:.2}", state.enemy.speed);
        state.push_event(GameEvent::EnemySpeedUp {
            speed: state.enemy.speed,
        });
    }
}

/// Wander timer: pick an undirected drift in `[-speed/2, speed/2)` per axis
pub fn enemy_wander(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    let speed = state.enemy.speed;
    let dx = (state.rng.random::<f32>() - 0.5) * speed;
    let dy = (state.rng.random::<f32>() - 0.5) * speed;
    state.enemy.vel = Vec2::new(dx, dy);
}
