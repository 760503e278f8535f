//! Game state and core simulation types
//!
//! Entities are built once per `GameState` and reset in place at every new
//! session, so nothing here is recreated between play-throughs.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::tuning::Tuning;

/// Current phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Built but never started
    Ready,
    /// Active gameplay
    Running,
    /// Terminal condition reached; the step no longer mutates anything
    GameOver,
}

/// Which side an entity or projectile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Horizontal travel direction for this side's projectiles
    pub fn fire_direction(self) -> f32 {
        match self {
            Side::Player => 1.0,
            Side::Enemy => -1.0,
        }
    }
}

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Player health ran out
    PlayerDestroyed,
    /// Player sprite touched the enemy sprite
    Collision,
}

/// Things the outside world may want to react to (HUD, sound, logs)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    ClockTicked { elapsed: u32 },
    EnemySpeedUp { speed: f32 },
    PlayerHit { health: u32 },
    EnemyHit { health: u32 },
    GameOver { score: u64, elapsed: u32, cause: GameOverCause },
}

/// A shot travelling horizontally away from whoever fired it
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub owner: Side,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Signed horizontal speed; the sign always points away from `owner`
    pub dx: f32,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// True once the projectile has reached the far edge for its direction
    pub fn has_left_arena(&self, arena_width: f32) -> bool {
        match self.owner {
            Side::Player => self.pos.x >= arena_width,
            Side::Enemy => self.pos.x <= 0.0,
        }
    }
}

/// Player or enemy sprite
#[derive(Debug, Clone)]
pub struct Entity {
    pub side: Side,
    /// Top-left corner
    pub pos: Vec2,
    /// Per-step displacement
    pub vel: Vec2,
    pub size: Vec2,
    /// Movement speed scalar (the enemy's grows during a session)
    pub speed: f32,
    pub health: u32,
    /// Shots fired by this entity still in flight, in firing order
    pub projectiles: Vec<Projectile>,
}

impl Entity {
    pub fn new(side: Side, tuning: &Tuning) -> Self {
        let mut entity = Self {
            side,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: Vec2::ZERO,
            speed: 0.0,
            health: 0,
            projectiles: Vec::new(),
        };
        entity.reset(tuning);
        entity
    }

    /// Restore spawn position, speed and health; drop all projectiles
    pub fn reset(&mut self, tuning: &Tuning) {
        let (pos, speed) = match self.side {
            Side::Player => (tuning.player_spawn(), tuning.player_speed),
            Side::Enemy => (tuning.enemy_spawn(), tuning.enemy_start_speed),
        };
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.size = tuning.sprite_size();
        self.speed = speed;
        self.health = tuning.start_health;
        self.projectiles.clear();
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Spawn one projectile at this entity's muzzle.
    ///
    /// The player fires from its right edge, the enemy from its left edge,
    /// both slightly above the sprite's vertical midline.
    pub fn fire(&mut self, tuning: &Tuning) {
        let (muzzle_x, speed) = match self.side {
            Side::Player => (self.pos.x + self.size.x, tuning.player_projectile_speed),
            Side::Enemy => (self.pos.x, tuning.enemy_projectile_speed),
        };
        let muzzle_y = self.pos.y + self.size.y / 2.0 - tuning.projectile_muzzle_offset;

        self.projectiles.push(Projectile {
            owner: self.side,
            pos: Vec2::new(muzzle_x, muzzle_y),
            size: tuning.projectile_size(),
            dx: speed * self.side.fire_direction(),
        });
    }
}

/// Complete simulation state for one arena
#[derive(Debug, Clone)]
pub struct GameState {
    pub player: Entity,
    pub enemy: Entity,
    /// Player score
    pub score: u64,
    /// Session clock, in fire-timer ticks
    pub elapsed: u32,
    pub phase: GamePhase,
    /// Seeded RNG for enemy steering
    pub rng: Pcg32,
    /// Events produced since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state with both entities at their spawn points
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self {
            player: Entity::new(Side::Player, tuning),
            enemy: Entity::new(Side::Enemy, tuning),
            score: 0,
            elapsed: 0,
            phase: GamePhase::Ready,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Reset everything in place for a new session and enter `Running`
    pub fn reset(&mut self, tuning: &Tuning, seed: u64) {
        self.player.reset(tuning);
        self.enemy.reset(tuning);
        self.score = 0;
        self.elapsed = 0;
        self.phase = GamePhase::Running;
        self.rng = Pcg32::seed_from_u64(seed);
        self.events.clear();
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Enter `GameOver` exactly once; later calls are ignored
    pub fn end(&mut self, cause: GameOverCause) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over ({:?}): score {}, time {}",
            cause,
            self.score,
            self.elapsed
        );
        self.push_event(GameEvent::GameOver {
            score: self.score,
            elapsed: self.elapsed,
            cause,
        });
    }
}
