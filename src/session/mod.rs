//! Session lifecycle
//!
//! `Idle` -> `Running` on start; `Running` -> `Idle` the moment the
//! simulation reports game over. While running, two repeating timers drive
//! the enemy (fire + clock, wander) alongside the per-frame step.

pub mod timers;

use crate::input::{InputMapper, Key};
use crate::platform::{Frontend, Surface};
use crate::renderer;
use crate::sim::{GameEvent, GameState, enemy_fire, enemy_wander, tick};
use crate::tuning::Tuning;

pub use timers::{Scheduler, TimerHandle, TimerKind};

/// Lifecycle phase as seen by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Start control visible, arena hidden
    Idle,
    /// Arena visible, frame driver and timers live
    Running,
}

/// Timer handles owned by a running session
#[derive(Debug, Clone, Copy)]
struct SessionTimers {
    fire: TimerHandle,
    wander: TimerHandle,
}

pub fn score_text(score: u64) -> String {
    format!("Score: {score}")
}

pub fn time_text(elapsed: u32) -> String {
    format!("Time: {elapsed}")
}

pub fn game_over_message(score: u64, elapsed: u32) -> String {
    format!("Game Over! Your score: {score}, Time: {elapsed}")
}

/// One arena plus everything needed to run play-throughs on it
#[derive(Debug)]
pub struct Session {
    tuning: Tuning,
    state: GameState,
    input: InputMapper,
    scheduler: Scheduler,
    timers: Option<SessionTimers>,
    /// Key events only reach the mapper while this is held
    listening: bool,
    phase: SessionPhase,
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        let state = GameState::new(&tuning, tuning.seed.unwrap_or_default());
        Self {
            tuning,
            state,
            input: InputMapper::new(),
            scheduler: Scheduler::new(),
            timers: None,
            listening: false,
            phase: SessionPhase::Idle,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted drivers and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Number of live timers (0 whenever idle)
    pub fn active_timers(&self) -> usize {
        self.scheduler.active()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Idle -> Running. `seed` is used unless the tuning pins one.
    pub fn start(&mut self, now_ms: u64, seed: u64, frontend: &mut impl Frontend) {
        if self.phase == SessionPhase::Running {
            log::warn!("Start ignored: session already running");
            return;
        }

        let seed = self.tuning.seed.unwrap_or(seed);
        self.state.reset(&self.tuning, seed);
        self.input.reset();

        self.timers = Some(SessionTimers {
            fire: self.scheduler.schedule_repeating(
                TimerKind::EnemyFire,
                self.tuning.fire_period_ms,
                now_ms,
            ),
            wander: self.scheduler.schedule_repeating(
                TimerKind::EnemyWander,
                self.tuning.wander_period_ms,
                now_ms,
            ),
        });

        self.listening = true;
        frontend.set_key_listening(true);
        frontend.set_score_text(&score_text(0));
        frontend.set_time_text(&time_text(0));
        frontend.set_arena_visible(true);

        self.phase = SessionPhase::Running;
        log::info!("Session started with seed {}", seed);
    }

    /// Run due timers, then one simulation step.
    ///
    /// Returns whether the frame driver should schedule another frame.
    pub fn frame(&mut self, now_ms: u64, frontend: &mut impl Frontend) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }

        for kind in self.scheduler.due(now_ms) {
            match kind {
                TimerKind::EnemyFire => enemy_fire(&mut self.state, &self.tuning),
                TimerKind::EnemyWander => enemy_wander(&mut self.state),
            }
        }

        tick(&mut self.state, &self.tuning);
        self.dispatch_events(frontend);

        self.phase == SessionPhase::Running
    }

    /// Paint the current state
    pub fn render(&self, surface: &mut impl Surface) {
        renderer::render(&self.state, &self.tuning, surface);
    }

    pub fn key_down(&mut self, key: Key) {
        if self.listening {
            self.input.key_down(key, &mut self.state, &self.tuning);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.listening {
            self.input.key_up(key, &mut self.state, &self.tuning);
        }
    }

    fn dispatch_events(&mut self, frontend: &mut impl Frontend) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::ScoreChanged { score } => frontend.set_score_text(&score_text(score)),
                GameEvent::ClockTicked { elapsed } => frontend.set_time_text(&time_text(elapsed)),
                GameEvent::GameOver { score, elapsed, .. } => self.finish(score, elapsed, frontend),
                GameEvent::EnemySpeedUp { .. }
                | GameEvent::PlayerHit { .. }
                | GameEvent::EnemyHit { .. } => {}
            }
        }
    }

    /// Running -> Idle: release timers and key listeners, then notify
    fn finish(&mut self, score: u64, elapsed: u32, frontend: &mut impl Frontend) {
        if let Some(timers) = self.timers.take() {
            self.scheduler.cancel(timers.fire);
            self.scheduler.cancel(timers.wander);
        }

        self.listening = false;
        frontend.set_key_listening(false);

        frontend.notify_game_over(&game_over_message(score, elapsed));
        frontend.set_arena_visible(false);

        self.phase = SessionPhase::Idle;
        log::info!("Session ended: score {}, time {}", score, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    /// Records every front-end call in order
    #[derive(Default)]
    struct RecordingFrontend {
        calls: Vec<String>,
    }

    impl RecordingFrontend {
        fn count(&self, prefix: &str) -> usize {
            self.calls.iter().filter(|c| c.starts_with(prefix)).count()
        }
    }

    impl Frontend for RecordingFrontend {
        fn set_score_text(&mut self, text: &str) {
            self.calls.push(format!("score {text}"));
        }

        fn set_time_text(&mut self, text: &str) {
            self.calls.push(format!("time {text}"));
        }

        fn set_arena_visible(&mut self, visible: bool) {
            self.calls.push(format!("arena {visible}"));
        }

        fn set_key_listening(&mut self, listening: bool) {
            self.calls.push(format!("keys {listening}"));
        }

        fn notify_game_over(&mut self, message: &str) {
            self.calls.push(format!("over {message}"));
        }
    }

    fn started() -> (Session, RecordingFrontend) {
        let mut session = Session::new(Tuning::default());
        let mut frontend = RecordingFrontend::default();
        session.start(0, 42, &mut frontend);
        (session, frontend)
    }

    #[test]
    fn test_start_enters_running() {
        let (session, frontend) = started();

        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.active_timers(), 2);
        assert!(session.is_listening());
        assert_eq!(
            frontend.calls,
            vec!["keys true", "score Score: 0", "time Time: 0", "arena true"]
        );
    }

    #[test]
    fn test_keys_ignored_while_idle() {
        let mut session = Session::new(Tuning::default());
        session.key_down(Key::Fire);
        session.key_down(Key::Right);
        assert!(session.state().player.projectiles.is_empty());
        assert_eq!(session.state().player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_timers_fire_between_frames() {
        let (mut session, mut frontend) = started();

        assert!(session.frame(16, &mut frontend));
        assert!(session.state().enemy.projectiles.is_empty());

        // One fire tick and two wander ticks are due by t=1000
        assert!(session.frame(1000, &mut frontend));
        assert_eq!(session.state().elapsed, 1);
        assert_eq!(session.state().enemy.projectiles.len(), 1);
        assert_eq!(frontend.calls.last().map(String::as_str), Some("time Time: 1"));
    }

    #[test]
    fn test_hit_pushes_score_text() {
        let (mut session, mut frontend) = started();
        let tuning = session.tuning().clone();
        let state = session.state_mut();
        state.player.pos = state.enemy.pos - Vec2::new(90.0, 0.0);
        state.player.fire(&tuning);

        // Muzzle starts flush with the enemy's left edge
        session.frame(16, &mut frontend);

        assert_eq!(session.state().score, 10);
        assert!(frontend.calls.contains(&"score Score: 10".to_string()));
    }

    #[test]
    fn test_game_over_releases_everything_once() {
        let (mut session, mut frontend) = started();
        let state = session.state_mut();
        state.enemy.pos = state.player.pos;

        assert!(!session.frame(16, &mut frontend));

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.active_timers(), 0);
        assert!(!session.is_listening());
        assert_eq!(frontend.count("over "), 1);
        assert!(
            frontend
                .calls
                .contains(&"over Game Over! Your score: 0, Time: 0".to_string())
        );
        assert_eq!(frontend.calls.last().map(String::as_str), Some("arena false"));

        // Further frames and keys do nothing
        assert!(!session.frame(5000, &mut frontend));
        session.key_down(Key::Fire);
        assert!(session.state().player.projectiles.is_empty());
        assert_eq!(session.state().elapsed, 0);
        assert_eq!(frontend.count("over "), 1);
    }

    #[test]
    fn test_restart_resets_state() {
        let (mut session, mut frontend) = started();
        session.frame(3000, &mut frontend);
        assert_eq!(session.state().elapsed, 3);

        let state = session.state_mut();
        state.enemy.pos = state.player.pos;
        session.frame(3016, &mut frontend);
        assert_eq!(session.phase(), SessionPhase::Idle);

        session.start(10_000, 7, &mut frontend);
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.active_timers(), 2);
        assert_eq!(session.state().elapsed, 0);
        assert!(session.state().enemy.projectiles.is_empty());
        assert_eq!(session.state().enemy.pos, session.tuning().enemy_spawn());

        // Timers restart from the new start time
        session.frame(10_999, &mut frontend);
        assert_eq!(session.state().elapsed, 0);
        session.frame(11_000, &mut frontend);
        assert_eq!(session.state().elapsed, 1);
    }

    #[test]
    fn test_start_while_running_is_ignored() {
        let (mut session, mut frontend) = started();
        session.frame(2000, &mut frontend);
        session.start(2000, 9, &mut frontend);
        assert_eq!(session.state().elapsed, 2);
        assert_eq!(session.active_timers(), 2);
    }
}
