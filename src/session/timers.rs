//! Repeating timers on a single-threaded run-to-completion clock
//!
//! The front end feeds the current time in once per frame; every firing due
//! by then is reported in chronological order, so a slow frame catches up
//! on missed periods instead of dropping them.

/// What a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Enemy shoots and the session clock advances
    EnemyFire,
    /// Enemy picks a new drift direction
    EnemyWander,
}

/// Cancellation handle returned by `Scheduler::schedule_repeating`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    kind: TimerKind,
    period_ms: u64,
    next_due_ms: u64,
}

/// Set of live repeating timers
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    /// Kept in scheduling order; ties fire in this order
    timers: Vec<Timer>,
    next_handle: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// First firing happens one period after `now_ms`
    pub fn schedule_repeating(&mut self, kind: TimerKind, period_ms: u64, now_ms: u64) -> TimerHandle {
        let period_ms = period_ms.max(1);
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.timers.push(Timer {
            handle,
            kind,
            period_ms,
            next_due_ms: now_ms + period_ms,
        });
        handle
    }

    /// Returns false if the handle was already cancelled
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Number of live timers
    pub fn active(&self) -> usize {
        self.timers.len()
    }

    /// Drain every firing due at or before `now_ms`, earliest first
    pub fn due(&mut self, now_ms: u64) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        loop {
            // min_by_key keeps the first of equal keys, i.e. scheduling order
            let next = self
                .timers
                .iter_mut()
                .filter(|t| t.next_due_ms <= now_ms)
                .min_by_key(|t| t.next_due_ms);

            let Some(timer) = next else { break };
            fired.push(timer.kind);
            timer.next_due_ms += timer.period_ms;
        }
        fired
    }
}
