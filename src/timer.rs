use std::time::{Duration, Instant};

/// How a TickTimer fires once started
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerMode {
    /// Fires every `interval` until stopped
    Periodic(Duration),
    /// Fires once, `delay` after start, then disarms itself
    Deadline(Duration),
}

/// Cooperative timer polled from the UI frame loop.
///
/// Nothing runs in the background: `poll` is called once per frame and reports
/// whether the timer came due. `stop` takes effect immediately, so a tick that
/// would have been due later in the same frame never fires.
#[derive(Clone, Debug)]
pub struct TickTimer {
    mode: TimerMode,
    next_due: Option<Instant>,
}

impl TickTimer {
    pub fn new(mode: TimerMode) -> Self {
        Self { mode, next_due: None }
    }

    /// (Re)arm the timer. Restarting a running timer resets its phase.
    pub fn start(&mut self, now: Instant) {
        let delay = match self.mode {
            TimerMode::Periodic(interval) => interval,
            TimerMode::Deadline(delay) => delay,
        };
        self.next_due = Some(now + delay);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// True when the timer was due at `now`. A periodic timer that fell behind
    /// fires once and skips the missed ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        self.next_due = match self.mode {
            TimerMode::Periodic(interval) => {
                let mut next = due + interval;
                if next <= now {
                    next = now + interval;
                }
                Some(next)
            }
            TimerMode::Deadline(_) => None,
        };
        true
    }

    /// Time left before the next tick, for scheduling a repaint
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
