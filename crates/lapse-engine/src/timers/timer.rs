use std::fmt;

use super::spec::{TimeUnit, TimerCallback, TimerKind, TimerSpec};

/// Handle to a registered timer.
///
/// Ids are allocated monotonically per registry and never reused, so a handle to a
/// stopped timer stays stopped.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimerId(u64);

impl TimerId {
    #[inline]
    pub(crate) fn next(counter: &mut u64) -> Self {
        let id = Self(*counter);
        *counter += 1;
        id
    }

    /// Raw numeric value, useful for logging.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Read-only snapshot of a timer's clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimerStatus {
    pub id: TimerId,

    /// Remaining seconds (or frames) until the next invocation. May be negative.
    pub countdown: f32,

    /// Amount added back to `countdown` after each invocation.
    pub period: f32,

    /// Seconds (or frames) since the timer was registered.
    pub elapsed: f32,

    pub unit: TimeUnit,

    /// Progress fraction of bounded timers; `None` for other kinds.
    pub progress: Option<f32>,
}

/// A registered timer record. Owned by the registry.
pub(crate) struct Timer {
    pub id: TimerId,
    pub countdown: f32,
    pub period: f32,
    pub elapsed: f32,
    pub unit: TimeUnit,
    pub kind: TimerKind,
    pub callback: TimerCallback,

    /// Cleared when stopped mid-tick; the record is dropped at end of tick.
    pub active: bool,
}

impl Timer {
    /// Builds a record from an already validated spec.
    pub fn new(id: TimerId, spec: TimerSpec) -> Self {
        let TimerSpec {
            kind,
            unit,
            callback,
        } = spec;

        Self {
            id,
            countdown: kind.initial_countdown(),
            period: kind.period(),
            elapsed: 0.0,
            unit,
            kind,
            callback,
            active: true,
        }
    }

    /// Moves the clock forward by one tick and reports whether the timer is due.
    #[inline]
    pub fn advance(&mut self, dt: f32) -> bool {
        let step = self.unit.step(dt);
        self.countdown -= step;
        self.elapsed += step;
        self.countdown < 0.0
    }

    /// Replenishes the countdown after an invocation.
    ///
    /// Adds the period instead of resetting to it so overshoot carries into the next interval.
    #[inline]
    pub fn rearm(&mut self) {
        self.countdown += self.period;
    }

    #[inline]
    pub fn progress(&self) -> Option<f32> {
        self.kind.progress(self.elapsed)
    }

    pub fn status(&self) -> TimerStatus {
        TimerStatus {
            id: self.id,
            countdown: self.countdown,
            period: self.period,
            elapsed: self.elapsed,
            unit: self.unit,
            progress: self.progress(),
        }
    }
}
