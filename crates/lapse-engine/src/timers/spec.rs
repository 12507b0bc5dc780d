use std::fmt;

use super::ctx::TimerCtx;
use super::error::TimerError;

/// Callback invoked every time a timer comes due.
pub type TimerCallback = Box<dyn FnMut(&mut TimerCtx<'_>)>;

/// Callback run once when a bounded timer reaches full progress.
pub type CompletionCallback = Box<dyn FnOnce(&mut TimerCtx<'_>)>;

/// Unit in which a timer measures its countdown and elapsed time.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TimeUnit {
    /// Wall-clock seconds; each tick moves by the tick's delta time.
    #[default]
    Seconds,
    /// Whole frames; each tick moves by exactly one and ignores delta time.
    Frames,
}

impl TimeUnit {
    /// Amount a countdown moves for a tick of `dt` seconds.
    #[inline]
    pub fn step(self, dt: f32) -> f32 {
        match self {
            Self::Seconds => dt,
            Self::Frames => 1.0,
        }
    }
}

/// What happens after a timer's callback runs.
pub enum TimerKind {
    /// Fires every `period` until stopped explicitly.
    Repeating { period: f32 },

    /// Fires once after `delay`, then stops itself.
    OneShot { delay: f32 },

    /// Waits `start_delay`, then fires every `period` (every tick when `period == 0`).
    ///
    /// Stops itself once `(elapsed - start_delay) / total_play_time` reaches 1 and runs
    /// `on_complete` right after the final callback.
    Bounded {
        start_delay: f32,
        total_play_time: f32,
        period: f32,
        on_complete: Option<CompletionCallback>,
    },
}

impl TimerKind {
    pub(crate) fn validate(&self) -> Result<(), TimerError> {
        match *self {
            Self::Repeating { period } => check_period(period),
            Self::OneShot { delay } => check_period(delay),
            Self::Bounded {
                start_delay,
                total_play_time,
                period,
                ..
            } => {
                if !start_delay.is_finite() || start_delay < 0.0 {
                    return Err(TimerError::InvalidStartDelay(start_delay));
                }
                if !total_play_time.is_finite() || total_play_time <= 0.0 {
                    return Err(TimerError::InvalidPlayTime(total_play_time));
                }
                check_period(period)
            }
        }
    }

    /// Countdown value at registration.
    pub(crate) fn initial_countdown(&self) -> f32 {
        match *self {
            Self::Repeating { period } => period,
            Self::OneShot { delay } => delay,
            Self::Bounded { start_delay, .. } => start_delay,
        }
    }

    /// Amount added back to the countdown after each invocation.
    pub(crate) fn period(&self) -> f32 {
        match *self {
            Self::Repeating { period } => period,
            Self::OneShot { delay } => delay,
            Self::Bounded { period, .. } => period,
        }
    }

    /// Progress fraction for bounded timers, `None` otherwise.
    ///
    /// Negative while the start delay is still running; capped at 1.
    pub(crate) fn progress(&self, elapsed: f32) -> Option<f32> {
        match *self {
            Self::Bounded {
                start_delay,
                total_play_time,
                ..
            } => Some(((elapsed - start_delay) / total_play_time).min(1.0)),
            _ => None,
        }
    }
}

impl fmt::Debug for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repeating { period } => {
                f.debug_struct("Repeating").field("period", period).finish()
            }
            Self::OneShot { delay } => f.debug_struct("OneShot").field("delay", delay).finish(),
            Self::Bounded {
                start_delay,
                total_play_time,
                period,
                on_complete,
            } => f
                .debug_struct("Bounded")
                .field("start_delay", start_delay)
                .field("total_play_time", total_play_time)
                .field("period", period)
                .field("on_complete", &on_complete.is_some())
                .finish(),
        }
    }
}

fn check_period(period: f32) -> Result<(), TimerError> {
    if period.is_finite() && period >= 0.0 {
        Ok(())
    } else {
        Err(TimerError::InvalidPeriod(period))
    }
}

/// Everything needed to register a timer.
///
/// ```
/// use lapse_engine::timers::{Scheduler, TimerRegistry, TimerSpec};
///
/// let mut timers = TimerRegistry::new();
/// let id = timers
///     .create(TimerSpec::bounded(0.5, 2.0, 0.0, |ctx| {
///         let _fade = ctx.progress().unwrap_or(0.0);
///     })
///     .on_complete(|_| println!("faded in")))
///     .unwrap();
/// assert!(timers.is_active(id));
/// ```
pub struct TimerSpec {
    pub kind: TimerKind,
    pub unit: TimeUnit,
    pub callback: TimerCallback,
}

impl TimerSpec {
    pub fn repeating<F>(period: f32, callback: F) -> Self
    where
        F: FnMut(&mut TimerCtx<'_>) + 'static,
    {
        Self::new(TimerKind::Repeating { period }, callback)
    }

    pub fn one_shot<F>(delay: f32, callback: F) -> Self
    where
        F: FnMut(&mut TimerCtx<'_>) + 'static,
    {
        Self::new(TimerKind::OneShot { delay }, callback)
    }

    pub fn bounded<F>(start_delay: f32, total_play_time: f32, period: f32, callback: F) -> Self
    where
        F: FnMut(&mut TimerCtx<'_>) + 'static,
    {
        Self::new(
            TimerKind::Bounded {
                start_delay,
                total_play_time,
                period,
                on_complete: None,
            },
            callback,
        )
    }

    fn new<F>(kind: TimerKind, callback: F) -> Self
    where
        F: FnMut(&mut TimerCtx<'_>) + 'static,
    {
        Self {
            kind,
            unit: TimeUnit::Seconds,
            callback: Box::new(callback),
        }
    }

    /// Sets the unit the timer counts in.
    pub fn unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Counts in frames instead of seconds.
    pub fn in_frames(self) -> Self {
        self.unit(TimeUnit::Frames)
    }

    /// Sets the completion callback of a bounded timer.
    ///
    /// Only [`TimerKind::Bounded`] specs complete. On repeating and one-shot specs the
    /// closure is dropped without ever running and a warning is logged.
    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut TimerCtx<'_>) + 'static,
    {
        if let TimerKind::Bounded { on_complete, .. } = &mut self.kind {
            *on_complete = Some(Box::new(f));
        } else {
            log::warn!("on_complete ignored for {:?} timer", self.kind);
        }
        self
    }
}

impl fmt::Debug for TimerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerSpec")
            .field("kind", &self.kind)
            .field("unit", &self.unit)
            .finish_non_exhaustive()
    }
}
