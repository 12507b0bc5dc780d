use std::fmt;

/// Rejected timer parameters.
///
/// Returned by [`Scheduler::create`](super::Scheduler::create) before anything is registered,
/// so a failed creation leaves the registry untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerError {
    /// Period or one-shot delay is negative, NaN or infinite.
    InvalidPeriod(f32),
    /// Bounded start delay is negative, NaN or infinite.
    InvalidStartDelay(f32),
    /// Bounded total play time is not a finite value greater than zero.
    InvalidPlayTime(f32),
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPeriod(v) => {
                write!(f, "timer period must be finite and non-negative, got {v}")
            }
            Self::InvalidStartDelay(v) => {
                write!(f, "timer start delay must be finite and non-negative, got {v}")
            }
            Self::InvalidPlayTime(v) => {
                write!(f, "timer total play time must be finite and positive, got {v}")
            }
        }
    }
}

impl std::error::Error for TimerError {}
