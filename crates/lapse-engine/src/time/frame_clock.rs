use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// In real-time mode delta time is measured between ticks and clamped to avoid
/// pathological values when the process is paused by the debugger or stalls.
/// In fixed mode every tick reports the same step, which keeps headless runs and
/// tests deterministic.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
    fixed: Option<Duration>,
}

impl FrameClock {
    /// Creates a real-time clock with default clamps.
    ///
    /// Clamp rationale:
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum keeps second-based timers from firing in bursts after long stalls
    pub fn new() -> Self {
        Self::with_clamps(
            Duration::from_micros(100), // 0.0001s
            Duration::from_millis(250), // 0.25s
        )
    }

    /// Creates a real-time clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
            fixed: None,
        }
    }

    /// Creates a clock that reports `step` on every tick regardless of wall time.
    pub fn fixed(step: Duration) -> Self {
        Self {
            fixed: Some(step),
            ..Self::with_clamps(step, step)
        }
    }

    /// Resets the clock baseline.
    ///
    /// Useful when resuming after the loop was suspended.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Number of ticks taken so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();

        let dt = match self.fixed {
            Some(step) => step,
            None => now
                .saturating_duration_since(self.last)
                .clamp(self.dt_min, self.dt_max),
        };

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self
            .frame_index
            .wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
