use std::fmt;

use super::ctx::{Command, Scheduler, TimerCtx};
use super::error::TimerError;
use super::spec::{TimerKind, TimerSpec};
use super::timer::{Timer, TimerId, TimerStatus};

/// Owns the active timers and advances them once per frame.
///
/// Timers are kept in insertion order, which is also ascending id order. Stops and
/// creations requested by callbacks are buffered and applied between callbacks, so
/// removing a timer mid-tick never skips or double-fires its siblings.
#[derive(Default)]
pub struct TimerRegistry {
    timers: Vec<Timer>,
    next_id: u64,
    frame_count: u64,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances every active timer by one frame and invokes those that came due.
    ///
    /// `dt` is the frame's delta in seconds; frame-unit timers ignore it. Negative or
    /// non-finite deltas are treated as zero. Callback panics propagate to the caller.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("ignoring invalid frame delta {dt}");
            0.0
        };

        self.frame_count = self.frame_count.wrapping_add(1);

        let mut compact = Compact(&mut self.timers);
        let timers = &mut *compact.0;

        // Index loop over the length at tick start. Timers created by callbacks are
        // pushed past that bound, so they first advance next tick; ids keep rising, so
        // the list stays sorted by id. Stops only flag records; `compact` drops them
        // when the tick ends, including when a callback unwinds.
        for i in 0..timers.len() {
            let timer = &mut timers[i];
            if !timer.active || !timer.advance(dt) {
                continue;
            }

            for cmd in fire(timer, &mut self.next_id) {
                match cmd {
                    Command::Stop(id) => deactivate(timers, id),
                    Command::Create(t) => {
                        log::debug!("{} created during tick ({:?})", t.id, t.kind);
                        timers.push(t);
                    }
                }
            }
        }
    }

    /// Removes a timer. Returns `false` if it was not registered (already stopped).
    pub fn stop(&mut self, id: TimerId) -> bool {
        match self.index_of(id) {
            Some(idx) => {
                self.timers.remove(idx);
                log::debug!("{id} stopped");
                true
            }
            None => false,
        }
    }

    /// Stops every timer.
    pub fn clear(&mut self) {
        if !self.timers.is_empty() {
            log::debug!("clearing {} timers", self.timers.len());
        }
        self.timers.clear();
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.index_of(id).is_some()
    }

    /// Snapshot of a registered timer's clock.
    pub fn get(&self, id: TimerId) -> Option<TimerStatus> {
        self.index_of(id).map(|idx| self.timers[idx].status())
    }

    /// Ids of registered timers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = TimerId> + '_ {
        self.timers.iter().map(|t| t.id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Number of ticks processed so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn index_of(&self, id: TimerId) -> Option<usize> {
        self.timers.binary_search_by_key(&id, |t| t.id).ok()
    }
}

impl Scheduler for TimerRegistry {
    fn create(&mut self, spec: TimerSpec) -> Result<TimerId, TimerError> {
        spec.kind.validate()?;
        let id = TimerId::next(&mut self.next_id);
        log::debug!("{id} created ({:?}, {:?})", spec.kind, spec.unit);
        self.timers.push(Timer::new(id, spec));
        Ok(id)
    }
}

impl fmt::Debug for TimerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerRegistry")
            .field("active", &self.timers.len())
            .field("next_id", &self.next_id)
            .field("frame_count", &self.frame_count)
            .finish()
    }
}

/// Invokes a due timer, applies its kind's post-invocation policy and rearms it.
///
/// Returns the commands buffered by the callbacks.
fn fire(timer: &mut Timer, next_id: &mut u64) -> Vec<Command> {
    log::trace!("{} fired at elapsed {}", timer.id, timer.elapsed);

    let mut ctx = TimerCtx::new(timer.status(), next_id);
    (timer.callback)(&mut ctx);

    let complete = timer.progress().is_some_and(|p| p >= 1.0);
    match &mut timer.kind {
        TimerKind::Repeating { .. } => {}
        TimerKind::OneShot { .. } => ctx.stop(),
        TimerKind::Bounded { on_complete, .. } => {
            if complete {
                log::debug!("{} completed", timer.id);
                ctx.stop();
                if let Some(done) = on_complete.take() {
                    done(&mut ctx);
                }
            }
        }
    }

    timer.rearm();
    ctx.into_commands()
}

fn deactivate(timers: &mut [Timer], id: TimerId) {
    if let Ok(idx) = timers.binary_search_by_key(&id, |t| t.id) {
        let timer = &mut timers[idx];
        if timer.active {
            timer.active = false;
            log::debug!("{id} stopped");
        }
    }
}

/// Drops records flagged inactive during a tick, on return or unwind.
struct Compact<'a>(&'a mut Vec<Timer>);

impl Drop for Compact<'_> {
    fn drop(&mut self) {
        self.0.retain(|t| t.active);
    }
}
