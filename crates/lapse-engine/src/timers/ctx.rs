use super::error::TimerError;
use super::spec::{CompletionCallback, TimeUnit, TimerKind, TimerSpec};
use super::timer::{Timer, TimerId, TimerStatus};

/// Timer creation shared by the registry and by callbacks running inside a tick.
pub trait Scheduler {
    /// Validates and registers a timer.
    fn create(&mut self, spec: TimerSpec) -> Result<TimerId, TimerError>;

    /// Repeating timer: `period` is both the first delay and the interval.
    fn create_simple_timer<F>(
        &mut self,
        callback: F,
        period: f32,
        unit: TimeUnit,
    ) -> Result<TimerId, TimerError>
    where
        F: FnMut(&mut TimerCtx<'_>) + 'static,
        Self: Sized,
    {
        self.create(TimerSpec::repeating(period, callback).unit(unit))
    }

    /// Runs `callback` once after `delay`, then stops.
    fn create_one_shot_timer<F>(
        &mut self,
        callback: F,
        delay: f32,
        unit: TimeUnit,
    ) -> Result<TimerId, TimerError>
    where
        F: FnMut(&mut TimerCtx<'_>) + 'static,
        Self: Sized,
    {
        self.create(TimerSpec::one_shot(delay, callback).unit(unit))
    }

    /// Fires after `start_delay` every `period` until `total_play_time` has passed,
    /// then stops and runs `on_complete`.
    ///
    /// `on_complete` is taken boxed so `None` needs no type annotation. To pass a plain
    /// closure, build the timer with [`TimerSpec::bounded`] and
    /// [`TimerSpec::on_complete`] and register it through [`create`](Self::create).
    fn create_bounded_timer<F>(
        &mut self,
        callback: F,
        start_delay: f32,
        total_play_time: f32,
        period: f32,
        on_complete: Option<CompletionCallback>,
        unit: TimeUnit,
    ) -> Result<TimerId, TimerError>
    where
        F: FnMut(&mut TimerCtx<'_>) + 'static,
        Self: Sized,
    {
        let mut spec =
            TimerSpec::bounded(start_delay, total_play_time, period, callback).unit(unit);
        if let TimerKind::Bounded { on_complete: slot, .. } = &mut spec.kind {
            *slot = on_complete;
        }
        self.create(spec)
    }
}

/// Changes requested from inside a callback.
///
/// Buffered and applied by the registry once the callback returns.
pub(crate) enum Command {
    Stop(TimerId),
    Create(Timer),
}

/// Context handed to timer callbacks.
///
/// Exposes the firing timer's clock and lets the callback stop timers (itself included)
/// or schedule new ones without touching the registry while it is being iterated.
pub struct TimerCtx<'a> {
    status: TimerStatus,
    next_id: &'a mut u64,
    commands: Vec<Command>,
}

impl<'a> TimerCtx<'a> {
    pub(crate) fn new(status: TimerStatus, next_id: &'a mut u64) -> Self {
        Self {
            status,
            next_id,
            commands: Vec::new(),
        }
    }

    pub(crate) fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    /// Id of the timer being invoked.
    #[inline]
    pub fn id(&self) -> TimerId {
        self.status.id
    }

    /// Clock of the invoked timer as of this invocation (countdown not yet replenished).
    #[inline]
    pub fn status(&self) -> &TimerStatus {
        &self.status
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.status.elapsed
    }

    /// Progress fraction of a bounded timer.
    #[inline]
    pub fn progress(&self) -> Option<f32> {
        self.status.progress
    }

    /// Stops the invoked timer. It will not fire again.
    pub fn stop(&mut self) {
        let id = self.id();
        self.stop_timer(id);
    }

    /// Stops any timer. A timer later in this tick's order will not fire this tick.
    pub fn stop_timer(&mut self, id: TimerId) {
        self.commands.push(Command::Stop(id));
    }
}

impl Scheduler for TimerCtx<'_> {
    /// Timers created here are registered as soon as the callback returns and first
    /// advance on the following tick.
    fn create(&mut self, spec: TimerSpec) -> Result<TimerId, TimerError> {
        spec.kind.validate()?;
        let id = TimerId::next(self.next_id);
        self.commands.push(Command::Create(Timer::new(id, spec)));
        Ok(id)
    }
}
