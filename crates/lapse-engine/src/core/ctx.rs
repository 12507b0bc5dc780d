use crate::time::FrameTime;
use crate::timers::TimerRegistry;

/// Per-frame context passed to `core::App::on_frame`.
///
/// `'a` is the duration of the callback invocation.
pub struct FrameCtx<'a> {
    pub time:   FrameTime,
    pub timers: &'a mut TimerRegistry,
}

impl<'a> FrameCtx<'a> {
    /// Delta time of this frame, in seconds.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.time.dt
    }

    /// Index of this frame, starting at zero.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.time.frame_index
    }
}
