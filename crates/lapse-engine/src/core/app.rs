use crate::timers::TimerRegistry;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by hosts of the runtime.
pub trait App {
    /// Called once before the first frame. Typical place to register long-lived timers.
    fn on_start(&mut self, timers: &mut TimerRegistry) {
        let _ = timers;
    }

    /// Called once per frame, before the frame's timers are ticked.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Called once after the last frame.
    fn on_exit(&mut self) {}
}
