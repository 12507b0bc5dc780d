//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per loop
//! - call `tick()` once per frame to obtain `FrameTime`
//! - feed `FrameTime::dt` to `TimerRegistry::tick`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
