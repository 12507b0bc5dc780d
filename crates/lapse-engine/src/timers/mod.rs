//! Frame-driven timers.
//!
//! A [`TimerRegistry`] holds repeating, one-shot and bounded timers and advances them
//! once per frame through [`TimerRegistry::tick`]. Timers count either seconds or whole
//! frames ([`TimeUnit`]).
//!
//! Intended usage:
//! - create one registry at startup (the runtime owns one and exposes it through
//!   [`FrameCtx::timers`](crate::core::FrameCtx::timers))
//! - register timers through the [`Scheduler`] trait
//! - call `tick(dt)` once per frame
//!
//! Callbacks receive a [`TimerCtx`] instead of the registry. Stops and new timers
//! requested from a callback are buffered and applied by the registry, so iteration
//! stays stable while timers remove themselves.
//!
//! ```
//! use lapse_engine::timers::{Scheduler, TimeUnit, TimerRegistry};
//!
//! let mut timers = TimerRegistry::new();
//! timers
//!     .create_one_shot_timer(|_| println!("boom"), 3.0, TimeUnit::Frames)
//!     .unwrap();
//!
//! for _ in 0..4 {
//!     timers.tick(1.0 / 60.0);
//! }
//! assert!(timers.is_empty());
//! ```

mod ctx;
mod error;
mod registry;
mod spec;
mod timer;

pub use ctx::{Scheduler, TimerCtx};
pub use error::TimerError;
pub use registry::TimerRegistry;
pub use spec::{CompletionCallback, TimeUnit, TimerCallback, TimerKind, TimerSpec};
pub use timer::{TimerId, TimerStatus};
