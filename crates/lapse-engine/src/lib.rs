//! Lapse engine crate.
//!
//! Frame-driven timers plus the small runtime pieces needed to drive them:
//! a frame clock, an application contract and a headless frame loop.

pub mod core;
pub mod runtime;
pub mod time;
pub mod timers;

pub mod logging;
