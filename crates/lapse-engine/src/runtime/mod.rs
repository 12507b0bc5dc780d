//! Headless frame loop.
//!
//! Owns the frame clock and the timer registry and drives a `core::App` until it
//! asks to exit. Hosts with their own loop skip this and call
//! `TimerRegistry::tick` directly.

mod headless;

pub use headless::{ClockMode, RunSummary, Runtime, RuntimeConfig};
