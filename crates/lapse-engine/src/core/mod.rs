//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (frame loop)
//! and the host application, and the per-frame context through which the host
//! reaches its timer registry.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
