//! Logging utilities.
//!
//! This module centralizes logger initialization. Library code only uses the `log`
//! facade; `env_logger` is wired up here for hosts that want it.

mod init;

pub use init::{init_logging, LoggingConfig};
