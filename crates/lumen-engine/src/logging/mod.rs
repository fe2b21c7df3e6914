//! Logging setup.
//!
//! The crate logs through the `log` facade only. `init_logging` installs an
//! `env_logger` backend for applications that have not set up their own.

mod init;

pub use init::{init_logging, logger_builder, LoggingConfig};
