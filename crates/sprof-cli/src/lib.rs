//! Session profile command-line tools
//!
//! File-level operations behind the `sprof` binary. Each command reads a
//! profile document from disk, runs it through [`sprof_profile`] and writes
//! its report to the given writer, so the binary only parses arguments and
//! maps outcomes to exit codes.

#![warn(unreachable_pub)]

pub mod commands;
pub mod config;

pub use config::CliConfig;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
