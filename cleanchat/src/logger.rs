// cleanchat/src/logger.rs
//! Logging setup for the CLI.
//!
//! All log output goes to stderr so stdout carries only verdicts and reports.
//! License: MIT OR Apache-2.0

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes the global logger.
///
/// An explicit `level` overrides `RUST_LOG`; otherwise `RUST_LOG` applies,
/// falling back to `warn`. Repeated calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = match level {
        Some(level) => {
            let mut builder = Builder::new();
            builder.filter_level(level);
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or("warn")),
    };
    builder
        .target(Target::Stderr)
        .format_timestamp(None)
        .try_init()
        .ok();
}

/// Maps the `-q` / `-d` flags to a level override.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
