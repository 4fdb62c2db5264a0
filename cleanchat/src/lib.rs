// cleanchat/src/lib.rs
//! # CleanChat CLI Application
//!
//! Command-line host for the `cleanchat-core` detection engine. It stands in
//! for a chat platform: messages arrive as arguments, stdin lines or a file,
//! verdicts and violator reports go to stdout, logs go to stderr.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

pub use commands::run;
