//! errors.rs - Custom error types for the cleanchat-core library.
//!
//! Most of these never reach a caller of the detection engine: lexicon,
//! model and per-message analysis failures are recovered where they occur
//! and only logged. They are still typed so the recovery sites can log a
//! precise reason and tests can assert on it.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types in the `cleanchat-core` library.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CleanchatError {
    #[error("Failed to fetch lexicon from '{0}': {1}")]
    LexiconFetch(String, String),

    #[error("Lexicon source '{0}' answered with HTTP status {1}")]
    LexiconStatus(String, u16),

    #[error("Lexicon source '{0}' returned no usable words")]
    EmptyLexicon(String),

    #[error("Failed to compile matcher for word '{0}': {1}")]
    PatternCompilation(String, regex::Error),

    #[error("Failed to build short-word scanner: {0}")]
    ScannerBuild(String),

    #[error("Failed to load lemmatization model '{0}': {1}")]
    ModelLoad(String, String),

    #[error("Lemmatization failed: {0}")]
    Lemmatization(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
