// cleanchat-core/src/lib.rs
//! # CleanChat Core Library
//!
//! `cleanchat-core` provides the platform-independent logic for deciding
//! whether a chat message contains banned (profane) content. It builds a
//! ban-list, compiles obfuscation-tolerant matchers from it, and runs a
//! layered detection pipeline: short-word containment, whole-word regex
//! matchers, then an optional lemma and edit-distance pass.
//!
//! The library performs no chat-platform I/O. Its only network access is
//! the one-time lexicon fetch in [`build_lexicon`], which always falls back
//! to an embedded list.
//!
//! ## Modules
//!
//! * `config`: `FilterConfig` and its sections, YAML loading and validation.
//! * `lexicon`: Builds the ban-list from a remote source or the embedded list.
//! * `patterns`: Compiles the lexicon into short-word and regex matchers.
//! * `normalizer`: The optional tokenization and lemmatization capability.
//! * `fuzzy`: Edit-distance lookup against the lexicon.
//! * `engine`: Defines the `ModerationEngine` trait.
//! * `engines`: `PatternEngine` and `LayeredEngine`.
//! * `verdict`: Detection outcomes and text masking for logs.
//! * `violations`: Per-author counters and the in-memory audit log.
//! * `audit_log`: Optional JSON-lines export of violation records.
//! * `moderation`: Glue that classifies incoming messages and records violations.
//! * `headless`: One-shot classification.
//!
//! ## Usage Example
//!
//! ```rust
//! use cleanchat_core::{FilterConfig, LayeredEngine, ModerationEngine};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Start from the embedded defaults, without touching the network.
//!     let mut config = FilterConfig::load_default()?;
//!     config.lexicon.offline = true;
//!
//!     // 2. Build the engine once; it is cheap to share behind an Arc.
//!     let engine = LayeredEngine::from_config(&config)?;
//!
//!     // 3. Classify messages.
//!     assert!(engine.is_banned("какая залупа"));
//!     assert!(!engine.is_banned("unrelated safe text"));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Classification never fails. Lexicon, model and per-message analysis
//! failures are recovered where they happen and logged; `CleanchatError`
//! types them for the recovery sites. Setup functions return `anyhow::Result`.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod audit_log;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod fuzzy;
pub mod headless;
pub mod lexicon;
pub mod moderation;
pub mod normalizer;
pub mod patterns;
pub mod verdict;
pub mod violations;

/// Re-exports the configuration types.
pub use config::{
    config_candidate_paths,
    find_user_config,
    merge_config,
    FilterConfig,
    FuzzyConfig,
    LexiconConfig,
    NormalizerConfig,
    PatternConfig,
    ReportingConfig,
};

pub use errors::CleanchatError;

pub use engine::ModerationEngine;
pub use engines::layered_engine::LayeredEngine;
pub use engines::pattern_engine::PatternEngine;

pub use lexicon::{build_lexicon, fetch_remote_words, Lexicon, LexiconSource};

pub use patterns::compiler::{compile_patterns, get_or_compile_patterns, CompiledPatterns, Matcher, MatcherKind};

pub use normalizer::{DictionaryLemmatizer, Lemmatizer, Normalizer, Token};

pub use verdict::{MatchReason, Verdict};

pub use violations::{format_log_entry, AuthorId, ViolationRecord, ViolationTracker};

pub use audit_log::AuditLog;

pub use moderation::{IncomingMessage, ModerationSummary, Moderator};

pub use headless::{headless_classify, HeadlessEngineType};
