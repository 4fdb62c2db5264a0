// cleanchat-core/src/engine.rs
//! Defines the core ModerationEngine trait.
//!
//! The `ModerationEngine` trait decouples hosts (CLI, chat adapters) from
//! the concrete detection pipeline. Every engine is immutable after
//! construction and `Send + Sync`, so a single instance can be shared via
//! `Arc` and called concurrently without locking.
//!
//! License: MIT OR APACHE 2.0

use crate::lexicon::Lexicon;
use crate::patterns::compiler::CompiledPatterns;
use crate::verdict::Verdict;

/// Classifies message text as banned or clean.
pub trait ModerationEngine: Send + Sync {
    /// Classifies `text`, reporting which step matched.
    ///
    /// Never fails and never panics on any UTF-8 input; empty and
    /// whitespace-only text is clean.
    fn classify(&self, text: &str) -> Verdict;

    /// Boolean form of [`ModerationEngine::classify`].
    fn is_banned(&self, text: &str) -> bool {
        self.classify(text).is_banned()
    }

    /// The lexicon the engine was compiled from.
    fn lexicon(&self) -> &Lexicon;

    /// The compiled matchers and short-word set.
    fn compiled_patterns(&self) -> &CompiledPatterns;

    /// Whether the linguistic step can run.
    fn normalizer_available(&self) -> bool;
}
