// cleanchat-core/src/engines/pattern_engine.rs
//! A `ModerationEngine` that uses only short-word containment and the
//! compiled regex matchers.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::PatternConfig;
use crate::engine::ModerationEngine;
use crate::lexicon::Lexicon;
use crate::patterns::compiler::{get_or_compile_patterns, CompiledPatterns, MatcherKind};
use crate::verdict::{log_verdict_debug, MatchReason, Verdict};

#[derive(Debug, Clone)]
pub struct PatternEngine {
    lexicon: Arc<Lexicon>,
    patterns: Arc<CompiledPatterns>,
}

impl PatternEngine {
    pub fn new(lexicon: Lexicon) -> Result<Self> {
        Self::with_config(lexicon, &PatternConfig::default())
    }

    pub fn with_config(lexicon: Lexicon, config: &PatternConfig) -> Result<Self> {
        let patterns = get_or_compile_patterns(&lexicon, config)
            .context("Failed to compile lexicon patterns for PatternEngine")?;

        Ok(Self {
            lexicon: Arc::new(lexicon),
            patterns,
        })
    }

    /// Short-word containment, then every matcher in order. Expects
    /// already-lowercased text.
    pub(crate) fn check_patterns(&self, lowered: &str) -> Option<MatchReason> {
        if let Some(word) = self.patterns.short_words.find_in(lowered) {
            return Some(MatchReason::ShortWord { word: word.to_string() });
        }

        self.patterns
            .matchers
            .iter()
            .find(|m| m.is_match(lowered))
            .map(|m| match m.kind {
                MatcherKind::Exact => MatchReason::Exact { word: m.word.clone() },
                MatcherKind::Confusable => MatchReason::Confusable { word: m.word.clone() },
            })
    }
}

impl ModerationEngine for PatternEngine {
    fn classify(&self, text: &str) -> Verdict {
        let lowered = text.to_lowercase();
        let verdict = match self.check_patterns(&lowered) {
            Some(reason) => Verdict::banned(reason),
            None => Verdict::clean(),
        };
        log_verdict_debug(module_path!(), text, &verdict);
        verdict
    }

    fn lexicon(&self) -> &Lexicon { &self.lexicon }
    fn compiled_patterns(&self) -> &CompiledPatterns { &self.patterns }
    fn normalizer_available(&self) -> bool { false }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconSource;

    fn engine(words: &[&str]) -> PatternEngine {
        PatternEngine::new(Lexicon::from_words(words.iter().copied(), LexiconSource::Custom)).unwrap()
    }

    #[test]
    fn test_short_word_checked_before_patterns() {
        let engine = engine(&["еб", "ебаный"]);
        let verdict = engine.classify("ЕБАНЫЙ стыд");
        assert_eq!(verdict.reason, Some(MatchReason::ShortWord { word: "еб".into() }));
    }

    #[test]
    fn test_exact_before_confusable() {
        let engine = engine(&["залупа"]);
        assert_eq!(
            engine.classify("какая залупа").reason,
            Some(MatchReason::Exact { word: "залупа".into() })
        );
        assert_eq!(
            engine.classify("какая зaлуп@").reason,
            Some(MatchReason::Confusable { word: "залупа".into() })
        );
    }

    #[test]
    fn test_uppercase_input_is_lowered() {
        assert!(engine(&["мудак"]).is_banned("МУДАК"));
    }

    #[test]
    fn test_pattern_engine_has_no_normalizer() {
        let engine = engine(&["мудак"]);
        assert!(!engine.normalizer_available());
        assert!(!engine.is_banned("мудаг"));
    }
}
