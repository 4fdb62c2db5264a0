// cleanchat-core/src/engines/layered_engine.rs
//! A `ModerationEngine` that runs the pattern checks first and then, when a
//! lemmatizer is available, a lemma and edit-distance pass over the tokens.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::config::{FilterConfig, FuzzyConfig};
use crate::engine::ModerationEngine;
use crate::engines::pattern_engine::PatternEngine;
use crate::fuzzy::nearest_within;
use crate::lexicon::{build_lexicon, Lexicon};
use crate::normalizer::{Lemmatizer, Normalizer};
use crate::patterns::compiler::CompiledPatterns;
use crate::verdict::{log_verdict_debug, MatchReason, Verdict};

#[derive(Debug, Clone)]
pub struct LayeredEngine {
    patterns: PatternEngine,
    normalizer: Normalizer,
    fuzzy: FuzzyConfig,
}

impl LayeredEngine {
    /// Builds an engine with default pattern and fuzzy settings.
    pub fn new(lexicon: Lexicon, normalizer: Normalizer) -> Result<Self> {
        Self::with_config(lexicon, normalizer, &FilterConfig::default())
    }

    pub fn with_config(lexicon: Lexicon, normalizer: Normalizer, config: &FilterConfig) -> Result<Self> {
        debug!(
            "Initializing LayeredEngine (normalizer available: {}, max distance: {}).",
            normalizer.is_available(),
            config.fuzzy.max_distance
        );
        Ok(Self {
            patterns: PatternEngine::with_config(lexicon, &config.patterns)?,
            normalizer,
            fuzzy: config.fuzzy.clone(),
        })
    }

    /// Builds lexicon, normalizer and patterns from configuration.
    ///
    /// Performs the blocking lexicon fetch; inside an async runtime call it
    /// from `spawn_blocking`.
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        let lexicon = build_lexicon(&config.lexicon);
        let normalizer = Normalizer::load(&config.normalizer);
        Self::with_config(lexicon, normalizer, config)
            .context("Failed to build LayeredEngine from configuration")
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    fn check_tokens(&self, lemmatizer: &dyn Lemmatizer, lowered: &str) -> Option<MatchReason> {
        let tokens = match lemmatizer.lemmatize(lowered) {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!("Lemmatizer '{}' failed, skipping linguistic step: {}", lemmatizer.name(), e);
                return None;
            }
        };

        let lexicon = self.patterns.lexicon();
        for token in &tokens {
            if lexicon.contains(&token.lemma) {
                return Some(if token.lemma == token.text {
                    MatchReason::Surface { word: token.text.clone() }
                } else {
                    MatchReason::Lemma { word: token.lemma.clone(), token: token.text.clone() }
                });
            }
            if lexicon.contains(&token.text) {
                return Some(MatchReason::Surface { word: token.text.clone() });
            }
            if token.len() > self.fuzzy.min_token_len {
                if let Some(hit) = nearest_within(&token.text, lexicon.words(), self.fuzzy.max_distance) {
                    return Some(MatchReason::Fuzzy {
                        word: hit.word.to_string(),
                        token: token.text.clone(),
                        distance: hit.distance,
                    });
                }
            }
        }
        None
    }
}

impl ModerationEngine for LayeredEngine {
    fn classify(&self, text: &str) -> Verdict {
        let lowered = text.to_lowercase();

        let mut reason = self.patterns.check_patterns(&lowered);
        if reason.is_none() && lowered.chars().count() > self.fuzzy.min_text_len {
            if let Some(lemmatizer) = self.normalizer.lemmatizer() {
                reason = self.check_tokens(lemmatizer, &lowered);
            }
        }

        let verdict = match reason {
            Some(reason) => Verdict::banned(reason),
            None => Verdict::clean(),
        };
        log_verdict_debug(module_path!(), text, &verdict);
        verdict
    }

    fn lexicon(&self) -> &Lexicon { self.patterns.lexicon() }
    fn compiled_patterns(&self) -> &CompiledPatterns { self.patterns.compiled_patterns() }
    fn normalizer_available(&self) -> bool { self.normalizer.is_available() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CleanchatError;
    use crate::lexicon::LexiconSource;
    use crate::normalizer::{DictionaryLemmatizer, Token};
    use std::sync::Arc;

    struct FailingLemmatizer;

    impl Lemmatizer for FailingLemmatizer {
        fn name(&self) -> &str { "failing" }
        fn lemmatize(&self, _text: &str) -> Result<Vec<Token>, CleanchatError> {
            Err(CleanchatError::Lemmatization("model crashed".to_string()))
        }
    }

    fn lexicon(words: &[&str]) -> Lexicon {
        Lexicon::from_words(words.iter().copied(), LexiconSource::Custom)
    }

    fn dictionary(entries: &[(&str, &str)]) -> Normalizer {
        Normalizer::with_lemmatizer(Arc::new(DictionaryLemmatizer::from_entries(entries.iter().copied())))
    }

    #[test]
    fn test_lemma_match() {
        let engine = LayeredEngine::new(lexicon(&["мудак"]), dictionary(&[("мудаками", "мудак")])).unwrap();
        assert_eq!(
            engine.classify("с мудаками").reason,
            Some(MatchReason::Lemma { word: "мудак".into(), token: "мудаками".into() })
        );
    }

    #[test]
    fn test_fuzzy_distance_one_bans() {
        let engine = LayeredEngine::new(lexicon(&["мудак"]), dictionary(&[])).unwrap();
        assert_eq!(
            engine.classify("ну ты мудаг").reason,
            Some(MatchReason::Fuzzy { word: "мудак".into(), token: "мудаг".into(), distance: 1 })
        );
    }

    #[test]
    fn test_fuzzy_distance_two_is_clean() {
        let engine = LayeredEngine::new(lexicon(&["мудак"]), dictionary(&[])).unwrap();
        assert!(!engine.is_banned("ну ты мудюга"));
    }

    #[test]
    fn test_short_tokens_skip_fuzzy() {
        // "сук" is one edit from "сука" but only three characters long.
        let engine = LayeredEngine::new(lexicon(&["сука"]), dictionary(&[])).unwrap();
        assert!(!engine.is_banned("ах ты сук"));
    }

    #[test]
    fn test_short_text_skips_linguistic_step() {
        let engine = LayeredEngine::new(lexicon(&["мудак"]), dictionary(&[("муд", "мудак")])).unwrap();
        assert!(!engine.is_banned("муд"));
        assert!(engine.is_banned("муд!"));
    }

    #[test]
    fn test_lemmatizer_failure_degrades_to_patterns() {
        let normalizer = Normalizer::with_lemmatizer(Arc::new(FailingLemmatizer));
        let engine = LayeredEngine::new(lexicon(&["мудак"]), normalizer).unwrap();
        assert!(!engine.is_banned("ну ты мудаг"));
        assert!(engine.is_banned("ну ты мудак"));
    }

    #[test]
    fn test_unavailable_normalizer_is_pattern_only() {
        let engine = LayeredEngine::new(lexicon(&["мудак"]), Normalizer::unavailable("test")).unwrap();
        assert!(!engine.normalizer_available());
        assert!(!engine.is_banned("ну ты мудаг"));
    }

    #[test]
    fn test_empty_and_blank_text_is_clean() {
        let engine = LayeredEngine::new(lexicon(&["мудак", "еб"]), dictionary(&[])).unwrap();
        assert!(!engine.is_banned(""));
        assert!(!engine.is_banned(" "));
    }
}
