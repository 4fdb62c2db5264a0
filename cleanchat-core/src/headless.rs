// cleanchat-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for one-shot classification without a long-lived
//! engine. Builds the lexicon (including the network fetch, unless offline),
//! compiles patterns and classifies a single string.

use anyhow::Result;
use crate::config::FilterConfig;
use crate::engine::ModerationEngine;
use crate::engines::layered_engine::LayeredEngine;
use crate::engines::pattern_engine::PatternEngine;
use crate::lexicon::build_lexicon;
use crate::verdict::Verdict;

/// Selects which engine classifies in headless mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessEngineType {
    Pattern,
    Layered,
}

/// Builds an engine from `config` and classifies `text` once.
///
/// # Arguments
///
/// * `config` - Filter configuration (lexicon source, patterns, model).
/// * `text` - The message to classify.
/// * `engine_type` - `Pattern` for lexical checks only, `Layered` to add
///   the linguistic step when a model is configured.
pub fn headless_classify(
    config: &FilterConfig,
    text: &str,
    engine_type: HeadlessEngineType,
) -> Result<Verdict> {
    let engine: Box<dyn ModerationEngine> = match engine_type {
        HeadlessEngineType::Pattern => {
            Box::new(PatternEngine::with_config(build_lexicon(&config.lexicon), &config.patterns)?)
        }
        HeadlessEngineType::Layered => Box::new(LayeredEngine::from_config(config)?),
    };

    Ok(engine.classify(text))
}
