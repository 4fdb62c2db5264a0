// cleanchat-core/src/verdict.rs
//! Detection outcomes and helpers for logging message text safely.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// Whether offending text may appear verbatim in debug logs.
    static ref TEXT_DEBUG_ALLOWED: bool = {
        std::env::var("CLEANCHAT_ALLOW_DEBUG_TEXT")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Which detection step fired, and on which lexicon word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum MatchReason {
    /// A short word occurs as a substring.
    ShortWord { word: String },
    /// The exact whole-word matcher fired.
    Exact { word: String },
    /// The confusable-expanded matcher fired.
    Confusable { word: String },
    /// A token's lemma is a lexicon word.
    Lemma { word: String, token: String },
    /// A token's surface form is a lexicon word.
    Surface { word: String },
    /// A token is within the edit-distance threshold of a lexicon word.
    Fuzzy { word: String, token: String, distance: usize },
}

impl MatchReason {
    /// The lexicon word responsible for the match.
    pub fn word(&self) -> &str {
        match self {
            MatchReason::ShortWord { word }
            | MatchReason::Exact { word }
            | MatchReason::Confusable { word }
            | MatchReason::Lemma { word, .. }
            | MatchReason::Surface { word }
            | MatchReason::Fuzzy { word, .. } => word,
        }
    }

    /// Stable step name, as used in reports.
    pub fn step(&self) -> &'static str {
        match self {
            MatchReason::ShortWord { .. } => "short_word",
            MatchReason::Exact { .. } => "exact",
            MatchReason::Confusable { .. } => "confusable",
            MatchReason::Lemma { .. } => "lemma",
            MatchReason::Surface { .. } => "surface",
            MatchReason::Fuzzy { .. } => "fuzzy",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::Lemma { word, token } => write!(f, "lemma of '{}' is '{}'", token, word),
            MatchReason::Fuzzy { word, token, distance } => {
                write!(f, "'{}' is {} edit(s) from '{}'", token, distance, word)
            }
            other => write!(f, "{} match on '{}'", other.step(), other.word()),
        }
    }
}

/// The outcome of classifying one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(default)]
    pub reason: Option<MatchReason>,
}

impl Verdict {
    pub fn clean() -> Self {
        Self { reason: None }
    }

    pub fn banned(reason: MatchReason) -> Self {
        Self { reason: Some(reason) }
    }

    pub fn is_banned(&self) -> bool {
        self.reason.is_some()
    }
}

/// Masks message text for logs.
pub fn mask_text(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[MASKED]".to_string()
    } else {
        format!("[MASKED: {} chars]", len)
    }
}

/// Text as it may appear in debug logs.
pub fn loggable_text(text: &str) -> String {
    if *TEXT_DEBUG_ALLOWED {
        text.to_string()
    } else {
        mask_text(text)
    }
}

pub fn log_verdict_debug(module_path: &str, text: &str, verdict: &Verdict) {
    match &verdict.reason {
        Some(reason) => debug!("{} Banned text '{}': {}", module_path, loggable_text(text), reason),
        None => debug!("{} Clean text '{}'", module_path, loggable_text(text)),
    }
}
