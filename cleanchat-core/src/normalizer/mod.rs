//! The optional linguistic layer: tokenization and lemmatization.
//!
//! Lemmatization is an injectable capability. A `Normalizer` is either
//! `Available`, wrapping any `Lemmatizer` implementation, or `Unavailable`
//! with the reason it could not be loaded. The detection engine branches on
//! which one it holds; a missing model is never an error.
//!
//! License: MIT OR APACHE 2.0

use log::{info, warn};
use std::fmt;
use std::sync::Arc;

use crate::config::NormalizerConfig;
use crate::errors::CleanchatError;

pub mod dictionary;

pub use dictionary::{tokenize, DictionaryLemmatizer};

/// A single token with its surface form and dictionary form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token exactly as it appears in the (lowercased) text.
    pub text: String,
    /// Dictionary form; equals `text` for unknown words.
    pub lemma: String,
}

impl Token {
    pub fn new(text: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self { text: text.into(), lemma: lemma.into() }
    }

    /// Character count of the surface form.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Tokenizes a string and reduces each token to its lemma.
///
/// Implementations must be deterministic for a given input and produce one
/// lemma per token. Errors are treated by the engine as "no opinion" for
/// the message being analyzed.
pub trait Lemmatizer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn lemmatize(&self, text: &str) -> Result<Vec<Token>, CleanchatError>;
}

/// Presence or absence of the linguistic layer.
#[derive(Clone)]
pub enum Normalizer {
    Available(Arc<dyn Lemmatizer>),
    Unavailable { reason: String },
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Normalizer::Available(l) => f.debug_tuple("Available").field(&l.name()).finish(),
            Normalizer::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}

impl Normalizer {
    /// Wraps an existing lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Normalizer::Available(lemmatizer)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Normalizer::Unavailable { reason: reason.into() }
    }

    /// Loads the configured dictionary model. Never fails: a missing or
    /// unreadable model yields `Unavailable`.
    pub fn load(config: &NormalizerConfig) -> Self {
        let Some(path) = config.model_path.as_ref() else {
            info!("No lemmatization model configured; running pattern-only.");
            return Self::unavailable("no model configured");
        };

        match DictionaryLemmatizer::load(path) {
            Ok(lemmatizer) => {
                info!(
                    "Loaded lemmatization model '{}' with {} entries.",
                    path.display(),
                    lemmatizer.len()
                );
                Normalizer::Available(Arc::new(lemmatizer))
            }
            Err(e) => {
                warn!("Lemmatization unavailable, running pattern-only: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Normalizer::Available(_))
    }

    pub fn lemmatizer(&self) -> Option<&dyn Lemmatizer> {
        match self {
            Normalizer::Available(l) => Some(l.as_ref()),
            Normalizer::Unavailable { .. } => None,
        }
    }
}
