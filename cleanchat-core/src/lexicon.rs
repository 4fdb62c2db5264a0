//! lexicon.rs - Builds the ban-list every other component is derived from.
//!
//! The lexicon is fetched once at startup from a newline-delimited remote
//! list. Whatever happens on the network, `build_lexicon` returns a usable
//! lexicon: failures fall back to the embedded base list and are only
//! logged. The supplementary list and configured extra words are merged in
//! both cases.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info, warn};
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use cleanchat_lexis::char_len;

use crate::config::LexiconConfig;
use crate::errors::CleanchatError;

/// Words longer than this are rejected, so every lexicon entry compiles.
pub const MAX_WORD_LENGTH: usize = 64;

const LEXICON_USER_AGENT: &str = concat!("cleanchat/", env!("CARGO_PKG_VERSION"));

/// Where the base word list came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LexiconSource {
    /// Fetched successfully from this URL.
    Remote { url: String },
    /// The embedded base list, with the reason the remote list was not used.
    Embedded { reason: String },
    /// Supplied directly by the caller.
    Custom,
}

/// The canonical set of banned word forms.
///
/// Holds both a set for membership tests and the first-seen ordered list
/// used to generate patterns deterministically. Immutable once built.
#[derive(Debug, Clone)]
pub struct Lexicon {
    set: HashSet<String>,
    words: Vec<String>,
    source: LexiconSource,
}

impl Lexicon {
    /// Normalizes and deduplicates `words`, keeping first-seen order.
    pub fn from_words<I, S>(words: I, source: LexiconSource) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        let mut ordered = Vec::new();
        for raw in words {
            if let Some(word) = normalize_word(raw.as_ref()) {
                if set.insert(word.clone()) {
                    ordered.push(word);
                }
            }
        }
        Self { set, words: ordered, source }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word)
    }

    /// Words in first-seen order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn set(&self) -> &HashSet<String> {
        &self.set
    }

    pub fn source(&self) -> &LexiconSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Stable hash of the ordered word list.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.words.hash(&mut hasher);
        hasher.finish()
    }
}

/// Trims and lowercases one entry. Empty and oversized entries yield `None`.
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    if word.is_empty() {
        return None;
    }
    if char_len(&word) > MAX_WORD_LENGTH {
        warn!(
            "Skipping lexicon entry of {} characters (limit is {}).",
            char_len(&word),
            MAX_WORD_LENGTH
        );
        return None;
    }
    Some(word)
}

/// Parses a newline-delimited word list body.
pub fn parse_word_list(body: &str) -> Vec<String> {
    body.split('\n').filter_map(normalize_word).collect()
}

fn parse_embedded_list(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter_map(normalize_word)
        .collect()
}

/// The hand-curated list used when the remote list is unavailable.
pub fn embedded_base_words() -> Vec<String> {
    parse_embedded_list(include_str!("../config/base_words.txt"))
}

/// Slang, misspellings and obfuscated variants merged into every lexicon.
pub fn supplementary_words() -> Vec<String> {
    parse_embedded_list(include_str!("../config/supplementary_words.txt"))
}

/// Fetches and parses the remote word list with one bounded GET.
///
/// Uses the blocking client; call it from a blocking context (e.g.
/// `tokio::task::spawn_blocking`) when running inside an async runtime.
pub fn fetch_remote_words(url: &str, timeout: Duration) -> Result<Vec<String>, CleanchatError> {
    debug!("Fetching lexicon from {} (timeout {:?}).", url, timeout);

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(LEXICON_USER_AGENT)
        .build()
        .map_err(|e| CleanchatError::LexiconFetch(url.to_string(), e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| CleanchatError::LexiconFetch(url.to_string(), e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CleanchatError::LexiconStatus(url.to_string(), status.as_u16()));
    }

    let body = response
        .text()
        .map_err(|e| CleanchatError::LexiconFetch(url.to_string(), e.to_string()))?;

    let words = parse_word_list(&body);
    if words.is_empty() {
        return Err(CleanchatError::EmptyLexicon(url.to_string()));
    }
    Ok(words)
}

/// Builds the lexicon. Never fails: any fetch problem falls back to the
/// embedded base list.
pub fn build_lexicon(config: &LexiconConfig) -> Lexicon {
    let (base, source) = match config.effective_url() {
        Some(url) => match fetch_remote_words(url, config.timeout()) {
            Ok(words) => {
                info!("Fetched {} words from {}.", words.len(), url);
                (words, LexiconSource::Remote { url: url.to_string() })
            }
            Err(e) => {
                warn!("Lexicon fetch failed, using embedded list: {}", e);
                (embedded_base_words(), LexiconSource::Embedded { reason: e.to_string() })
            }
        },
        None => {
            debug!("No lexicon URL in effect, using embedded list.");
            (
                embedded_base_words(),
                LexiconSource::Embedded { reason: "offline".to_string() },
            )
        }
    };

    let lexicon = Lexicon::from_words(
        base.into_iter()
            .chain(supplementary_words())
            .chain(config.extra_words.iter().cloned()),
        source,
    );
    info!("Loaded {} banned words.", lexicon.len());
    lexicon
}
