//! dictionary.rs - A table-driven lemmatizer.
//!
//! The model artifact is a UTF-8 text file of `surface<TAB>lemma` lines,
//! e.g. an export of a morphological dictionary. Blank lines and lines
//! starting with `#` are ignored. Unknown words lemmatize to themselves.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

use super::{Lemmatizer, Token};
use crate::errors::CleanchatError;

static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("token pattern is valid"));

/// Splits text into maximal runs of Unicode word characters.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_REGEX.find_iter(text).map(|m| m.as_str())
}

/// Lemmatizer backed by an in-memory surface → lemma table.
#[derive(Debug, Clone, Default)]
pub struct DictionaryLemmatizer {
    entries: HashMap<String, String>,
}

impl DictionaryLemmatizer {
    /// Builds a lemmatizer from `(surface, lemma)` pairs, lowercasing both.
    pub fn from_entries<I, S, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, L)>,
        S: AsRef<str>,
        L: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(s, l)| (s.as_ref().trim().to_lowercase(), l.as_ref().trim().to_lowercase()))
            .filter(|(s, l)| !s.is_empty() && !l.is_empty())
            .collect();
        Self { entries }
    }

    /// Parses the tab-separated model format.
    pub fn parse(text: &str) -> Self {
        let mut pairs = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('\t') {
                Some((surface, lemma)) => pairs.push((surface, lemma)),
                None => debug!("Skipping malformed model line {}.", line_no + 1),
            }
        }
        Self::from_entries(pairs)
    }

    /// Reads a model file. A file without any valid entry is a load failure.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CleanchatError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CleanchatError::ModelLoad(path.display().to_string(), e.to_string()))?;
        let lemmatizer = Self::parse(&text);
        if lemmatizer.is_empty() {
            return Err(CleanchatError::ModelLoad(
                path.display().to_string(),
                "model contains no entries".to_string(),
            ));
        }
        Ok(lemmatizer)
    }

    /// Lemma for one lowercased word, or the word itself when unknown.
    pub fn lemma_of<'a>(&'a self, word: &'a str) -> &'a str {
        self.entries.get(word).map(String::as_str).unwrap_or(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn name(&self) -> &str {
        "dictionary"
    }

    fn lemmatize(&self, text: &str) -> Result<Vec<Token>, CleanchatError> {
        Ok(tokenize(text)
            .map(|surface| {
                let lowered = surface.to_lowercase();
                let lemma = self.lemma_of(&lowered).to_string();
                Token::new(lowered, lemma)
            })
            .collect())
    }
}
