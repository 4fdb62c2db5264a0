// cleanchat-lexis/src/scanner/mod.rs
//! Single-pass containment scanner for short banned words.
//!
//! Short words are matched as raw substrings, with no boundary checks at
//! all. A short word hidden inside an unrelated longer word is therefore
//! reported too; callers accept that trade-off in exchange for catching
//! glued-on variants.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use daachorse::errors::DaachorseError;
use daachorse::DoubleArrayAhoCorasick;

/// Aho-Corasick automaton over the short-word set.
pub struct ShortWordScanner {
    automaton: Option<DoubleArrayAhoCorasick<u32>>,
    words: Vec<String>,
}

impl fmt::Debug for ShortWordScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortWordScanner")
         .field("automaton", &"<DoubleArrayAhoCorasick>")
         .field("words", &self.words)
         .finish()
    }
}

impl ShortWordScanner {
    /// Builds the automaton. Empty strings and repeats are dropped, first
    /// occurrence wins, because the automaton rejects duplicate patterns.
    pub fn new<I, S>(words: I) -> Result<Self, DaachorseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for word in words {
            let word = word.as_ref();
            if !word.is_empty() && !unique.iter().any(|w| w == word) {
                unique.push(String::from(word));
            }
        }

        let automaton = if unique.is_empty() {
            None
        } else {
            Some(DoubleArrayAhoCorasick::new(unique.iter().map(String::as_str))?)
        };

        Ok(Self { automaton, words: unique })
    }

    /// Returns the first short word (by position in `text`) contained in it.
    pub fn find_first(&self, text: &str) -> Option<&str> {
        let automaton = self.automaton.as_ref()?;
        automaton
            .find_iter(text)
            .next()
            .and_then(|m| self.words.get(m.value() as usize))
            .map(String::as_str)
    }

    /// True when any short word is a substring of `text`.
    pub fn contains_any(&self, text: &str) -> bool {
        self.find_first(text).is_some()
    }

    /// The scanned words in insertion order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
