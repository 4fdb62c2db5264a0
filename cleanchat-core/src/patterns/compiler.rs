//! compiler.rs - Compiles a lexicon into short-word and regex matchers.
//!
//! Short words go into an Aho-Corasick containment scanner. Every other
//! word yields two whole-word matchers, exact first and confusable second.
//! Compiled sets are cached process-wide by lexicon fingerprint, so an
//! engine rebuilt over an unchanged lexicon shares the same `Arc`.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use cleanchat_lexis::confusables::class_of;
use cleanchat_lexis::scanner::ShortWordScanner;
use cleanchat_lexis::char_len;

use crate::config::PatternConfig;
use crate::errors::CleanchatError;
use crate::lexicon::Lexicon;

/// Compiled regex size ceiling per matcher.
const MATCHER_SIZE_LIMIT: usize = 1 << 20;

/// Which variant of a word a matcher recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    /// The literal word.
    Exact,
    /// The word with every character widened to its equivalence class.
    Confusable,
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatcherKind::Exact => write!(f, "exact"),
            MatcherKind::Confusable => write!(f, "confusable"),
        }
    }
}

/// One compiled whole-word matcher.
#[derive(Debug)]
pub struct Matcher {
    /// The lexicon word this matcher was built from.
    pub word: String,
    pub kind: MatcherKind,
    pub regex: Regex,
}

impl Matcher {
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// The short-word partition of the lexicon, checked by containment.
#[derive(Debug)]
pub struct ShortWordSet {
    scanner: ShortWordScanner,
}

impl ShortWordSet {
    /// First short word contained in `text`.
    pub fn find_in(&self, text: &str) -> Option<&str> {
        self.scanner.find_first(text)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.scanner.words().iter().any(|w| w == word)
    }

    pub fn words(&self) -> &[String] {
        self.scanner.words()
    }

    pub fn len(&self) -> usize {
        self.scanner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scanner.is_empty()
    }
}

/// Everything the pattern stage of detection needs, derived from one lexicon.
#[derive(Debug)]
pub struct CompiledPatterns {
    /// Matchers in compilation order: per word, exact then confusable.
    pub matchers: Vec<Matcher>,
    pub short_words: ShortWordSet,
}

impl CompiledPatterns {
    /// Number of distinct words covered by regex matchers.
    pub fn pattern_word_count(&self) -> usize {
        self.matchers.iter().filter(|m| m.kind == MatcherKind::Exact).count()
    }
}

lazy_static! {
    /// Process-wide cache keyed by lexicon fingerprint and pattern settings.
    static ref COMPILED_PATTERNS_CACHE: RwLock<HashMap<u64, Arc<CompiledPatterns>>> =
        RwLock::new(HashMap::new());
}

const BOUNDARY_START: &str = r"(?:^|\W)";
const BOUNDARY_END: &str = r"(?:\W|$)";

/// Pattern source for the literal word between whole-word boundaries.
///
/// `\w` is Unicode-aware, so Cyrillic letters are word characters. The
/// boundaries consume the neighbouring character; matchers are only ever
/// used for `is_match`, where that makes no difference.
pub fn exact_pattern(word: &str) -> String {
    format!("(?i){}{}{}", BOUNDARY_START, regex::escape(word), BOUNDARY_END)
}

/// Pattern source with every character widened to its equivalence class.
pub fn confusable_pattern(word: &str) -> String {
    let mut body = String::with_capacity(word.len() * 4);
    for c in word.chars() {
        match class_of(c) {
            Some(class) => {
                body.push('[');
                for member in class {
                    body.push_str(&regex::escape(&member.to_string()));
                }
                body.push(']');
            }
            None => body.push_str(&regex::escape(&c.to_string())),
        }
    }
    format!("(?i){}{}{}", BOUNDARY_START, body, BOUNDARY_END)
}

fn build_matcher(word: &str, kind: MatcherKind) -> Result<Matcher, CleanchatError> {
    let pattern = match kind {
        MatcherKind::Exact => exact_pattern(word),
        MatcherKind::Confusable => confusable_pattern(word),
    };
    let regex = RegexBuilder::new(&pattern)
        .size_limit(MATCHER_SIZE_LIMIT)
        .build()
        .map_err(|e| CleanchatError::PatternCompilation(word.to_string(), e))?;
    Ok(Matcher { word: word.to_string(), kind, regex })
}

/// Compiles an ordered word list into matchers and the short-word set.
pub fn compile_patterns(words: &[String], config: &PatternConfig) -> Result<CompiledPatterns, CleanchatError> {
    debug!("Starting compilation of {} words.", words.len());

    let mut matchers = Vec::with_capacity(words.len() * 2);
    let mut short = Vec::new();
    let mut compilation_errors = Vec::new();

    for word in words {
        if char_len(word) <= config.short_word_max_len {
            short.push(word.as_str());
            continue;
        }

        for kind in [MatcherKind::Exact, MatcherKind::Confusable] {
            match build_matcher(word, kind) {
                Ok(matcher) => matchers.push(matcher),
                Err(e) => compilation_errors.push(e),
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors.iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(CleanchatError::Fatal(format!(
            "Failed to compile {} matcher(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    let scanner = ShortWordScanner::new(short)
        .map_err(|e| CleanchatError::ScannerBuild(e.to_string()))?;

    debug!(
        "Finished compiling. {} matchers, {} short words.",
        matchers.len(),
        scanner.len()
    );
    Ok(CompiledPatterns {
        matchers,
        short_words: ShortWordSet { scanner },
    })
}

fn cache_key(lexicon: &Lexicon, config: &PatternConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    lexicon.fingerprint().hash(&mut hasher);
    config.hash(&mut hasher);
    hasher.finish()
}

/// Returns cached compiled patterns for `lexicon`, compiling on first use.
pub fn get_or_compile_patterns(lexicon: &Lexicon, config: &PatternConfig) -> Result<Arc<CompiledPatterns>> {
    let key = cache_key(lexicon, config);

    {
        let cache = COMPILED_PATTERNS_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(patterns) = cache.get(&key) {
            debug!("Serving compiled patterns from cache for key: {}", key);
            return Ok(Arc::clone(patterns));
        }
    }

    debug!("Compiled patterns not found in cache. Compiling now.");
    let compiled = Arc::new(compile_patterns(lexicon.words(), config)?);

    COMPILED_PATTERNS_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key, Arc::clone(&compiled));

    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconSource;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_partition_by_length() {
        let compiled = compile_patterns(&words(&["еб", "буд", "сука", "мудак"]), &PatternConfig::default()).unwrap();
        assert_eq!(compiled.short_words.words(), &["еб".to_string(), "буд".to_string()]);
        assert_eq!(compiled.matchers.len(), 4);
        assert_eq!(compiled.pattern_word_count(), 2);
        for m in &compiled.matchers {
            assert!(!compiled.short_words.contains_word(&m.word));
        }
    }

    #[test]
    fn test_matchers_follow_word_order_exact_first() {
        let compiled = compile_patterns(&words(&["сука", "мудак"]), &PatternConfig::default()).unwrap();
        let order: Vec<(&str, MatcherKind)> = compiled.matchers.iter().map(|m| (m.word.as_str(), m.kind)).collect();
        assert_eq!(order, vec![
            ("сука", MatcherKind::Exact),
            ("сука", MatcherKind::Confusable),
            ("мудак", MatcherKind::Exact),
            ("мудак", MatcherKind::Confusable),
        ]);
    }

    #[test]
    fn test_exact_matcher_respects_cyrillic_boundaries() {
        let m = build_matcher("сука", MatcherKind::Exact).unwrap();
        assert!(m.is_match("ну ты сука!"));
        assert!(m.is_match("сука"));
        assert!(!m.is_match("сукааа"));
        assert!(!m.is_match("барсука"));
    }

    #[test]
    fn test_confusable_matcher_accepts_homoglyphs() {
        let m = build_matcher("сука", MatcherKind::Confusable).unwrap();
        assert!(m.is_match("cyka"));
        assert!(m.is_match("сукa"));
        assert!(m.is_match("cук@"));
        assert!(!m.is_match("cykax"));
    }

    #[test]
    fn test_at_sign_is_a_boundary_and_a_homoglyph() {
        let m = build_matcher("мудак", MatcherKind::Confusable).unwrap();
        assert!(m.is_match("ты муд@к."));
        assert!(m.is_match("@мудак"));
        assert!(m.is_match("мудак@mail.ru"));

        let m = build_matcher("мудак", MatcherKind::Exact).unwrap();
        assert!(m.is_match("привет @мудак"));
        assert!(m.is_match("мудак@mail.ru"));
        assert!(!m.is_match("x@мудакx"));
    }

    #[test]
    fn test_metacharacters_are_escaped() {
        let compiled = compile_patterns(&words(&["a.b+c"]), &PatternConfig::default()).unwrap();
        assert!(compiled.matchers[0].is_match("x a.b+c y"));
        assert!(!compiled.matchers[0].is_match("x azbbbc y"));
    }

    #[test]
    fn test_cache_returns_shared_instance() {
        let lexicon = Lexicon::from_words(["залупа", "пидор", "еб"], LexiconSource::Custom);
        let first = get_or_compile_patterns(&lexicon, &PatternConfig::default()).unwrap();
        let second = get_or_compile_patterns(&lexicon, &PatternConfig::default()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let other = get_or_compile_patterns(&lexicon, &PatternConfig { short_word_max_len: 1 }).unwrap();
        assert!(!Arc::ptr_eq(&first, &other));
        assert!(other.short_words.is_empty());
    }
}
