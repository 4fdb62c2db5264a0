//! fuzzy.rs - Edit-distance lookup against the lexicon.
//!
//! This is the most expensive detection step (tokens × lexicon × word
//! length), so words whose length alone rules them out are skipped before
//! running Levenshtein. Distances count characters, not bytes.

use strsim::levenshtein;

/// The closest lexicon word to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyHit<'a> {
    pub word: &'a str,
    pub distance: usize,
}

/// Finds the lexicon word nearest to `token`, if its distance is at most
/// `max_distance`. Ties keep the earliest word in iteration order.
pub fn nearest_within<'a, I>(token: &str, words: I, max_distance: usize) -> Option<FuzzyHit<'a>>
where
    I: IntoIterator<Item = &'a String>,
{
    let token_len = token.chars().count();
    let mut best: Option<FuzzyHit<'a>> = None;

    for word in words {
        let bound = best.map_or(max_distance, |b| b.distance.saturating_sub(1));
        let word_len = word.chars().count();
        if word_len.abs_diff(token_len) > bound {
            continue;
        }

        let distance = levenshtein(token, word);
        if distance <= bound {
            best = Some(FuzzyHit { word: word.as_str(), distance });
            if distance == 0 {
                break;
            }
        }
    }

    best
}
