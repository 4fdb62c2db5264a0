// cleanchat-lexis/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod confusables;
pub mod scanner;

/// Number of Unicode scalar values in a word. Lexicon length rules count
/// characters, never bytes, since most banned words are Cyrillic.
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}
