// cleanchat-lexis/src/confusables/mod.rs
//! Character-equivalence table used to build obfuscation-tolerant matchers.
//!
//! Each row is one equivalence class: the Cyrillic letter first, followed by
//! the Latin homoglyph and any digit or symbol commonly typed in its place.
//! The table is static data; it is never derived from input.

/// The fixed equivalence classes. A character belongs to at most one row.
pub const CONFUSABLE_CLASSES: &[&[char]] = &[
    &['а', 'a', '@'],
    &['о', 'o', '0'],
    &['е', 'e', 'ё', '3'],
    &['и', 'i', 'ы', '1'],
    &['с', 'c'],
    &['у', 'y'],
    &['к', 'k'],
    &['р', 'p'],
    &['х', 'x'],
    &['т', 't'],
    &['м', 'm'],
];

/// Returns the equivalence class containing `c`, if any.
pub fn class_of(c: char) -> Option<&'static [char]> {
    CONFUSABLE_CLASSES
        .iter()
        .copied()
        .find(|class| class.contains(&c))
}

/// True when `a` and `b` are the same character or share a class.
pub fn are_equivalent(a: char, b: char) -> bool {
    a == b || class_of(a).map_or(false, |class| class.contains(&b))
}
