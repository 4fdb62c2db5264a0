// cleanchat-core/src/engines/mod.rs
//! This module contains the detection engine implementations.
//!
//! Each engine is a separate file within this directory and implements the
//! `ModerationEngine` trait. `PatternEngine` covers the lexical checks;
//! `LayeredEngine` wraps it and adds the lemma and edit-distance step when
//! a lemmatizer is present.

pub mod layered_engine;
pub mod pattern_engine;
