//! Obfuscation-tolerant pattern compilation for CleanChat.
//!
//! This module turns a lexicon into the compiled data the pattern stage of
//! detection runs against: an Aho-Corasick scanner for short words and an
//! ordered list of whole-word regex matchers (exact and confusable) for the
//! rest. Compilation happens once per lexicon; nothing here runs per message.

pub mod compiler;
