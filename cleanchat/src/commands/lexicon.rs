//! `lexicon` command: describe the active ban-list.

use anyhow::Result;
use std::io::Write;

use cleanchat_core::{LexiconSource, ModerationEngine};

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

fn describe_source(source: &LexiconSource) -> String {
    match source {
        LexiconSource::Remote { url } => format!("remote ({})", url),
        LexiconSource::Embedded { reason } => format!("embedded ({})", reason),
        LexiconSource::Custom => "custom".to_string(),
    }
}

/// Prints source, counts and, with `list`, every word.
pub fn print_lexicon<W: Write>(
    writer: &mut W,
    engine: &dyn ModerationEngine,
    list: bool,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    let lexicon = engine.lexicon();
    let patterns = engine.compiled_patterns();

    writeln!(writer, "{}", styled("Lexicon", ThemeEntry::Header, theme, supports_color))?;
    writeln!(writer, "Source: {}", describe_source(lexicon.source()))?;
    writeln!(writer, "Words: {}", lexicon.len())?;
    writeln!(writer, "Short words: {}", patterns.short_words.len())?;
    writeln!(writer, "Pattern words: {}", patterns.pattern_word_count())?;
    writeln!(
        writer,
        "Normalizer: {}",
        if engine.normalizer_available() { "available" } else { "unavailable" }
    )?;

    if list {
        writeln!(writer)?;
        for word in lexicon.words() {
            writeln!(writer, "{}", word)?;
        }
    }
    Ok(())
}
