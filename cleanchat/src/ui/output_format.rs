//! Themed message and verdict formatting.
//!
//! Colour is applied only when the caller says the target stream supports
//! it, so piped output stays plain text.

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::Write;

use cleanchat_core::Verdict;

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Applies the theme colour for `entry` to `text`.
pub fn styled(text: &str, entry: ThemeEntry, theme: &ThemeMap, supports_color: bool) -> String {
    if !supports_color {
        return text.to_string();
    }
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => text.color(color.to_ansi_color()).to_string(),
        None => text.to_string(),
    }
}

fn print_prefixed<W: Write>(
    writer: &mut W,
    prefix: &str,
    message: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    writeln!(writer, "{}", styled(&format!("{}{}", prefix, message), entry, theme, supports_color))?;
    Ok(())
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, supports_color: bool) -> Result<()> {
    print_prefixed(writer, "", message, ThemeEntry::Info, theme, supports_color)
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, supports_color: bool) -> Result<()> {
    print_prefixed(writer, "Warning: ", message, ThemeEntry::Warn, theme, supports_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, supports_color: bool) -> Result<()> {
    print_prefixed(writer, "Error: ", message, ThemeEntry::Error, theme, supports_color)
}

/// One `check` result line: `BANNED<TAB>text` or `CLEAN<TAB>text`, with an
/// indented reason line when `explain` is set.
pub fn print_verdict<W: Write>(
    writer: &mut W,
    text: &str,
    verdict: &Verdict,
    explain: bool,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    let label = if verdict.is_banned() {
        styled("BANNED", ThemeEntry::Banned, theme, supports_color)
    } else {
        styled("CLEAN", ThemeEntry::Clean, theme, supports_color)
    };
    writeln!(writer, "{}\t{}", label, text)?;

    if explain {
        if let Some(reason) = &verdict.reason {
            let line = format!("  {}", reason);
            writeln!(writer, "{}", styled(&line, ThemeEntry::Reason, theme, supports_color))?;
        }
    }
    Ok(())
}
