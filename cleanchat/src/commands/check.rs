//! `check` command: classify messages one by one.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::io::{self, BufRead, Write};

use cleanchat_core::ModerationEngine;

use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Totals for one `check` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    pub checked: usize,
    pub banned: usize,
}

impl CheckOutcome {
    pub fn any_banned(&self) -> bool {
        self.banned > 0
    }
}

/// Classifies every message and prints one verdict line each.
pub fn check_messages<I, W>(
    engine: &dyn ModerationEngine,
    messages: I,
    explain: bool,
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<CheckOutcome>
where
    I: IntoIterator<Item = String>,
    W: Write,
{
    let mut outcome = CheckOutcome::default();
    for message in messages {
        let verdict = engine.classify(&message);
        outcome.checked += 1;
        if verdict.is_banned() {
            outcome.banned += 1;
        }
        output_format::print_verdict(writer, &message, &verdict, explain, theme, supports_color)?;
    }
    debug!("Checked {} message(s), {} banned.", outcome.checked, outcome.banned);
    Ok(outcome)
}

/// Runs `check` against the given texts, or stdin lines when there are none.
pub fn run_check(
    engine: &dyn ModerationEngine,
    texts: Vec<String>,
    explain: bool,
    theme: &ThemeMap,
) -> Result<CheckOutcome> {
    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();

    if !texts.is_empty() {
        return check_messages(engine, texts, explain, &mut writer, theme, supports_color);
    }

    let lines = io::stdin()
        .lock()
        .lines()
        .collect::<io::Result<Vec<String>>>()
        .context("Failed to read messages from stdin")?;
    check_messages(engine, lines, explain, &mut writer, theme, supports_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use cleanchat_core::lexicon::{Lexicon, LexiconSource};
    use cleanchat_core::PatternEngine;

    #[test_log::test]
    fn counts_and_prints_each_message() {
        let engine = PatternEngine::new(Lexicon::from_words(["сука"], LexiconSource::Custom)).unwrap();
        let mut out = Vec::new();
        let outcome = check_messages(
            &engine,
            vec!["привет".to_string(), "cyka".to_string()],
            false,
            &mut out,
            &ThemeStyle::default_theme_map(),
            false,
        )
        .unwrap();

        assert_eq!(outcome, CheckOutcome { checked: 2, banned: 1 });
        assert!(outcome.any_banned());
        assert_eq!(String::from_utf8(out).unwrap(), "CLEAN\tпривет\nBANNED\tcyka\n");
    }
}
