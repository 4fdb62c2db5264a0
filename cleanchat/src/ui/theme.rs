//! Output colour theme for the CLI.
//!
//! Each logical output element maps to an optional named ANSI foreground
//! colour. Themes are loaded from YAML; entries missing from a user file
//! keep their default colour.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Section titles.
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// The `BANNED` verdict label.
    Banned,
    /// The `CLEAN` verdict label.
    Clean,
    /// Match explanations printed by `check --explain`.
    Reason,
    /// Author names in the violators table.
    SummaryAuthor,
    /// Violation counts in the violators table.
    SummaryCount,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 10] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::Banned,
        ThemeEntry::Clean,
        ThemeEntry::Reason,
        ThemeEntry::SummaryAuthor,
        ThemeEntry::SummaryCount,
    ];
}

const NAMED_COLORS: [(&str, AnsiColors); 16] = [
    ("black", AnsiColors::Black),
    ("red", AnsiColors::Red),
    ("green", AnsiColors::Green),
    ("yellow", AnsiColors::Yellow),
    ("blue", AnsiColors::Blue),
    ("magenta", AnsiColors::Magenta),
    ("cyan", AnsiColors::Cyan),
    ("white", AnsiColors::White),
    ("brightblack", AnsiColors::BrightBlack),
    ("brightred", AnsiColors::BrightRed),
    ("brightgreen", AnsiColors::BrightGreen),
    ("brightyellow", AnsiColors::BrightYellow),
    ("brightblue", AnsiColors::BrightBlue),
    ("brightmagenta", AnsiColors::BrightMagenta),
    ("brightcyan", AnsiColors::BrightCyan),
    ("brightwhite", AnsiColors::BrightWhite),
];

/// A named ANSI colour such as `red` or `brightgreen`.
///
/// Unknown names are rejected when a theme file is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeColor {
    slot: usize,
}

#[derive(Debug, Clone)]
pub struct ParseThemeColorError {
    given: String,
}

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<&str> = NAMED_COLORS.iter().map(|(name, _)| *name).collect();
        write!(f, "Unknown theme color '{}'; expected one of: {}", self.given, names.join(", "))
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMED_COLORS
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(s.trim()))
            .map(|slot| ThemeColor { slot })
            .ok_or_else(|| ParseThemeColorError { given: s.to_string() })
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = ParseThemeColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThemeColor> for String {
    fn from(color: ThemeColor) -> Self {
        color.name().to_string()
    }
}

impl ThemeColor {
    pub fn name(&self) -> &'static str {
        NAMED_COLORS[self.slot].0
    }

    pub fn to_ansi_color(&self) -> AnsiColors {
        NAMED_COLORS[self.slot].1
    }
}

/// Style for one `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

impl ThemeStyle {
    fn fg(name: &str) -> Self {
        ThemeStyle { fg: name.parse().ok() }
    }

    /// Loads a YAML theme and fills in defaults for missing entries.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let custom: Option<ThemeMap> = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        let mut theme = Self::default_theme_map();
        theme.extend(custom.unwrap_or_default());
        Ok(theme)
    }

    pub fn default_theme_map() -> ThemeMap {
        let mut theme = HashMap::new();
        theme.insert(ThemeEntry::Header, Self::fg("brightwhite"));
        theme.insert(ThemeEntry::Success, Self::fg("green"));
        theme.insert(ThemeEntry::Info, Self::fg("cyan"));
        theme.insert(ThemeEntry::Warn, Self::fg("yellow"));
        theme.insert(ThemeEntry::Error, Self::fg("red"));
        theme.insert(ThemeEntry::Banned, Self::fg("brightred"));
        theme.insert(ThemeEntry::Clean, Self::fg("green"));
        theme.insert(ThemeEntry::Reason, Self::fg("brightblack"));
        theme.insert(ThemeEntry::SummaryAuthor, Self::fg("magenta"));
        theme.insert(ThemeEntry::SummaryCount, Self::fg("yellow"));
        theme
    }
}

/// Loads the theme at `theme_path`, or the default theme.
pub fn build_theme_map(theme_path: Option<&Path>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => ThemeStyle::load_from_file(path),
        None => Ok(ThemeStyle::default_theme_map()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_named_colors() {
        let color: ThemeColor = "BrightGreen".parse().unwrap();
        assert_eq!(color.name(), "brightgreen");
        assert!(matches!(color.to_ansi_color(), AnsiColors::BrightGreen));
        assert!(matches!("red".parse::<ThemeColor>().unwrap().to_ansi_color(), AnsiColors::Red));

        let err = "purple".parse::<ThemeColor>().unwrap_err().to_string();
        assert!(err.contains("'purple'"));
        assert!(err.contains("black, red, green"));
    }

    #[test]
    fn every_table_name_parses_case_insensitively() {
        for (name, _) in NAMED_COLORS {
            let parsed: ThemeColor = name.to_uppercase().parse().unwrap();
            assert_eq!(parsed.name(), name);
        }
    }

    #[test]
    fn default_theme_covers_every_entry() {
        let theme = ThemeStyle::default_theme_map();
        for entry in ThemeEntry::ALL {
            assert!(theme.get(&entry).and_then(|s| s.fg.as_ref()).is_some(), "{:?} has no colour", entry);
        }
    }

    #[test]
    fn user_theme_overrides_only_listed_entries() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "banned:\n  fg: magenta")?;
        let theme = build_theme_map(Some(file.path()))?;
        assert_eq!(theme[&ThemeEntry::Banned].fg, Some("magenta".parse()?));
        assert_eq!(theme[&ThemeEntry::Clean].fg, Some("green".parse()?));
        Ok(())
    }

    #[test]
    fn unknown_colour_in_theme_file_is_rejected() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "banned:\n  fg: purple")?;
        let err = build_theme_map(Some(file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("purple"), "unexpected error: {:#}", err);
        Ok(())
    }
}
