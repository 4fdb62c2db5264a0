//! Configuration management for `cleanchat-core`.
//!
//! This module defines the filter configuration: where the lexicon comes
//! from, how patterns and fuzzy matching are tuned, where the optional
//! lemmatization model lives, and how violations are reported. It handles
//! YAML (de)serialization, overlaying user files on the embedded defaults,
//! and validation.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_yml::Value;
use std::path::{Path, PathBuf};
use tinytemplate::TinyTemplate;

/// Public list of Russian ban words the lexicon is fetched from by default.
pub const DEFAULT_LEXICON_URL: &str =
    "https://raw.githubusercontent.com/bars38/Russian_ban_words/master/words.txt";

/// Upper bound for the lexicon fetch timeout. Startup must never hang.
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 120;

/// Where the lexicon comes from and what is merged into it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Newline-delimited word list. `None` means embedded list only.
    pub url: Option<String>,
    /// Bound on the single startup fetch, in seconds.
    pub timeout_secs: u64,
    /// Skip the network entirely and use the embedded list.
    pub offline: bool,
    /// Deployment-specific words merged after the supplementary list.
    pub extra_words: Vec<String>,
}

impl LexiconConfig {
    /// The URL to fetch, or `None` when offline or unset.
    pub fn effective_url(&self) -> Option<&str> {
        if self.offline {
            None
        } else {
            self.url.as_deref().filter(|u| !u.trim().is_empty())
        }
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            url: Some(DEFAULT_LEXICON_URL.to_string()),
            timeout_secs: 5,
            offline: false,
            extra_words: Vec::new(),
        }
    }
}

/// Pattern compiler settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Words with at most this many characters use containment instead of regex.
    pub short_word_max_len: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self { short_word_max_len: 3 }
    }
}

/// Fuzzy (edit distance) step settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// A token at this distance or closer to a lexicon word is banned.
    pub max_distance: usize,
    /// Only tokens strictly longer than this are fuzzy-matched.
    pub min_token_len: usize,
    /// Only texts strictly longer than this reach the linguistic step.
    pub min_text_len: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            max_distance: 1,
            min_token_len: 3,
            min_text_len: 3,
        }
    }
}

/// Optional lemmatization model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Path to a `surface<TAB>lemma` dictionary file.
    pub model_path: Option<PathBuf>,
}

/// Violation reporting settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// TinyTemplate for audit log lines. Fields: `author_id`, `handle`, `text`, `reason`, `timestamp`.
    pub log_template: String,
    /// Number of violators shown in reports.
    pub top_n: usize,
}

pub const DEFAULT_LOG_TEMPLATE: &str = "Violation from {author_id} (@{handle}): '{text}'";

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            log_template: DEFAULT_LOG_TEMPLATE.to_string(),
            top_n: 20,
        }
    }
}

/// The top-level configuration structure for CleanChat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    pub lexicon: LexiconConfig,
    pub patterns: PatternConfig,
    pub fuzzy: FuzzyConfig,
    pub normalizer: NormalizerConfig,
    pub reporting: ReportingConfig,
}

impl FilterConfig {
    /// Loads the configuration embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default filter configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: FilterConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default filter configuration")?;
        Ok(config)
    }

    /// Loads a user YAML file and overlays it on the embedded defaults.
    ///
    /// Only keys present in the file are overridden; nested sections merge
    /// key by key, lists are replaced wholesale.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading filter configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let user: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_yml::from_str(&text)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        };

        let config = merge_config(Self::load_default()?, user)
            .with_context(|| format!("Invalid settings in config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// The lexicon URL to fetch, or `None` when running offline.
    pub fn effective_lexicon_url(&self) -> Option<&str> {
        self.lexicon.effective_url()
    }

    /// Checks value ranges and that the report template renders.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.lexicon.timeout_secs == 0 || self.lexicon.timeout_secs > MAX_FETCH_TIMEOUT_SECS {
            errors.push(format!(
                "lexicon.timeout_secs must be between 1 and {} (got {}).",
                MAX_FETCH_TIMEOUT_SECS, self.lexicon.timeout_secs
            ));
        }

        if let Some(url) = &self.lexicon.url {
            match reqwest::Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => errors.push(format!(
                    "lexicon.url must use http or https (got '{}').",
                    parsed.scheme()
                )),
                Err(e) => errors.push(format!("lexicon.url '{}' is not a valid URL: {}", url, e)),
            }
        }

        if self.reporting.top_n == 0 {
            errors.push("reporting.top_n must be greater than 0.".to_string());
        }

        let mut tt = TinyTemplate::new();
        if let Err(e) = tt.add_template("log", &self.reporting.log_template) {
            errors.push(format!("reporting.log_template is invalid: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
        }
    }
}

/// Overlays a user YAML document on a base configuration.
pub fn merge_config(base: FilterConfig, user: Value) -> Result<FilterConfig> {
    let mut merged = serde_yml::to_value(&base).context("Failed to serialize base configuration")?;
    if !user.is_null() {
        merge_values(&mut merged, user);
    }
    serde_yml::from_value(merged).context("Failed to deserialize merged configuration")
}

fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Locations searched, in order, for a user configuration file.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    let candidates = vec![
        dirs::home_dir().map(|p| p.join(".cleanchat").join("config.yaml")),
        dirs::config_dir().map(|p| p.join("cleanchat").join("config.yaml")),
        Some(PathBuf::from("./config/cleanchat.yaml")),
    ];
    candidates.into_iter().flatten().collect()
}

/// First existing user configuration file, if any.
pub fn find_user_config() -> Option<PathBuf> {
    config_candidate_paths().into_iter().find(|p| p.is_file())
}
