//! Configuration resolution and engine construction shared by all commands.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cleanchat_core::{find_user_config, FilterConfig, LayeredEngine};

use crate::cli::Cli;

/// Command-line values layered over the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub lexicon_url: Option<String>,
    pub offline: bool,
    pub lemma_model: Option<PathBuf>,
}

impl From<&Cli> for ConfigOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            lexicon_url: cli.lexicon_url.clone(),
            offline: cli.offline,
            lemma_model: cli.lemma_model.clone(),
        }
    }
}

/// Loads the explicit config file, else the first user config found, else
/// the embedded defaults, then applies `overrides` and validates.
pub fn resolve_config(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<FilterConfig> {
    let mut config = match config_path.map(Path::to_path_buf).or_else(find_user_config) {
        Some(path) => FilterConfig::load_from_file(&path)?,
        None => {
            debug!("No configuration file found, using embedded defaults.");
            FilterConfig::load_default()?
        }
    };

    if let Some(url) = &overrides.lexicon_url {
        config.lexicon.url = Some(url.clone());
    }
    if overrides.offline {
        config.lexicon.offline = true;
    }
    if let Some(model) = &overrides.lemma_model {
        config.normalizer.model_path = Some(model.clone());
    }

    config.validate().context("Invalid configuration after applying command-line options")?;
    Ok(config)
}

/// Builds the layered engine off the async runtime, since the lexicon fetch blocks.
pub async fn build_engine(config: &FilterConfig) -> Result<Arc<LayeredEngine>> {
    let config = config.clone();
    let engine = tokio::task::spawn_blocking(move || LayeredEngine::from_config(&config))
        .await
        .context("Engine construction task failed")??;
    info!("Engine ready.");
    Ok(Arc::new(engine))
}
