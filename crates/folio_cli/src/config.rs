//! Folio configuration file handling

use anyhow::{Context, Result};
use folio_effects::{EffectConfig, EffectKind};
use folio_theme::ThemeConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "folio";
const CONFIG_FILE: &str = "folio.toml";
const STORAGE_FILE: &str = "theme.toml";

/// Top-level Folio configuration (folio.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Named effect surfaces, e.g. `[effects.card]`
    #[serde(default)]
    pub effects: BTreeMap<String, EffectConfig>,
}

impl FolioConfig {
    /// Load `path`, or the default location if it exists, or built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("No config file at {}", path.display());
                }
                path.to_path_buf()
            }
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => path,
                None => {
                    tracing::debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FolioConfig = toml::from_str(content).context("Failed to parse config")?;
        config.theme.validate().context("Invalid [theme] table")?;
        for (name, effect) in &config.effects {
            effect
                .validate()
                .with_context(|| format!("Invalid [effects.{name}] table"))?;
        }
        Ok(config)
    }

    /// Effect settings for a surface: a named table, else the first table of
    /// that kind, else the kind's preset
    pub fn effect(&self, name_or_kind: &str) -> Result<EffectConfig> {
        if let Some(config) = self.effects.get(name_or_kind) {
            return Ok(config.clone());
        }
        let kind: EffectKind = name_or_kind
            .parse()
            .with_context(|| format!("No [effects.{name_or_kind}] table and not an effect kind"))?;
        Ok(self
            .effects
            .values()
            .find(|config| config.kind == kind)
            .cloned()
            .unwrap_or_else(|| EffectConfig::for_kind(kind)))
    }

    /// Where preferences are stored; `None` if no location can be determined
    pub fn storage_path(&self, overridden: Option<&Path>) -> Option<PathBuf> {
        overridden
            .map(Path::to_path_buf)
            .or_else(|| self.theme.storage_path.clone())
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR).join(STORAGE_FILE)))
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
