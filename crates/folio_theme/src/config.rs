//! Theme configuration (`[theme]` table)

use crate::error::ConfigError;
use crate::state::ThemeDefaults;
use crate::variant::{IntensityLevel, PresentationVariant};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Boot-time theme settings
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub default_variant: PresentationVariant,
    #[serde(default)]
    pub default_intensity: IntensityLevel,
    /// Persist preferences between sessions
    #[serde(default = "default_true")]
    pub persistence: bool,
    /// Preference file; the host picks a platform default when unset
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_variant: PresentationVariant::default(),
            default_intensity: IntensityLevel::default(),
            persistence: true,
            storage_path: None,
        }
    }
}

impl ThemeConfig {
    pub fn defaults(&self) -> ThemeDefaults {
        ThemeDefaults::new(self.default_variant, self.default_intensity)
    }

    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .storage_path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::Invalid(
                "storage_path must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ThemeConfig::from_toml_str("").unwrap();
        assert_eq!(config, ThemeConfig::default());
        assert!(config.persistence);
    }

    #[test]
    fn test_parses_stable_ids() {
        let config = ThemeConfig::from_toml_str(
            r#"
            default_variant = "liquid-glass"
            default_intensity = "light"
            persistence = false
            storage_path = "/tmp/folio/theme.toml"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.defaults(),
            ThemeDefaults::new(PresentationVariant::Glass, IntensityLevel::Light)
        );
        assert!(!config.persistence);
        assert_eq!(
            config.storage_path.as_deref(),
            Some(std::path::Path::new("/tmp/folio/theme.toml"))
        );
    }

    #[test]
    fn test_unknown_intensity_is_rejected() {
        let err = ThemeConfig::from_toml_str(r#"default_intensity = "blinding""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_storage_path_is_rejected() {
        let err = ThemeConfig::from_toml_str("storage_path = ''").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
