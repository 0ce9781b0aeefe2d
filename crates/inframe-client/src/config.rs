//! Dashboard configuration loading and types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration shared by the CLI and TUI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Backend connection
    #[serde(default)]
    pub api: ApiConfig,
    /// Asset host credentials
    #[serde(default)]
    pub upload: UploadConfig,
    /// Terminal UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Asset host settings
///
/// `url` may contain `{resource_type}`, replaced by `image` or `raw` per
/// upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadConfig {
    pub url: Option<String>,
    pub upload_preset: Option<String>,
    pub api_key: Option<String>,
}

/// Terminal UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Words shown per cell before truncation
    #[serde(default = "default_word_limit")]
    pub word_limit: usize,
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            word_limit: default_word_limit(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_word_limit() -> usize {
    20
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl DashboardConfig {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DashboardConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from an explicit path, the default paths, or defaults
    ///
    /// Environment overrides are applied on top.
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be read or parsed
    pub fn resolve(explicit: Option<&Path>) -> eyre::Result<Self> {
        let config = match explicit {
            Some(path) => Self::load(path)?,
            None => Self::load_default()?,
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Load from default paths or use defaults
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be read or parsed
    pub fn load_default() -> eyre::Result<Self> {
        // Check environment variable
        if let Ok(path) = std::env::var("INFRAME_CONFIG") {
            return Self::load(&PathBuf::from(path));
        }

        // Try common paths
        let paths = [
            Some(PathBuf::from("inframe.toml")),
            dirs::config_dir().map(|p| p.join("inframe/inframe.toml")),
        ];

        for path in paths.into_iter().flatten() {
            if path.exists() {
                return Self::load(&path);
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(DashboardConfig::default())
    }

    /// Apply `INFRAME_*` overrides from `lookup`
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup("INFRAME_API_URL") {
            self.api.base_url = url;
        }
        if let Some(url) = lookup("INFRAME_UPLOAD_URL") {
            self.upload.url = Some(url);
        }
        if let Some(preset) = lookup("INFRAME_UPLOAD_PRESET") {
            self.upload.upload_preset = Some(preset);
        }
        if let Some(key) = lookup("INFRAME_UPLOAD_API_KEY") {
            self.upload.api_key = Some(key);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.ui.word_limit, 20);
        assert!(config.upload.upload_preset.is_none());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: DashboardConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.inframe.example"

            [upload]
            url = "https://upload.example/v1_1/demo/{resource_type}/upload"
            upload_preset = "dashboard"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://api.inframe.example");
        assert_eq!(config.upload.upload_preset.as_deref(), Some("dashboard"));
        assert!(config.upload.api_key.is_none());
        assert_eq!(config.ui.tick_rate_ms, 250);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("INFRAME_API_URL", "http://10.0.0.5:5000"),
            ("INFRAME_UPLOAD_API_KEY", "key-123"),
            ("INFRAME_UPLOAD_PRESET", "  "),
        ]
        .into_iter()
        .collect();

        let config = DashboardConfig::default()
            .with_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.5:5000");
        assert_eq!(config.upload.api_key.as_deref(), Some("key-123"));
        assert!(config.upload.upload_preset.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("inframe-test-{}.toml", std::process::id()));
        std::fs::write(&path, "[ui]\nword_limit = 12\n").unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.ui.word_limit, 12);
        assert_eq!(config.api.base_url, "http://localhost:5000");
    }
}
