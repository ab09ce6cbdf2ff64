use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::controller::{DEFAULT_COPY_DELAY, DEFAULT_PASTE_DELAY};
use crate::keybindings::ShortcutsConfig;
use crate::utils::paths::get_config_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Wait after the synthetic copy before reading the pasteboard.
    #[serde(default = "default_copy_delay_ms")]
    pub copy_delay_ms: u64,

    /// Wait after writing the pasteboard before the synthetic paste.
    #[serde(default = "default_paste_delay_ms")]
    pub paste_delay_ms: u64,

    #[serde(default)]
    pub shortcuts: ShortcutsConfig,
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_copy_delay_ms() -> u64 {
    DEFAULT_COPY_DELAY.as_millis() as u64
}

fn default_paste_delay_ms() -> u64 {
    DEFAULT_PASTE_DELAY.as_millis() as u64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            log_level: default_log_level(),
            copy_delay_ms: default_copy_delay_ms(),
            paste_delay_ms: default_paste_delay_ms(),
            shortcuts: ShortcutsConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        Ok(config)
    }

    pub fn copy_delay(&self) -> Duration {
        Duration::from_millis(self.copy_delay_ms)
    }

    pub fn paste_delay(&self) -> Duration {
        Duration::from_millis(self.paste_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "default");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.copy_delay(), DEFAULT_COPY_DELAY);
        assert_eq!(config.paste_delay(), DEFAULT_PASTE_DELAY);
        assert_eq!(config.shortcuts, ShortcutsConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("copy_delay_ms = 200"));
        assert!(toml_str.contains("[shortcuts]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
        theme = "dark"
        paste_delay_ms = 250

        [shortcuts]
        delete_from_stack = "ctrl+alt+d"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.paste_delay_ms, 250);
        assert_eq!(config.copy_delay(), DEFAULT_COPY_DELAY);
        assert_eq!(config.shortcuts.delete_from_stack, "ctrl+alt+d");
        assert_eq!(config.shortcuts.capture_to_stack, "cmd+shift+c");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_reports_bad_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "copy_delay_ms = \"soon\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }
}
