use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::nav::Thresholds;
use crate::parser::{self, DEFAULT_CONTAINER, DEFAULT_SEPARATOR, Selectors};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "htmldeck";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectors: Option<SelectorConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Minimum |deltaY| for a wheel event to move one slide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheel_threshold: Option<f32>,

    /// Minimum vertical swipe distance in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch_threshold: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `htmldeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# htmldeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Navigation thresholds with defaults filled in. Negative or non-finite
    /// values from a hand-edited file fall back to the defaults.
    pub fn thresholds(&self) -> Thresholds {
        let defaults = Thresholds::default();
        let nav = self.navigation.as_ref();
        Thresholds {
            wheel: checked_threshold(
                "navigation.wheel_threshold",
                nav.and_then(|n| n.wheel_threshold),
                defaults.wheel,
            ),
            touch: checked_threshold(
                "navigation.touch_threshold",
                nav.and_then(|n| n.touch_threshold),
                defaults.touch,
            ),
        }
    }

    pub fn container_selector(&self) -> &str {
        self.selectors
            .as_ref()
            .and_then(|s| s.container.as_deref())
            .unwrap_or(DEFAULT_CONTAINER)
    }

    pub fn separator_selector(&self) -> &str {
        self.selectors
            .as_ref()
            .and_then(|s| s.separator.as_deref())
            .unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Compile the configured selectors.
    pub fn selectors(&self) -> Result<Selectors> {
        Ok(Selectors::new(
            self.container_selector(),
            self.separator_selector(),
        )?)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "navigation.wheel_threshold" => {
                let threshold = parse_threshold(key, value)?;
                self.navigation
                    .get_or_insert_with(NavigationConfig::default)
                    .wheel_threshold = Some(threshold);
            }
            "navigation.touch_threshold" => {
                let threshold = parse_threshold(key, value)?;
                self.navigation
                    .get_or_insert_with(NavigationConfig::default)
                    .touch_threshold = Some(threshold);
            }
            "selectors.container" => {
                parser::compile(value)?;
                self.selectors
                    .get_or_insert_with(SelectorConfig::default)
                    .container = Some(value.to_string());
            }
            "selectors.separator" => {
                parser::compile(value)?;
                self.selectors
                    .get_or_insert_with(SelectorConfig::default)
                    .separator = Some(value.to_string());
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: navigation.wheel_threshold, navigation.touch_threshold, selectors.container, selectors.separator"
            ),
        }
        Ok(())
    }
}

fn is_valid_threshold(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

fn parse_threshold(key: &str, value: &str) -> Result<f32> {
    match value.parse::<f32>() {
        Ok(v) if is_valid_threshold(v) => Ok(v),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be a non-negative number."),
    }
}

fn checked_threshold(key: &str, value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(v) if is_valid_threshold(v) => v,
        Some(v) => {
            tracing::warn!(key, value = %v, "ignoring invalid threshold, using {default}");
            default
        }
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.thresholds(), Thresholds::default());
        assert_eq!(config.container_selector(), ".wrap");
        assert_eq!(config.separator_selector(), "hr.slide-sep");
        assert!(config.selectors().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let config: Config = serde_yaml::from_str("navigation:\n  touch_threshold: 60\n").unwrap();
        let t = config.thresholds();
        assert_eq!(t.wheel, 8.0);
        assert_eq!(t.touch, 60.0);
        assert_eq!(config.container_selector(), ".wrap");
    }

    #[test]
    fn test_set_thresholds() {
        let mut config = Config::default();
        config.set("navigation.wheel_threshold", "12.5").unwrap();
        config.set("navigation.touch_threshold", "0").unwrap();
        assert_eq!(
            config.thresholds(),
            Thresholds {
                wheel: 12.5,
                touch: 0.0,
            }
        );
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("navigation.wheel_threshold", "-1").is_err());
        assert!(config.set("navigation.touch_threshold", "NaN").is_err());
        assert!(config.set("navigation.touch_threshold", "far").is_err());
        assert!(config.set("selectors.container", "div[").is_err());
        assert!(config.set("theme", "dark").is_err());
        assert!(config.navigation.is_none());
        assert!(config.selectors.is_none());
    }

    #[test]
    fn test_invalid_thresholds_in_file_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        std::fs::write(
            &path,
            "navigation:\n  wheel_threshold: .nan\n  touch_threshold: -3\n",
        )
        .unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.thresholds(), Thresholds::default());

        let config: Config = serde_yaml::from_str("navigation:\n  wheel_threshold: .inf\n").unwrap();
        assert_eq!(config.thresholds().wheel, 8.0);
    }

    #[test]
    fn test_set_selectors() {
        let mut config = Config::default();
        config.set("selectors.container", "main.content").unwrap();
        config.set("selectors.separator", "hr.break").unwrap();
        assert_eq!(config.container_selector(), "main.content");
        assert_eq!(config.separator_selector(), "hr.break");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILENAME);
        let mut config = Config::default();
        config.set("navigation.wheel_threshold", "20").unwrap();
        config.set("selectors.separator", "hr.next").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.thresholds().wheel, 20.0);
        assert_eq!(loaded.separator_selector(), "hr.next");
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("touch_threshold"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }
}
