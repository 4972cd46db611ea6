// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for uiscanbot
//!
//! Rule parameters are validated when rules are built, so a bad density or
//! threshold fails before any tree is scanned.

use crate::contrast::{self, Color};
use crate::engine::{RuleEngine, DEFAULT_MAX_DEPTH};
use crate::error::{Result, ScanError};
use crate::rules::text_contrast::{DEFAULT_LARGE_TEXT_MIN_RATIO, DEFAULT_MIN_RATIO};
use crate::rules::touch_target::MIN_TOUCH_TARGET_DP;
use crate::rules::{ContentLabelRule, DuplicateLabelRule, Rule, TextContrastRule, TouchTargetRule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Built-in rule settings
    #[serde(default)]
    pub rules: RulesConfig,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Settings for each built-in rule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub touch_target: TouchTargetConfig,
    #[serde(default)]
    pub content_label: ToggleConfig,
    #[serde(default)]
    pub duplicate_label: ToggleConfig,
    #[serde(default)]
    pub text_contrast: TextContrastConfig,
}

/// A rule with no parameters besides on/off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchTargetConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Physical pixels per dp of the captured display
    #[serde(default = "default_density")]
    pub density: f32,

    /// Minimum side length in dp
    #[serde(default = "default_min_dp")]
    pub min_dp: u32,
}

impl Default for TouchTargetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            density: default_density(),
            min_dp: default_min_dp(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContrastConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_min_ratio")]
    pub min_ratio: f64,

    #[serde(default = "default_large_text_min_ratio")]
    pub large_text_min_ratio: f64,

    /// Surface assumed behind translucent backgrounds (any color syntax)
    #[serde(default = "default_backdrop")]
    pub backdrop: String,
}

impl Default for TextContrastConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_ratio: default_min_ratio(),
            large_text_min_ratio: default_large_text_min_ratio(),
            backdrop: default_backdrop(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Evaluate nodes on a thread pool
    #[serde(default)]
    pub parallel: bool,

    /// Deepest tree accepted before the scan fails
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            max_depth: default_max_depth(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_density() -> f32 {
    1.0
}

fn default_min_dp() -> u32 {
    MIN_TOUCH_TARGET_DP
}

fn default_min_ratio() -> f64 {
    DEFAULT_MIN_RATIO
}

fn default_large_text_min_ratio() -> f64 {
    DEFAULT_LARGE_TEXT_MIN_RATIO
}

fn default_backdrop() -> String {
    "white".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Instantiate the enabled built-in rules in their canonical order
    pub fn build_rules(&self) -> Result<Vec<Arc<dyn Rule>>> {
        let mut rules: Vec<Arc<dyn Rule>> = Vec::new();
        let r = &self.rules;

        if r.touch_target.enabled {
            rules.push(Arc::new(TouchTargetRule::with_min_dp(
                r.touch_target.density,
                r.touch_target.min_dp,
            )?));
        }
        if r.content_label.enabled {
            rules.push(Arc::new(ContentLabelRule));
        }
        if r.duplicate_label.enabled {
            rules.push(Arc::new(DuplicateLabelRule));
        }
        if r.text_contrast.enabled {
            let backdrop = parse_backdrop(&r.text_contrast.backdrop)?;
            rules.push(Arc::new(TextContrastRule::new(
                r.text_contrast.min_ratio,
                r.text_contrast.large_text_min_ratio,
                backdrop,
            )?));
        }

        Ok(rules)
    }

    /// Engine loaded with the enabled rules and engine settings
    pub fn build_engine(&self) -> Result<RuleEngine> {
        Ok(RuleEngine::new(self.build_rules()?)
            .with_parallel(self.engine.parallel)
            .with_max_depth(self.engine.max_depth))
    }
}

fn parse_backdrop(value: &str) -> Result<Color> {
    contrast::parse_color(value)
        .ok_or_else(|| ScanError::Config(format!("unrecognized backdrop color '{}'", value)))
}

/// Load configuration from a path, falling back to defaults if it is missing
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = if path.extension().map(|e| e == "toml").unwrap_or(false) {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Default config location, relative to the working directory
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".uiscanbot/config.toml")
}

/// Write default configuration to a file
pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if path.extension().map(|e| e == "toml").unwrap_or(false) {
        toml::to_string_pretty(&config).map_err(|e| ScanError::Config(e.to_string()))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_builds_all_rules() {
        let config = Config::default();
        let ids: Vec<String> = config
            .build_rules()
            .unwrap()
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(
            ids,
            vec!["TouchTargetSize", "MissingContentDescription", "DuplicateLabel", "TextContrast"]
        );
    }

    #[test]
    fn test_disabled_rules_skipped() {
        let toml_src = r#"
            [rules.touch_target]
            enabled = false

            [rules.text_contrast]
            enabled = false
        "#;
        let config: Config = toml::from_str(toml_src).unwrap();
        assert_eq!(config.build_rules().unwrap().len(), 2);
        assert_eq!(config.engine.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_bad_density_rejected_at_build() {
        let mut config = Config::default();
        config.rules.touch_target.density = 0.0;
        assert!(matches!(config.build_rules(), Err(ScanError::Config(_))));
    }

    #[test]
    fn test_bad_backdrop_rejected_at_build() {
        let mut config = Config::default();
        config.rules.text_contrast.backdrop = "plaid".to_string();
        assert!(matches!(config.build_engine(), Err(ScanError::Config(_))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.rules.touch_target.density, 1.0);
    }

    #[test]
    fn test_yaml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "rules:\n  touch_target:\n    density: 2.75\nengine:\n  parallel: true\n",
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.rules.touch_target.density, 2.75);
        assert_eq!(config.rules.touch_target.min_dp, 48);
        assert!(config.engine.parallel);
    }

    #[test]
    fn test_write_then_load_default_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        write_default_config(&path).unwrap();
        let config = load_config(&path).unwrap();
        assert!(config.rules.duplicate_label.enabled);
        assert_eq!(config.rules.text_contrast.backdrop, "white");
        assert_eq!(config.log.level, "warn");
    }
}
