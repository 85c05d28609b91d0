// crates/kuma-core/src/config.rs - Configuration System
//
// Configuration schema and loading for the kuma CLI.
//
// CONFIGURATION HIERARCHY (highest to lowest priority):
// 1. Command-line arguments (--json)
// 2. Environment variables (KUMA_LOCALE, KUMA_EDITOR)
// 3. Workspace config file (.kuma/config.toml)
// 4. Built-in defaults
//
// The workspace itself (--workspace > KUMA_WORKSPACE > current directory) is
// resolved by the CLI before any of this, since the file lives inside it.
// Missing config files are not errors. Every field has a default so a
// partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::i18n::Locale;
use crate::session::DEFAULT_HISTORY_LIMIT;

/// Directory inside a workspace that holds kuma's own files
pub const KUMA_DIR: &str = ".kuma";
pub const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur during configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid TOML syntax in {file}: {error}")]
    ParseError { file: String, error: String },

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("I/O error reading config: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Complete configuration schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KumaConfig {
    /// Language for command output: "zh" or "en"
    #[serde(default)]
    pub locale: Locale,

    #[serde(default)]
    pub console: ConsoleConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Interactive console settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Maximum typed lines kept in history; 0 keeps everything
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_prompt")]
    pub prompt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Editor command (overrides KUMA_EDITOR and EDITOR)
    #[serde(default)]
    pub command: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,
}

/// Output formatting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// "human" or "json"
    #[serde(default = "default_output_format")]
    pub default_format: String,

    /// "auto", "always" or "never"
    #[serde(default = "default_color")]
    pub color: String,
}

impl KumaConfig {
    pub fn json_output(&self) -> bool {
        self.output.default_format == "json"
    }
}

/// Configuration loading
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from defaults, the workspace file and the environment
    pub fn load_config(workspace_path: Option<&Path>) -> ConfigResult<KumaConfig> {
        let mut config = match workspace_path {
            Some(path) => Self::try_load_workspace_config(path)?.unwrap_or_default(),
            None => KumaConfig::default(),
        };

        Self::apply_env_overrides(&mut config)?;
        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Commented config file written by `kuma init`
    pub fn generate_default_config() -> String {
        format!(
            r#"# Kuma Configuration File
#
# Lines starting with # are comments and are ignored.

# Language for command output: "zh" or "en"
locale = "zh"

[console]
# Typed lines kept in the console history (0 = unbounded)
history_limit = {history_limit}

# Prompt shown by `kuma console`
prompt = "{prompt}"

[editor]
# Editor command (overrides KUMA_EDITOR and EDITOR env vars)
# command = "hx"
# args = []

[output]
# Default output format: "human" or "json"
default_format = "human"

# Color output: "auto", "always", "never"
color = "auto"
"#,
            history_limit = default_history_limit(),
            prompt = default_prompt(),
        )
    }

    /// Read `.kuma/config.toml` from the workspace, if present
    pub fn try_load_workspace_config(workspace_path: &Path) -> ConfigResult<Option<KumaConfig>> {
        let config_path = workspace_path.join(KUMA_DIR).join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(None);
        }

        let config_content = std::fs::read_to_string(&config_path)?;

        let config: KumaConfig =
            toml::from_str(&config_content).map_err(|e| ConfigError::ParseError {
                file: config_path.display().to_string(),
                error: e.to_string(),
            })?;

        debug!(path = %config_path.display(), "loaded workspace config");
        Ok(Some(config))
    }

    /// Apply environment variable overrides
    ///
    /// - KUMA_LOCALE -> locale
    /// - KUMA_EDITOR -> editor.command
    pub fn apply_env_overrides(config: &mut KumaConfig) -> ConfigResult<()> {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    fn apply_overrides(
        config: &mut KumaConfig,
        var: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<()> {
        if let Some(locale) = var("KUMA_LOCALE") {
            config.locale = locale
                .parse()
                .map_err(|e: crate::i18n::LocaleError| ConfigError::ValidationError(e.to_string()))?;
        }

        if let Some(editor) = var("KUMA_EDITOR") {
            config.editor.command = Some(editor);
        }

        Ok(())
    }

    pub fn validate_config(config: &KumaConfig) -> ConfigResult<()> {
        match config.output.default_format.as_str() {
            "human" | "json" => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid output format '{}'. Must be one of: human, json",
                    config.output.default_format
                )));
            }
        }

        match config.output.color.as_str() {
            "auto" | "always" | "never" => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid color setting '{}'. Must be one of: auto, always, never",
                    config.output.color
                )));
            }
        }

        if config.console.prompt.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Console prompt cannot be empty".to_string(),
            ));
        }

        if config.editor.command.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "Editor command cannot be empty when set".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}
fn default_prompt() -> String {
    "kuma> ".to_string()
}
fn default_output_format() -> String {
    "human".to_string()
}
fn default_color() -> String {
    "auto".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            prompt: default_prompt(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: default_output_format(),
            color: default_color(),
        }
    }
}
