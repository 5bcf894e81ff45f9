//! Renderer configuration.
//!
//! Loads, validates, and defaults the JSON config that controls markup mode,
//! wrapping, and the page metadata supplied outside the CLI description.
use crate::spec::ExtraSection;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_WRAP_WIDTH: usize = 78;
pub const MIN_WRAP_WIDTH: usize = 10;
pub const DEFAULT_MAX_DEPTH: usize = 32;

const CONFIG_DIR_NAME: &str = "climan";
const CONFIG_FILE_NAME: &str = "config.json";

/// Whether text handed to the renderer is already ROFF-safe.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarkupMode {
    /// Text is plain and must be escaped.
    #[default]
    Escaped,
    /// Text already carries markup and is passed through.
    Raw,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub schema_version: u32,
    #[serde(default)]
    pub markup_mode: MarkupMode,
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
    #[serde(default = "default_section")]
    pub section: String,
    #[serde(default = "default_manual")]
    pub manual: String,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Replaces the spec's authors when non-empty.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Appended after the spec's own extra sections.
    #[serde(default)]
    pub extra_sections: Vec<ExtraSection>,
}

fn default_wrap_width() -> usize {
    DEFAULT_WRAP_WIDTH
}

fn default_section() -> String {
    "1".to_string()
}

fn default_manual() -> String {
    "Manual".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for RenderConfig {
    fn default() -> Self {
        default_config()
    }
}

/// Build the config used when no config file is found.
pub fn default_config() -> RenderConfig {
    RenderConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        markup_mode: MarkupMode::Escaped,
        wrap_width: DEFAULT_WRAP_WIDTH,
        section: default_section(),
        manual: default_manual(),
        max_depth: DEFAULT_MAX_DEPTH,
        authors: Vec::new(),
        extra_sections: Vec::new(),
    }
}

/// Render a pretty JSON config stub.
pub fn config_stub() -> Result<String> {
    serde_json::to_string_pretty(&default_config()).context("serialize config stub")
}

/// Per-user config location, if the platform has one.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: RenderConfig =
        serde_json::from_slice(&bytes).context("parse render config JSON")?;
    validate_config(&config).with_context(|| format!("validate config {}", path.display()))?;
    Ok(config)
}

/// Resolve the effective config: explicit path, then the user config, then defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<RenderConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match user_config_path() {
        Some(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "using user config");
            load_config(&path)
        }
        _ => Ok(default_config()),
    }
}

/// Validate schema version and numeric limits.
pub fn validate_config(config: &RenderConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported render config schema_version {}",
            config.schema_version
        ));
    }
    if config.wrap_width < MIN_WRAP_WIDTH {
        return Err(anyhow!(
            "wrap_width {} is below the minimum of {}",
            config.wrap_width,
            MIN_WRAP_WIDTH
        ));
    }
    if config.max_depth == 0 {
        return Err(anyhow!("max_depth must be at least 1"));
    }
    if config.section.trim().is_empty() {
        return Err(anyhow!("section must not be empty"));
    }
    Ok(())
}
