//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ilm/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The resolved values are split into `DirectoryConfig`, `PromptConfig` and
//! `SubmitterConfig` and handed to each component at construction.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::directory::{DEFAULT_ALL_LABEL, DEFAULT_OTHER_LABEL, DirectoryConfig};
use crate::feedback::prompt::{DEFAULT_AUTO_DISMISS, DEFAULT_AUTO_SHOW_DELAY, DEFAULT_SUCCESS_DISPLAY};
use crate::feedback::{FormEncoding, PromptConfig, SubmitterConfig};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IlmConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub prompt: PromptSettings,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub path: Option<String>,
    pub categories: Option<Vec<String>>,
    pub all_label: Option<String>,
    pub other_label: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FeedbackConfig {
    pub endpoint_url: Option<String>,
    pub encoding: Option<FormEncoding>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PromptSettings {
    pub auto_show: Option<bool>,
    pub auto_show_delay_ms: Option<u64>,
    pub auto_dismiss_ms: Option<u64>,
    pub success_display_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CATEGORIES: &[&str] = &["Quran", "Hadith", "Aakhirah", "Islamic History"];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// `None` = use the bundled catalog.
    pub catalog_path: Option<PathBuf>,
    pub directory: DirectoryConfig,
    pub submitter: SubmitterConfig,
    pub prompt: PromptConfig,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub catalog_path: Option<&'a Path>,
    pub endpoint_url: Option<&'a str>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.ilm/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ilm").join("config.toml"))
}

/// Load config from `~/.ilm/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `IlmConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<IlmConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(IlmConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(IlmConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: IlmConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Ilm Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [catalog]
# path = "/path/to/topics-list.json"   # Or set ILM_CATALOG; default is the bundled catalog
# categories = ["Quran", "Hadith", "Aakhirah", "Islamic History"]
# all_label = "All"
# other_label = "Other"

# [feedback]
# endpoint_url = "https://script.google.com/macros/s/.../exec"   # Or set ILM_FEEDBACK_URL
# encoding = "multipart"             # "multipart" or "urlencoded"

# [prompt]
# auto_show = true
# auto_show_delay_ms = 0
# auto_dismiss_ms = 3000
# success_display_ms = 2000
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `catalog_categories` is the order shipped inside the catalog document, used
/// when the config file names none.
pub fn resolve(
    config: &IlmConfig,
    cli: &CliOverrides<'_>,
    catalog_categories: Option<&[String]>,
) -> ResolvedConfig {
    ResolvedConfig {
        catalog_path: resolve_catalog_path(config, cli),
        directory: resolve_directory(config, catalog_categories),
        submitter: resolve_submitter(config, cli),
        prompt: resolve_prompt(config),
    }
}

/// Catalog path: CLI → env → config → bundled.
pub fn resolve_catalog_path(config: &IlmConfig, cli: &CliOverrides<'_>) -> Option<PathBuf> {
    pick_catalog_path(
        cli.catalog_path,
        std::env::var("ILM_CATALOG").ok(),
        config.catalog.path.as_deref(),
    )
}

/// Blank env or config values fall through to the next layer.
fn pick_catalog_path(
    cli: Option<&Path>,
    env: Option<String>,
    config: Option<&str>,
) -> Option<PathBuf> {
    cli.map(Path::to_path_buf)
        .or_else(|| env.filter(|p| !p.trim().is_empty()).map(PathBuf::from))
        .or_else(|| config.filter(|p| !p.trim().is_empty()).map(PathBuf::from))
}

fn resolve_directory(config: &IlmConfig, catalog_categories: Option<&[String]>) -> DirectoryConfig {
    // Categories: config → catalog document → default
    let category_order = config
        .catalog
        .categories
        .clone()
        .or_else(|| catalog_categories.map(<[String]>::to_vec))
        .unwrap_or_else(|| DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect());

    DirectoryConfig {
        category_order,
        all_label: config
            .catalog
            .all_label
            .clone()
            .unwrap_or_else(|| DEFAULT_ALL_LABEL.to_string()),
        other_label: config
            .catalog
            .other_label
            .clone()
            .unwrap_or_else(|| DEFAULT_OTHER_LABEL.to_string()),
    }
}

fn resolve_submitter(config: &IlmConfig, cli: &CliOverrides<'_>) -> SubmitterConfig {
    // Endpoint: CLI → env → config
    let endpoint_url = cli
        .endpoint_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("ILM_FEEDBACK_URL").ok())
        .or_else(|| config.feedback.endpoint_url.clone())
        .filter(|url| !url.trim().is_empty());

    // Encoding: env → config → default
    let encoding = std::env::var("ILM_FEEDBACK_ENCODING")
        .ok()
        .and_then(|value| {
            let parsed = FormEncoding::parse(&value);
            if parsed.is_none() {
                warn!("Ignoring unknown ILM_FEEDBACK_ENCODING value: {}", value);
            }
            parsed
        })
        .or(config.feedback.encoding)
        .unwrap_or_default();

    SubmitterConfig {
        endpoint_url,
        encoding,
    }
}

fn resolve_prompt(config: &IlmConfig) -> PromptConfig {
    let settings = &config.prompt;
    PromptConfig {
        auto_show: settings.auto_show.unwrap_or(true),
        auto_show_delay: settings
            .auto_show_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_AUTO_SHOW_DELAY),
        auto_dismiss_after: settings
            .auto_dismiss_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_AUTO_DISMISS),
        success_display: settings
            .success_display_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SUCCESS_DISPLAY),
    }
}
