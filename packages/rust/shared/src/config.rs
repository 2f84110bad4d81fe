//! Application configuration for gqldoc.
//!
//! User config lives at `~/.gqldoc/gqldoc.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GqlDocError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "gqldoc.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".gqldoc";

// ---------------------------------------------------------------------------
// Config structs (matching gqldoc.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document rendering settings.
    #[serde(default)]
    pub render: RenderConfig,
}

/// `[render]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Document title (rendered as the H1).
    #[serde(default = "default_title")]
    pub title: String,

    /// Whether to emit the table of contents.
    #[serde(default = "default_true")]
    pub table_of_contents: bool,

    /// Whether to minify HTML table and metadata fragments.
    #[serde(default = "default_true")]
    pub minify: bool,

    /// Column budgets for wrapped text.
    #[serde(default)]
    pub widths: WrapWidths,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            table_of_contents: true,
            minify: true,
            widths: WrapWidths::default(),
        }
    }
}

impl RenderConfig {
    /// Reject settings that cannot produce a document.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(GqlDocError::config("render.title must not be empty"));
        }
        Ok(())
    }
}

fn default_title() -> String {
    "Schema Types".into()
}
fn default_true() -> bool {
    true
}

/// `[render.widths]` section. A width of 0 disables wrapping for that fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapWidths {
    /// Entity and root-field descriptions rendered as prose.
    #[serde(default = "default_description_width")]
    pub description: usize,

    /// Description cells of field and input-field tables.
    #[serde(default = "default_cell_width")]
    pub field_description: usize,

    /// Description lines inside argument tables.
    #[serde(default = "default_cell_width")]
    pub argument_description: usize,

    /// Enum value lines; the rendered value label is subtracted.
    #[serde(default = "default_cell_width")]
    pub enum_value: usize,
}

impl Default for WrapWidths {
    fn default() -> Self {
        Self {
            description: default_description_width(),
            field_description: default_cell_width(),
            argument_description: default_cell_width(),
            enum_value: default_cell_width(),
        }
    }
}

fn default_description_width() -> usize {
    80
}
fn default_cell_width() -> usize {
    69
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.gqldoc/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GqlDocError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.gqldoc/gqldoc.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GqlDocError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        GqlDocError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.render.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| GqlDocError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| GqlDocError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| GqlDocError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
