use crate::error::{Result, ToolboxError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How parameter values are shown in the summary table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ParamsColumnKind {
    /// One column per parameter name
    #[default]
    Default,
    /// All parameters in a single column
    Combined,
    /// One column per parameter position, shared across types
    Recyclable,
}

/// benchtoolbox user settings
///
/// Stored in ~/.benchtoolbox/config.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolboxSettings {
    #[serde(default)]
    pub params_column: ParamsColumnKind,

    /// `{0}` is replaced by the parameter name, `{1}` by its value
    #[serde(default = "default_combined_format")]
    pub combined_format: String,

    #[serde(default = "default_combined_separator")]
    pub combined_separator: String,

    #[serde(default)]
    pub combined_prefix: String,

    #[serde(default)]
    pub combined_suffix: String,

    /// Header prefix for recyclable columns whose name differs across types
    #[serde(default = "default_generic_param_name")]
    pub generic_param_name: String,

    #[serde(default)]
    pub join_summary: bool,

    /// Exporters write below `<artifacts_dir>/results`
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: String,
}

fn default_combined_format() -> String {
    "{0}={1}".to_string()
}

fn default_combined_separator() -> String {
    ", ".to_string()
}

fn default_generic_param_name() -> String {
    "Param".to_string()
}

fn default_artifacts_dir() -> String {
    "BenchmarkDotNet.Artifacts".to_string()
}

impl Default for ToolboxSettings {
    fn default() -> Self {
        Self {
            params_column: ParamsColumnKind::default(),
            combined_format: default_combined_format(),
            combined_separator: default_combined_separator(),
            combined_prefix: String::new(),
            combined_suffix: String::new(),
            generic_param_name: default_generic_param_name(),
            join_summary: false,
            artifacts_dir: default_artifacts_dir(),
        }
    }
}

impl ToolboxSettings {
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".benchtoolbox")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load from the settings file, or defaults if there is none
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let toml_string =
            toml::to_string_pretty(self).map_err(|e| ToolboxError::ConfigError(e.to_string()))?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    /// Write the defaults to the settings file
    pub fn init() -> Result<()> {
        Self::default().save()
    }

    pub fn results_dir(&self) -> PathBuf {
        Path::new(&self.artifacts_dir).join("results")
    }
}
