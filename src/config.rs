//! Configuration primitives for resumegen.
//!
//! Settings live in an optional TOML file. Lookup order:
//!   1. an explicit path passed by the caller (`--config`)
//!   2. `resumegen.toml` in the run root
//!   3. the per-user config directory, e.g.
//!      `$XDG_CONFIG_HOME/resumegen/config.toml` on Linux,
//!      `~/Library/Application Support/resumegen/config.toml` on macOS,
//!      `%APPDATA%\resumegen\config\config.toml` on Windows
//!
//! A missing file means defaults. The run root itself comes from the
//! `RESUMEGEN_HOME` environment variable, or the current directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::style::RenderVariant;

/// Environment variable overriding the run root.
pub const HOME_ENV_VAR: &str = "RESUMEGEN_HOME";
/// File name looked up in the run root.
pub const LOCAL_CONFIG_FILE_NAME: &str = "resumegen.toml";
/// File name inside the per-user config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// The only package format the generator writes.
pub const DOCX_EXTENSION: &str = "docx";

/// Root configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory holding the record files, relative to the run root.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory receiving generated documents, relative to the run root.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Styling preset.
    #[serde(default)]
    pub variant: RenderVariant,
    /// Extension of generated files; must name the DOCX format.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            variant: RenderVariant::default(),
            extension: default_extension(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_extension() -> String {
    DOCX_EXTENSION.into()
}

impl GeneratorConfig {
    /// Resolves `data_dir` against `root` unless it is already absolute.
    pub fn data_path(&self, root: &Path) -> PathBuf {
        root.join(&self.data_dir)
    }

    /// Resolves `output_dir` against `root` unless it is already absolute.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }

    /// Rejects settings the generator cannot honour.
    pub fn validate(&self) -> Result<()> {
        let extension = self.extension.trim_start_matches('.');
        if !extension.eq_ignore_ascii_case(DOCX_EXTENSION) {
            bail!(
                "Unsupported output extension '{}'; only '{DOCX_EXTENSION}' is written",
                self.extension
            );
        }
        Ok(())
    }
}

/// Returns the directory a run is anchored to.
///
/// Order of precedence:
/// 1. `RESUMEGEN_HOME` environment variable.
/// 2. The current working directory.
pub fn run_root() -> Result<PathBuf> {
    if let Ok(path) = env::var(HOME_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    env::current_dir().context("Unable to determine the current directory")
}

/// Path of the config file kept in the run root.
pub fn local_config_path(root: &Path) -> PathBuf {
    root.join(LOCAL_CONFIG_FILE_NAME)
}

/// Path of the per-user config file, when the OS exposes a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "resumegen").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Loads the config from `path`.
pub fn load(path: &Path) -> Result<GeneratorConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: GeneratorConfig = toml::from_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}

/// Loads the first config found in lookup order, or defaults.
pub fn load_or_default(explicit: Option<&Path>, root: &Path) -> Result<GeneratorConfig> {
    if let Some(path) = explicit {
        return load(path);
    }
    let local = local_config_path(root);
    if local.exists() {
        return load(&local);
    }
    match user_config_path() {
        Some(path) if path.exists() => load(&path),
        _ => Ok(GeneratorConfig::default()),
    }
}

/// Persists the config as pretty TOML, creating parent directories.
pub fn save(config: &GeneratorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Unable to create {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(config)?;
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
