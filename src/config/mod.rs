//! Settings file
//!
//! Terrawork reads an optional TOML file. Every key has a default, so the
//! tool works with no file at all: `workspaces.json` and the `terraform_*`
//! directories then live in the current directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerraworkError};
use crate::tfconfig::DockerProvider;

/// Looked up in the current directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "terrawork.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Registry file (workspace -> containers)
    pub registry: PathBuf,
    /// Parent of all Terraform working directories
    pub work_root: PathBuf,
    pub tools: ToolSettings,
    pub docker: DockerProvider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub terraform: String,
    pub docker: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry: PathBuf::from("workspaces.json"),
            work_root: PathBuf::from("."),
            tools: ToolSettings::default(),
            docker: DockerProvider::default(),
        }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            terraform: "terraform".to_string(),
            docker: "docker".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from `terrawork.toml` if present,
    /// or fall back to defaults. A path given explicitly must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(TerraworkError::ConfigError(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)
            }
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.exists() {
                    Self::from_file(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&raw).map_err(|e| {
            TerraworkError::ConfigError(format!("invalid TOML in {}: {}", path.display(), e))
        })?;
        log::debug!("loaded settings from {}", path.display());
        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line / environment overrides on top of the file
    pub fn with_overrides(mut self, registry: Option<PathBuf>, work_root: Option<PathBuf>) -> Self {
        if let Some(registry) = registry {
            self.registry = registry;
        }
        if let Some(work_root) = work_root {
            self.work_root = work_root;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.tools.terraform.trim().is_empty() {
            return Err(TerraworkError::ConfigError(
                "tools.terraform must not be empty".to_string(),
            ));
        }
        if self.tools.docker.trim().is_empty() {
            return Err(TerraworkError::ConfigError(
                "tools.docker must not be empty".to_string(),
            ));
        }
        if self.registry.as_os_str().is_empty() {
            return Err(TerraworkError::ConfigError(
                "registry path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
