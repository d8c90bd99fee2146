use crate::config::constants::config_files;
use crate::config::core::{HttpClientConfig, ModelConfig, PromptConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Main configuration structure for Pageforge
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageforgeConfig {
    /// Model selection and request shaping
    #[serde(default)]
    pub model: ModelConfig,

    /// HTTP and streaming timeouts
    #[serde(default)]
    pub client: HttpClientConfig,

    /// Prompt customisation
    #[serde(default)]
    pub prompt: PromptConfig,
}

impl PageforgeConfig {
    /// Write the default configuration to `output`.
    pub fn create_sample_config<P: AsRef<Path>>(output: P, force: bool) -> Result<()> {
        let output = output.as_ref();
        if output.exists() && !force {
            anyhow::bail!(
                "Config file already exists: {} (pass --force to overwrite)",
                output.display()
            );
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let config_content = toml::to_string_pretty(&PageforgeConfig::default())
            .context("Failed to serialize default configuration")?;
        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }
}

/// Configuration manager for loading configuration files
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PageforgeConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    /// Search the workspace, then the home directory; fall back to defaults.
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_home(workspace, dirs::home_dir())
    }

    fn load_with_home(workspace: impl AsRef<Path>, home: Option<PathBuf>) -> Result<Self> {
        let workspace = workspace.as_ref();

        let mut candidates = vec![
            workspace.join(config_files::FILE_NAME),
            workspace
                .join(config_files::DIR_NAME)
                .join(config_files::FILE_NAME),
        ];
        if let Some(home_dir) = home {
            candidates.push(
                home_dir
                    .join(config_files::DIR_NAME)
                    .join(config_files::FILE_NAME),
            );
        }

        for path in candidates {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        debug!("no pageforge.toml found; using defaults");
        Ok(Self {
            config: PageforgeConfig::default(),
            config_path: None,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: PageforgeConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if !config.model.is_known_model() {
            warn!(model = %config.model.model, "model is not in the supported list; sending it as-is");
        }
        debug!(path = %path.display(), "loaded configuration");

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &PageforgeConfig {
        &self.config
    }

    /// Mutable access for command-line overrides
    pub fn config_mut(&mut self) -> &mut PageforgeConfig {
        &mut self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
