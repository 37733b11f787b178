//! Configuration system for tsflow.
//!
//! Loads config from:
//! 1. Global: ~/.config/tsflow/config.toml
//! 2. Per-project: .tsflow/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [rewrites]
//! libraries = ["react", "react-native"]
//!
//! [output]
//! format = "flow"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tsflow_convert::RewriteConfig;

/// Rewrite configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RewritesConfig {
    /// Libraries whose rewrites are enabled. `None` enables every built-in.
    pub libraries: Option<Vec<String>>,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format when `--format` isn't given.
    pub format: Option<String>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TsflowConfig {
    pub rewrites: RewritesConfig,
    pub output: OutputConfig,
}

impl TsflowConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/tsflow/config.toml,
    /// then merges with per-project config from .tsflow/config.toml.
    pub fn load(root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::load_file(&global_path) {
                config = config.merge(global);
            }
        }

        let project_path = root.join(".tsflow").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("tsflow").join("config.toml"))
    }

    /// Load config from a file path. A malformed file is reported and skipped.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("ignoring {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge another config into this one; keys set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            rewrites: RewritesConfig {
                libraries: other.rewrites.libraries.or(self.rewrites.libraries),
            },
            output: OutputConfig {
                format: other.output.format.or(self.output.format),
            },
        }
    }

    /// Output format: the configured one, else "flow".
    pub fn format(&self) -> &str {
        self.output.format.as_deref().unwrap_or("flow")
    }

    /// Build the rewrite configuration for the enabled libraries.
    pub fn rewrite_config(&self) -> RewriteConfig {
        match &self.rewrites.libraries {
            None => RewriteConfig::builtin().clone(),
            Some(names) => {
                let (config, unknown) = RewriteConfig::select(names);
                for name in unknown {
                    tracing::warn!("unknown rewrite library: {name}");
                }
                config
            }
        }
    }
}
