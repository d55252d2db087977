use crate::types::Backend;
use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Persistent defaults, overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_threads")]
    pub threads: usize,
    #[serde(default = "default_samtools")]
    pub samtools: String,
    #[serde(default)]
    pub backend: Backend,
}

fn default_threads() -> usize {
    1
}

fn default_samtools() -> String {
    "samtools".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            samtools: default_samtools(),
            backend: Backend::default(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("org", "fastx2bam", "fastx2bam") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                return Self::from_path(&config_path);
            }
        }
        Config::default()
    }

    /// Falls back to defaults when the file is unreadable or malformed.
    pub fn from_path(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                return Config::default();
            }
        };

        match toml::from_str(&content) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Config::default()
            }
        }
    }
}
