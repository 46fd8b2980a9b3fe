use pkgrecipe_core::Environment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// pkgrecipe CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,

    /// Destination directory for the local repository output handler
    pub repo_dir: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            repo_dir: PathBuf::from("./repo"),
        }
    }
}

impl CliConfig {
    /// Load from configuration file
    pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    /// Environment defaults for output handlers; the input document and
    /// command line arguments both take precedence
    pub fn defaults(&self) -> Environment {
        let mut env = Environment::new();
        env.insert("repo_dir", self.repo_dir.to_string_lossy().into_owned());
        env
    }
}
