//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default location of the config file.
pub const DEFAULT_CONFIG_PATH: &str = ".mbdefaults/config.json";

/// Environment variable overriding `global_dir`.
pub const GLOBAL_DIR_ENV: &str = "MBDEFAULTS_GLOBAL_DIR";

/// Settings read from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Directory of global managed files
    pub global_dir: PathBuf,

    /// Host instance name reported in logs
    pub instance_name: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            global_dir: PathBuf::from(".mbdefaults/global"),
            instance_name: "local".to_string(),
        }
    }
}

impl CliConfig {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.is_file() {
                    Self::read(default)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(std::env::var_os(GLOBAL_DIR_ENV).map(PathBuf::from));
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing config {}", path.display()))
    }

    fn apply_env(&mut self, global_dir: Option<PathBuf>) {
        if let Some(dir) = global_dir {
            self.global_dir = dir;
        }
    }
}
