use crate::error::{GitMergerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for git-merger.
///
/// Currently only the default source/target branches for merge commands.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub branches: BranchesConfig,
}

/// Default branches used when `--source`/`--target` are not given.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BranchesConfig {
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_target")]
    pub target: String,
}

fn default_source() -> String {
    "dev".to_string()
}

fn default_target() -> String {
    "master".to_string()
}

impl Default for BranchesConfig {
    fn default() -> Self {
        BranchesConfig {
            source: default_source(),
            target: default_target(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            branches: BranchesConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitmerger.toml` in current directory
/// 3. `.gitmerger.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitmerger.toml").exists() {
        fs::read_to_string("./gitmerger.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitmerger.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| GitMergerError::config(e.to_string()))
}
