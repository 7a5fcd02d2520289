use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{error, info, LevelFilter};
use serde::{Deserialize, Serialize};

use crate::def::{APP_NAME_E, DEFAULT_CHANNEL};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Method channel the host registers the handler on
    pub channel: String,

    /// error, warn, info, debug or trace
    pub log_level: String,

    /// Where decoded images are staged for desktop backends
    pub cache_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            log_level: String::from("info"),
            cache_dir: None,
        }
    }
}

impl Config {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

pub fn config_file_path(dir: &Path) -> PathBuf {
    dir.join(format!("{APP_NAME_E}.toml"))
}

/// Load the config from `dir`, falling back to defaults.
pub fn load(dir: &Path) -> Config {
    match read_config(&config_file_path(dir)) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("failed to read config: {:?}", err);
            Config::default()
        }
    }
}

/// Like [`load`], but writes the defaults out when no config file exists yet.
pub fn load_or_init(dir: &Path) -> Config {
    if config_file_path(dir).exists() {
        return load(dir);
    }
    let cfg = Config::default();
    save(dir, &cfg);
    cfg
}

pub fn save(dir: &Path, cfg: &Config) {
    if let Err(err) = write_config(dir, cfg) {
        error!("failed to save config: {:?}", err)
    } else {
        info!("config saved");
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let config_str = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&config_str)?)
}

fn write_config(dir: &Path, cfg: &Config) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let cfg_str = toml::to_string(cfg)?;
    std::fs::write(config_file_path(dir), cfg_str)?;
    Ok(())
}
