use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub page_size: u16,
    pub preview_limit: u16,
    pub recent_transactions: u16,
    pub data_path: PathBuf,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = stable_app_data_dir();
        Self {
            page_size: 5,
            preview_limit: 3,
            recent_transactions: 3,
            data_path: base.join("data.json5"),
            config_path: base.join("config.toml"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "config io failed: {error}"),
            Self::Parse(error) => write!(f, "config parse failed: {error}"),
            Self::Serialize(error) => write!(f, "config serialize failed: {error}"),
            Self::Invalid(error) => write!(f, "invalid config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

pub fn stable_app_data_dir() -> PathBuf {
    std::env::temp_dir().join("bankdash")
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.page_size == 0 || cfg.page_size > 100 {
        return Err("page_size out of range".into());
    }

    if cfg.preview_limit == 0 || cfg.preview_limit > 20 {
        return Err("preview_limit out of range".into());
    }

    if cfg.data_path.as_os_str().is_empty() {
        return Err("data_path is required".into());
    }

    if cfg.config_path.as_os_str().is_empty() {
        return Err("config_path is required".into());
    }

    Ok(())
}

/// Reads the TOML config at `path` (or the default location). A missing file
/// yields the defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Config::default().config_path);

    let mut config = match std::fs::read_to_string(&config_path) {
        Ok(raw) => toml::from_str::<Config>(&raw).map_err(ConfigError::Parse)?,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(error) => return Err(ConfigError::Io(error)),
    };
    config.config_path = config_path;

    validate(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    validate(cfg).map_err(ConfigError::Invalid)?;
    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let encoded = toml::to_string_pretty(cfg).map_err(ConfigError::Serialize)?;
    std::fs::write(&cfg.config_path, encoded)?;
    Ok(())
}
