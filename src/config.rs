use crate::{MockError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::warn;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".litmock.toml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV: &str = "LITMOCK_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub builder: BuilderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoolConfig {
    /// Recycle instance state of disposed mocks
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Idle instances kept per mocked type
    #[serde(default = "default_slots")]
    pub slots: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            slots: default_slots(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Initial setup capacity of full and static builders
    #[serde(default = "default_setup_capacity")]
    pub setup_capacity: usize,
    /// Initial setup capacity of partial builders
    #[serde(default = "default_partial_capacity")]
    pub partial_capacity: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            setup_capacity: default_setup_capacity(),
            partial_capacity: default_partial_capacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (e.g., "warn", "debug")
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON log lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_slots() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * 4
}

fn default_setup_capacity() -> usize {
    32
}

fn default_partial_capacity() -> usize {
    8
}

fn default_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from LITMOCK_CONFIG, or from a file in the current directory
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => {
                let config_path = Path::new(DEFAULT_CONFIG_FILE);
                if !config_path.exists() {
                    return Ok(Config::default());
                }
                Self::load_from(config_path)
            }
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path).map_err(|e| {
            MockError::Config(format!(
                "Failed to read config file {:?}: {}",
                config_path, e
            ))
        })?;

        Self::parse(&content).map_err(|e| {
            MockError::Config(format!(
                "Failed to parse TOML config from {:?}: {}",
                config_path, e
            ))
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        config.builder.setup_capacity = config.builder.setup_capacity.max(1);
        config.builder.partial_capacity = config.builder.partial_capacity.max(1);
        Ok(config)
    }

    /// Load default config if file is missing, otherwise return error on parse failure
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Warning: Failed to load config: {}. Using defaults.", e);
                Config::default()
            }
        }
    }

    /// Process-wide configuration, loaded on first use
    pub fn global() -> &'static Config {
        static GLOBAL: OnceLock<Config> = OnceLock::new();
        GLOBAL.get_or_init(Config::load_or_default)
    }

    /// Path the configuration would be read from, if any
    pub fn source() -> Option<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                path.exists().then_some(path)
            }
        }
    }
}
