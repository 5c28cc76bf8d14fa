use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use crate::core::{RankingSettings, ScoringTables};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub likes: LikeSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_seed_path")]
    pub seed_path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { seed_path: default_seed_path() }
    }
}

fn default_seed_path() -> PathBuf { PathBuf::from("data/profiles.json") }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_ttl() -> u64 { 300 }
fn default_cache_capacity() -> u64 { 10_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LikeSettings {
    #[serde(default = "default_like_interval")]
    pub interval_ms: u64,
}

impl Default for LikeSettings {
    fn default() -> Self {
        Self { interval_ms: default_like_interval() }
    }
}

fn default_like_interval() -> u64 { 1000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    /// Optional standalone TOML file holding the scoring tables
    #[serde(default)]
    pub tables_path: Option<PathBuf>,
    #[serde(default)]
    pub tables: ScoringTables,
    #[serde(default)]
    pub ranking: RankingSettings,
}

impl ScoringSettings {
    /// Tables from `tables_path` when set, otherwise the inline tables
    pub fn load_tables(&self) -> Result<ScoringTables, ConfigError> {
        match &self.tables_path {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .map_err(|e| ConfigError::Foreign(Box::new(e)))?;
                ScoringTables::from_toml_str(&source)
                    .map_err(|e| ConfigError::Foreign(Box::new(e)))
            }
            None => Ok(self.tables.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with VIVA_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., VIVA__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("VIVA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("VIVA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
