use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Ply";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Names the deployment environment; selects the config file.
pub const ENV_VAR: &str = "PLY_ENV";
/// Optional base directory the `config/<env>.yaml` path is resolved against.
pub const CONFIG_DIR_VAR: &str = "PLY_CONFIG_DIR";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,tower_http=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable PLY_ENV is not set")]
    MissingEnvironment,

    #[error("invalid environment variable PLY_ENV: {0:?}")]
    UnknownEnvironment(String),

    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Deployment environments with a config file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Test,
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    /// Config file path relative to the config base directory.
    pub fn config_file(&self) -> PathBuf {
        Path::new("config").join(format!("{}.yaml", self.as_str()))
    }

    /// Read the environment from `PLY_ENV`.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(ENV_VAR) {
            Ok(value) => value.parse(),
            Err(std::env::VarError::NotPresent) => Err(ConfigError::MissingEnvironment),
            Err(std::env::VarError::NotUnicode(raw)) => Err(ConfigError::UnknownEnvironment(
                raw.to_string_lossy().into_owned(),
            )),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Self::Test),
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Immutable process configuration, built once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    pub port: u16,
    /// Root directory for uploaded document files.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
}

/// Document store target plus one collection name per entity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Directory holding the database files.
    pub url: PathBuf,
    pub database: String,
    pub activity_collection: String,
    pub enrollment_collection: String,
    pub location_collection: String,
    pub practice_collection: String,
    pub provider_collection: String,
    pub task_collection: String,
    pub document_collection: String,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

impl Config {
    /// Load the config selected by `PLY_ENV`, resolved against
    /// `PLY_CONFIG_DIR` (current directory when unset).
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env()?;
        let base = std::env::var_os(CONFIG_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::load_for(environment, &base)
    }

    pub fn load_for(environment: Environment, base: &Path) -> Result<Self, ConfigError> {
        Self::from_path(&base.join(environment.config_file()))
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Config rooted in a scratch directory, for tests across the crate.
#[cfg(test)]
pub(crate) fn test_config(root: &Path) -> Config {
    Config {
        service: ServiceConfig {
            port: 0,
            upload_dir: root.join("uploads"),
        },
        store: StoreConfig {
            url: root.join("store"),
            database: "ply".into(),
            activity_collection: "activities".into(),
            enrollment_collection: "enrollments".into(),
            location_collection: "locations".into(),
            practice_collection: "practices".into(),
            provider_collection: "providers".into(),
            task_collection: "tasks".into(),
            document_collection: "documents".into(),
        },
    }
}
