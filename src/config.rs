//! Server configuration.
//!
//! Values come from an optional TOML file; command-line flags override them.
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 8712
//! database = "trivia.db"
//! seed = "data/trivia.json"
//! in_memory = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::protocol::DEFAULT_PORT;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DATABASE: &str = "trivia.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    pub port: u16,
    /// SQLite database file; created and seeded when missing.
    pub database: PathBuf,
    /// JSON seed file used instead of the built-in questions.
    pub seed: Option<PathBuf>,
    /// Keep questions in memory only; nothing survives a restart.
    pub in_memory: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: PathBuf::from(DEFAULT_DATABASE),
            seed: None,
            in_memory: false,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
