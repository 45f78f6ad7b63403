//! Dashboard configuration, read from an optional `temascope.toml` at the
//! project root. Every field has a default; CLI flags override the file.

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from configuration loading.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    #[diagnostic(
        code(temascope::config::read),
        help("Ensure the config file exists and is readable, or drop the `--config` flag.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {path}")]
    #[diagnostic(
        code(temascope::config::parse),
        help("Check the TOML syntax. Valid keys: `bind`, `port`, `overview_top_topics`.")
    )]
    Parse { path: String, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Dashboard settings persisted as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// How many topics the overview participation chart shows.
    #[serde(default = "default_overview_top_topics")]
    pub overview_top_topics: usize,
}

fn default_bind() -> String {
    // Local-first dashboard; `--bind 0.0.0.0` opens it up.
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8501
}
fn default_overview_top_topics() -> usize {
    10
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            overview_top_topics: default_overview_top_topics(),
        }
    }
}

impl DashboardConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load from a TOML file if it exists, otherwise return defaults.
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_if_present(path: &Path) -> ConfigResult<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
