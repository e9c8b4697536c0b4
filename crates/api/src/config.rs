use std::path::PathBuf;

use aquacheck_core::compliance::{ComplianceEngine, MARGIN_RATIO};
use aquacheck_core::error::CoreError;
use aquacheck_core::parameters::{Panel, ParameterLabels};
use aquacheck_core::registry::ThresholdRegistry;

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    InvalidVar {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Failed to read threshold table {path}: {source}")]
    ThresholdTable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Engine(#[from] CoreError),
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Near-limit margin for scalar thresholds (default: `0.9`).
    pub margin_ratio: f64,
    /// Optional JSON threshold table replacing the built-in one.
    pub threshold_table_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `COMPLIANCE_MARGIN_RATIO` | `0.9`                   |
    /// | `THRESHOLD_TABLE_PATH`    | unset (built-in table)  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = parse_var(&lookup, "PORT", "a valid u16", 3000u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs =
            parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "a valid u64", 30u64)?;

        let margin_ratio = parse_var(
            &lookup,
            "COMPLIANCE_MARGIN_RATIO",
            "a number in (0.0, 1.0]",
            MARGIN_RATIO,
        )?;

        let threshold_table_path = lookup("THRESHOLD_TABLE_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            margin_ratio,
            threshold_table_path,
        })
    }

    /// Build the compliance engine described by this configuration.
    ///
    /// Reads the threshold table file when one is configured; otherwise uses
    /// the built-in tables.
    pub fn build_engine(&self) -> Result<ComplianceEngine, ConfigError> {
        let registry = match &self.threshold_table_path {
            Some(path) => {
                let json =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::ThresholdTable {
                        path: path.clone(),
                        source,
                    })?;
                ThresholdRegistry::from_json_str(&json)?
            }
            None => ThresholdRegistry::builtin(),
        };

        Ok(ComplianceEngine::new(
            registry,
            Panel::standard(),
            self.margin_ratio,
            ParameterLabels::standard(),
        )?)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidVar {
            name,
            expected,
            value: raw,
        }),
    }
}
