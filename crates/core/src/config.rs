use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::types::AssemblyOptions;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub documents: DocumentsConfig,
    pub assembly: AssemblyOptions,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DocumentsConfig {
    pub agents_path: PathBuf,
    pub crews_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub filter: String,
    pub json: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("CREWKIT_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map CREWKIT__DOCUMENTS__AGENTS_PATH=x to documents.agents_path
            .add_source(Environment::with_prefix("CREWKIT").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Load a single explicit file, still allowing environment overrides.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("CREWKIT").separator("__"))
            .build()?
            .try_deserialize()
    }
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            agents_path: PathBuf::from("agency.json"),
            crews_path: PathBuf::from("agency.json"),
            manifest_path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,crewkit=debug".into(),
            json: false,
        }
    }
}
