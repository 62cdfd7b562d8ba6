//! Layered configuration for Blueprint using figment.
//!
//! Sources in priority order, highest wins:
//! 1. Environment variables (`BLUEPRINT_*` prefix, `__` as separator)
//! 2. Project-level `./blueprint.toml`
//! 3. User-level `<config dir>/blueprint/config.toml`
//! 4. Built-in defaults
//!
//! `BLUEPRINT_SERVER__PORT=9090` maps to `server.port`.

mod database;
mod error;
mod output;
mod project;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use output::OutputConfig;
pub use project::ProjectConfig;
pub use server::ServerConfig;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the project-local config written by `blueprint init`.
pub const LOCAL_CONFIG_FILE: &str = "blueprint.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BlueprintConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl BlueprintConfig {
    /// Load configuration from all sources and validate it.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can extract from it directly or layer extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("BLUEPRINT_").split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".into(),
                reason: "must be between 1 and 65535".into(),
            });
        }
        for (field, value) in [
            ("project.java_version", &self.project.java_version),
            ("project.spring_boot_version", &self.project.spring_boot_version),
            ("project.version", &self.project.version),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: "must not be empty".into(),
                });
            }
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("blueprint").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = BlueprintConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.username, "sa");
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut config = BlueprintConfig::default();
        config.server.port = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn blank_java_version_is_rejected() {
        let mut config = BlueprintConfig::default();
        config.project.java_version = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "project.java_version"
        ));
    }
}
