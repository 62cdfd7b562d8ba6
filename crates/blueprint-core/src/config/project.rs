//! Coordinates written into the generated build manifest.

use serde::{Deserialize, Serialize};

fn default_java_version() -> String {
    "17".to_string()
}

fn default_spring_boot_version() -> String {
    "3.3.4".to_string()
}

fn default_version() -> String {
    "0.0.1-SNAPSHOT".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectConfig {
    #[serde(default = "default_java_version")]
    pub java_version: String,

    /// Version of the Spring Boot parent POM.
    #[serde(default = "default_spring_boot_version")]
    pub spring_boot_version: String,

    /// Version of the generated artifact itself.
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            java_version: default_java_version(),
            spring_boot_version: default_spring_boot_version(),
            version: default_version(),
        }
    }
}
