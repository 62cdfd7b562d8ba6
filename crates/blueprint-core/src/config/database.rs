//! Embedded database defaults for the generated project.

use serde::{Deserialize, Serialize};

fn default_username() -> String {
    "sa".to_string()
}

fn default_ddl_auto() -> String {
    "update".to_string()
}

const fn default_console() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Hibernate schema strategy (`spring.jpa.hibernate.ddl-auto`).
    #[serde(default = "default_ddl_auto")]
    pub ddl_auto: String,

    /// Whether the H2 web console is enabled.
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: String::new(),
            ddl_auto: default_ddl_auto(),
            console: default_console(),
        }
    }
}
