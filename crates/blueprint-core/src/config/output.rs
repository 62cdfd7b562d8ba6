use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory the archive is delivered into when `--out` is not given.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}
