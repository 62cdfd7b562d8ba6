use std::io;
use thiserror::Error;

/// Conditions that abort a whole generation run.
///
/// Per-class problems (extra primary keys, dangling relations, unknown type
/// tags) are never errors; they are logged and generation continues.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Cannot generate a project from a snapshot without classes")]
    EmptyModel,

    #[error("Packaging failed: {0}")]
    Pack(#[from] PackError),
}

#[derive(Debug, Error)]
pub enum PackError {
    #[error("Archive I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot add '{path}' to archive: {source}")]
    Entry {
        path: String,
        #[source]
        source: io::Error,
    },
}
