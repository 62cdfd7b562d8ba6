//! Turns a class diagram snapshot into a layered Spring Boot CRUD backend.
//!
//! The pipeline is pure and synchronous up to the archive: names are
//! normalized, relations are classified into per-class fields, every template
//! renders one file, and the assembled [`FileTree`] is packed into a
//! deterministic `.tar.gz`.

pub mod archive;
pub mod assembler;
mod error;
pub mod naming;
pub mod relations;
pub mod templates;
pub mod types;
mod writer;

pub use archive::{deliver, pack, unpack, Archive};
pub use assembler::{AssemblyState, FileTree, GeneratedFile, ProjectAssembler, ProjectLayout};
pub use error::{GenerateError, PackError};

use blueprint_core::config::BlueprintConfig;
use blueprint_core::Snapshot;

/// Generate the complete file tree for `snapshot`.
pub fn generate(
    snapshot: &Snapshot,
    project_name: &str,
    config: &BlueprintConfig,
) -> Result<FileTree, GenerateError> {
    ProjectAssembler::new(config).assemble(snapshot, project_name)
}

/// Generate and pack in one step. Either the whole archive is produced or
/// nothing is.
pub fn generate_archive(
    snapshot: &Snapshot,
    project_name: &str,
    config: &BlueprintConfig,
) -> Result<Archive, GenerateError> {
    let layout = ProjectLayout::new(project_name);
    let tree = generate(snapshot, project_name, config)?;
    let bytes = pack(&tree)?;
    tracing::info!(
        files = tree.len(),
        bytes = bytes.len(),
        archive = %layout.archive_name(),
        "archive packed"
    );
    Ok(Archive {
        file_name: layout.archive_name(),
        bytes,
    })
}
