use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `blueprint` binary.
#[derive(Debug, Parser)]
#[command(
    name = "blueprint",
    version,
    about = "Generate Spring Boot CRUD backends from class diagrams"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a project archive from a snapshot
    Generate(GenerateArgs),
    /// List stored snapshots
    List,
    /// Copy a snapshot file into the snapshot store
    Store(StoreArgs),
    /// Delete a stored snapshot
    Remove {
        /// Stored snapshot name
        name: String,
    },
    /// Print the JSON Schema of the snapshot format
    Schema,
    /// Write or complete blueprint.toml in the current directory
    Init,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Snapshot file path, or the name of a stored snapshot
    pub snapshot: String,

    /// Project name, e.g. "Mi Proyecto 2024"
    #[arg(short, long)]
    pub name: String,

    /// Directory to write the archive into (defaults to output.dir)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the generated file paths instead of writing an archive
    #[arg(long)]
    pub list: bool,
}

#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Snapshot JSON file
    pub file: PathBuf,

    /// Name to store it under (defaults to the file stem)
    #[arg(long = "as")]
    pub name: Option<String>,
}
