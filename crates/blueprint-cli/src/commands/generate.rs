use std::path::Path;

use anyhow::Context;
use blueprint_codegen::{deliver, generate, generate_archive};
use blueprint_core::config::BlueprintConfig;
use blueprint_core::Snapshot;

use crate::cli::GenerateArgs;

/// Handle `blueprint generate`.
pub async fn handle(args: GenerateArgs) -> anyhow::Result<()> {
    let config = BlueprintConfig::load().context("failed to load configuration")?;
    let snapshot = resolve_snapshot(&args.snapshot)?;

    if args.list {
        let tree = generate(&snapshot, &args.name, &config)?;
        for path in tree.paths() {
            println!("{path}");
        }
        return Ok(());
    }

    let out_dir = args.out.unwrap_or_else(|| config.output.dir.clone());
    let name = args.name;
    let archive = tokio::task::spawn_blocking(move || generate_archive(&snapshot, &name, &config))
        .await
        .context("generation task panicked")??;

    let path = deliver(&archive, &out_dir)
        .await
        .with_context(|| format!("failed to write archive into {}", out_dir.display()))?;
    println!("{}", path.display());
    Ok(())
}

/// An existing file path wins over a stored snapshot of the same name.
fn resolve_snapshot(reference: &str) -> anyhow::Result<Snapshot> {
    let path = Path::new(reference);
    if path.is_file() {
        return blueprint_core::load_snapshot_file(path)
            .with_context(|| format!("failed to read snapshot file {}", path.display()));
    }
    blueprint_core::read_snapshot(reference)
        .with_context(|| format!("'{reference}' is neither a file nor a stored snapshot"))
}
