use anyhow::Context;

use crate::cli::StoreArgs;

/// Handle `blueprint list`.
pub fn list() -> anyhow::Result<()> {
    let names = blueprint_core::list_snapshots()?;
    if names.is_empty() {
        eprintln!(
            "No snapshots in {}",
            blueprint_core::snapshots_dir().display()
        );
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

/// Handle `blueprint store`. The file is parsed first so only valid
/// snapshots end up in the store.
pub fn store(args: &StoreArgs) -> anyhow::Result<()> {
    let snapshot = blueprint_core::load_snapshot_file(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let name = match &args.name {
        Some(name) => name.clone(),
        None => args
            .file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .context("cannot derive a snapshot name from the file, pass --as")?,
    };
    blueprint_core::write_snapshot(&name, &snapshot)?;
    eprintln!(
        "Stored '{name}' ({} classes, {} relations)",
        snapshot.classes.len(),
        snapshot.relations.len()
    );
    Ok(())
}

/// Handle `blueprint remove`.
pub fn remove(name: &str) -> anyhow::Result<()> {
    blueprint_core::delete_snapshot(name)?;
    eprintln!("Removed '{name}'");
    Ok(())
}
