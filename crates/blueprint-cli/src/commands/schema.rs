use blueprint_core::Snapshot;

/// Handle `blueprint schema`.
pub fn handle() -> anyhow::Result<()> {
    println!("{}", snapshot_schema()?);
    Ok(())
}

fn snapshot_schema() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(Snapshot);
    Ok(serde_json::to_string_pretty(&schema)?)
}
