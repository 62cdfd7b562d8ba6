use std::path::Path;

use blueprint_core::config::{BlueprintConfig, LOCAL_CONFIG_FILE};

/// Handle `blueprint init`: write `blueprint.toml` in the current directory,
/// merging with any existing file. Keys already present are left alone.
pub fn handle() -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let added = init_config(&cwd)?;
    let path = cwd.join(LOCAL_CONFIG_FILE);
    if added == 0 {
        eprintln!("{} is already complete", path.display());
    } else {
        eprintln!("Wrote {} ({added} default keys added)", path.display());
    }
    Ok(())
}

fn init_config(dir: &Path) -> anyhow::Result<usize> {
    let path = dir.join(LOCAL_CONFIG_FILE);
    let mut doc: toml_edit::DocumentMut = if path.exists() {
        std::fs::read_to_string(&path)?.parse()?
    } else {
        toml_edit::DocumentMut::new()
    };

    let added = merge_defaults(&mut doc, &BlueprintConfig::default())?;
    std::fs::write(&path, doc.to_string())?;
    Ok(added)
}

/// Insert every default key missing from `doc`. Returns how many were added.
fn merge_defaults(doc: &mut toml_edit::DocumentMut, defaults: &BlueprintConfig) -> anyhow::Result<usize> {
    let serde_json::Value::Object(sections) = serde_json::to_value(defaults)? else {
        anyhow::bail!("default configuration is not a table");
    };

    let mut added = 0;
    for (section, values) in sections {
        let serde_json::Value::Object(values) = values else {
            continue;
        };
        if !doc.contains_table(&section) {
            doc[&section] = toml_edit::Item::Table(toml_edit::Table::new());
        }
        let Some(table) = doc[&section].as_table_mut() else {
            anyhow::bail!("[{section}] in {LOCAL_CONFIG_FILE} is not a table");
        };
        for (key, value) in values {
            if table.contains_key(&key) {
                continue;
            }
            let item = match value {
                serde_json::Value::String(s) => toml_edit::value(s),
                serde_json::Value::Bool(b) => toml_edit::value(b),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => toml_edit::value(i),
                    None => continue,
                },
                _ => continue,
            };
            table.insert(&key, item);
            added += 1;
        }
    }
    Ok(added)
}
