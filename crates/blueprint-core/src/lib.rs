pub mod config;
mod error;

pub use error::CoreError;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// --- Types (matching the diagram editor's export) ---

/// Attribute type tags understood by the generator.
///
/// Anything the editor sends that is not listed here deserializes as
/// `Unknown` and is generated as text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    #[default]
    String,
    Int,
    Long,
    Boolean,
    Float,
    Double,
    Date,
    Datetime,
    Decimal,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, schemars::JsonSchema)]
pub enum RelationKind {
    Association,
    AssociationNtoN,
    Inheritance,
    Aggregation,
    Composition,
    Dependency,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDef {
    pub name: String,
    #[serde(default)]
    pub type_tag: TypeTag,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassDef {
    /// Unique within one snapshot.
    pub id: String,
    /// Free text as typed in the editor, e.g. "Línea de Pedido".
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
}

impl ClassDef {
    /// The attribute acting as primary key. When several are flagged the
    /// first one wins and the rest are ordinary attributes.
    pub fn primary_key(&self) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.is_primary_key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationDef {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association_class_id: Option<String>,
}

impl RelationDef {
    pub fn is_self_relation(&self) -> bool {
        self.source_id == self.target_id
    }
}

/// The complete class/relation graph of one diagram at a point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub classes: Vec<ClassDef>,
    #[serde(default)]
    pub relations: Vec<RelationDef>,
}

impl Snapshot {
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

// --- Storage ---

/// Resolve the global snapshots directory (~/.blueprint/).
pub fn snapshots_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".blueprint")
}

/// List all stored snapshot names (without .json extension), sorted.
pub fn list_snapshots() -> Result<Vec<String>, CoreError> {
    list_snapshots_in(&snapshots_dir())
}

pub fn list_snapshots_in(dir: &Path) -> Result<Vec<String>, CoreError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let pattern = dir.join("*.json");
    let mut names: Vec<String> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|entry| {
            let path = entry.ok()?;
            path.file_stem()?.to_str().map(str::to_string)
        })
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    Ok(names)
}

/// Check that `name` stays inside the snapshots directory: non-empty, no
/// path separators, no leading dot.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let invalid = name.trim().is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(CoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Read a stored snapshot as raw JSON.
pub fn read_snapshot_raw(name: &str) -> Result<String, CoreError> {
    validate_name(name)?;
    let path = snapshots_dir().join(format!("{name}.json"));
    if !path.exists() {
        return Err(CoreError::SnapshotNotFound(name.to_string()));
    }
    Ok(fs::read_to_string(&path)?)
}

/// Read a stored snapshot as a typed `Snapshot`.
pub fn read_snapshot(name: &str) -> Result<Snapshot, CoreError> {
    Snapshot::from_json(&read_snapshot_raw(name)?)
}

/// Load a snapshot from an explicit file path.
pub fn load_snapshot_file(path: &Path) -> Result<Snapshot, CoreError> {
    let raw = fs::read_to_string(path)?;
    Snapshot::from_json(&raw)
}

/// Store a snapshot under `name`.
///
/// Written to a temp file first and renamed into place so readers never see
/// a half-written snapshot.
pub fn write_snapshot(name: &str, snapshot: &Snapshot) -> Result<(), CoreError> {
    write_snapshot_in(&snapshots_dir(), name, snapshot)
}

pub fn write_snapshot_in(dir: &Path, name: &str, snapshot: &Snapshot) -> Result<(), CoreError> {
    validate_name(name)?;
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = dir.join(format!(".{name}.json.tmp"));
    let path = dir.join(format!("{name}.json"));
    fs::write(&tmp, json)?;
    fs::rename(&tmp, &path)?;
    tracing::debug!(path = %path.display(), "snapshot written");
    Ok(())
}

/// Delete a stored snapshot by name. Missing snapshots are not an error.
pub fn delete_snapshot(name: &str) -> Result<(), CoreError> {
    validate_name(name)?;
    let path = snapshots_dir().join(format!("{name}.json"));
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_editor_export() {
        let raw = r#"{
            "classes": [
                {"id": "c1", "name": "Order", "attributes": [
                    {"name": "id", "typeTag": "int", "isPrimaryKey": true, "isRequired": true},
                    {"name": "total", "typeTag": "decimal"}
                ]}
            ],
            "relations": [
                {"id": "r1", "sourceId": "c1", "targetId": "c1", "type": "AssociationNtoN", "associationClassId": "c9"}
            ]
        }"#;
        let snapshot = Snapshot::from_json(raw).unwrap();
        assert_eq!(snapshot.classes.len(), 1);
        let order = &snapshot.classes[0];
        assert_eq!(order.attributes[1].type_tag, TypeTag::Decimal);
        assert!(!order.attributes[1].is_required);
        assert_eq!(order.primary_key().map(|a| a.name.as_str()), Some("id"));
        assert_eq!(snapshot.relations[0].kind, RelationKind::AssociationNtoN);
        assert_eq!(snapshot.relations[0].association_class_id.as_deref(), Some("c9"));
        assert!(snapshot.relations[0].is_self_relation());
    }

    #[test]
    fn unknown_tags_degrade_instead_of_failing() {
        let raw = r#"{
            "classes": [{"id": "c1", "name": "A", "attributes": [{"name": "blob", "typeTag": "binary"}]}],
            "relations": [{"id": "r1", "sourceId": "c1", "targetId": "c1", "type": "Realization"}]
        }"#;
        let snapshot = Snapshot::from_json(raw).unwrap();
        assert_eq!(snapshot.classes[0].attributes[0].type_tag, TypeTag::Unknown);
        assert_eq!(snapshot.relations[0].kind, RelationKind::Other);
    }

    #[test]
    fn missing_classes_is_an_empty_snapshot() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        assert!(snapshot.is_empty());
        assert!(snapshot.relations.is_empty());
    }

    #[test]
    fn first_flagged_primary_key_wins() {
        let class = ClassDef {
            id: "c1".into(),
            name: "Pair".into(),
            attributes: vec![
                AttributeDef {
                    name: "left".into(),
                    type_tag: TypeTag::Long,
                    is_primary_key: true,
                    is_required: false,
                    max_length: None,
                },
                AttributeDef {
                    name: "right".into(),
                    type_tag: TypeTag::String,
                    is_primary_key: true,
                    is_required: false,
                    max_length: None,
                },
            ],
        };
        assert_eq!(class.primary_key().unwrap().name, "left");
    }
}
