//! Artifact templates. Each one is a pure function from already-normalized
//! context to the text of a single generated file.

pub mod access;
pub mod api;
pub mod dto;
pub mod logic;
pub mod mapping;
pub mod model;
pub mod project;

use std::collections::HashSet;

use blueprint_core::config::BlueprintConfig;
use blueprint_core::{ClassDef, TypeTag};

use crate::assembler::ProjectLayout;
use crate::naming::{lower_first, to_field_name};
use crate::relations::RelationshipField;
use crate::types::{map_type, JavaType, SURROGATE_KEY};

/// Field name of the synthesized key.
const SURROGATE_FIELD: &str = "id";

/// One attribute after normalization and type mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub field_name: String,
    pub java: JavaType,
    pub is_primary_key: bool,
    pub is_required: bool,
    pub max_length: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    pub field_name: String,
    pub java: JavaType,
    /// No attribute was flagged; the model carries a `Long id` of its own.
    pub synthesized: bool,
}

impl PrimaryKey {
    /// Floating point, text and date keys are assumed to be assigned externally.
    pub fn is_generated(&self) -> bool {
        self.java.is_integer()
    }
}

/// Everything the per-class templates need about one class.
#[derive(Debug, Clone)]
pub struct ClassContext<'a> {
    pub type_name: String,
    /// Root package, e.g. `mi.proyecto.2024`.
    pub package: &'a str,
    pub attributes: Vec<Attribute>,
    pub primary_key: PrimaryKey,
    pub relationships: &'a [RelationshipField],
}

impl<'a> ClassContext<'a> {
    pub fn new(
        class: &ClassDef,
        type_name: &str,
        relationships: &'a [RelationshipField],
        package: &'a str,
    ) -> Self {
        let flagged = class.primary_key();
        let mut attributes: Vec<Attribute> = Vec::with_capacity(class.attributes.len());
        let mut seen = HashSet::new();

        for attr in &class.attributes {
            let field_name = to_field_name(&attr.name);
            if field_name.is_empty() {
                tracing::warn!(class = %type_name, raw = %attr.name, "attribute name has no usable characters, skipping");
                continue;
            }
            if !seen.insert(field_name.clone()) {
                tracing::warn!(class = %type_name, raw = %attr.name, attribute = %field_name, "attribute normalizes to an existing field name, skipping");
                continue;
            }
            if attr.type_tag == TypeTag::Unknown {
                tracing::warn!(class = %type_name, attribute = %field_name, "unknown type tag, generating as String");
            }

            let is_primary_key = flagged.is_some_and(|pk| std::ptr::eq(pk, attr));
            if attr.is_primary_key && !is_primary_key {
                tracing::warn!(class = %type_name, attribute = %field_name, "more than one primary key flagged, treating as ordinary attribute");
            }

            attributes.push(Attribute {
                field_name,
                java: map_type(attr.type_tag),
                is_primary_key,
                is_required: attr.is_required,
                max_length: attr.max_length,
            });
        }

        // Without a usable flagged key, an attribute already called `id`
        // becomes the key; otherwise one is synthesized under that name.
        if !attributes.iter().any(|a| a.is_primary_key) {
            if let Some(id) = attributes.iter_mut().find(|a| a.field_name == SURROGATE_FIELD) {
                tracing::debug!(class = %type_name, "no primary key flagged, using the id attribute");
                id.is_primary_key = true;
            }
        }

        let primary_key = match attributes.iter().find(|a| a.is_primary_key) {
            Some(attr) => PrimaryKey {
                field_name: attr.field_name.clone(),
                java: attr.java,
                synthesized: false,
            },
            None => PrimaryKey {
                field_name: SURROGATE_FIELD.to_string(),
                java: SURROGATE_KEY,
                synthesized: true,
            },
        };

        Self {
            type_name: type_name.to_string(),
            package,
            attributes,
            primary_key,
            relationships,
        }
    }

    /// Package of one layer: `mi.proyecto.model`.
    pub fn layer_package(&self, layer: &str) -> String {
        format!("{}.{layer}", self.package)
    }

    /// Fully qualified name of a generated type in a layer.
    pub fn qualified(&self, layer: &str, type_name: &str) -> String {
        format!("{}.{layer}.{type_name}", self.package)
    }

    /// API route prefix: "/lineaDePedido".
    pub fn resource_path(&self) -> String {
        format!("/{}", lower_first(&self.type_name))
    }

    /// Imports needed by the attribute types.
    pub fn attribute_imports(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes.iter().filter_map(|a| a.java.import)
    }
}

/// One generated entity as the project-level artifacts see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummary {
    pub type_name: String,
    pub resource_path: String,
}

/// Everything the project-level templates need.
#[derive(Debug, Clone)]
pub struct ProjectContext<'a> {
    /// The project name as the user typed it.
    pub display_name: &'a str,
    pub layout: &'a ProjectLayout,
    pub config: &'a BlueprintConfig,
    pub entities: Vec<EntitySummary>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use blueprint_core::{AttributeDef, ClassDef, TypeTag};

    pub(crate) fn attr(name: &str, tag: TypeTag) -> AttributeDef {
        AttributeDef {
            name: name.into(),
            type_tag: tag,
            is_primary_key: false,
            is_required: false,
            max_length: None,
        }
    }

    pub(crate) fn pk(name: &str, tag: TypeTag) -> AttributeDef {
        AttributeDef {
            is_primary_key: true,
            is_required: true,
            ..attr(name, tag)
        }
    }

    pub(crate) fn order() -> ClassDef {
        ClassDef {
            id: "o".into(),
            name: "Order".into(),
            attributes: vec![
                pk("id", TypeTag::Int),
                AttributeDef {
                    is_required: true,
                    ..attr("total", TypeTag::Decimal)
                },
                AttributeDef {
                    max_length: Some(40),
                    ..attr("reference code", TypeTag::String)
                },
            ],
        }
    }
}
