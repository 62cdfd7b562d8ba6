//! Identifier normalization: free text from the diagram editor into Java
//! type names, field names and package paths.

use std::collections::HashMap;

use blueprint_core::Snapshot;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Split text into ASCII alphanumeric words.
///
/// Accents are folded first (NFD, combining marks dropped) so "Línea" keeps
/// its letters; every other character outside `[A-Za-z0-9]` is a boundary.
fn words(text: &str) -> Vec<String> {
    let folded: String = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Lower-case the first character, leaving the rest untouched.
pub fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// "Línea de Pedido" -> "LineaDePedido". Empty when nothing survives.
pub fn to_type_name(text: &str) -> String {
    words(text).iter().map(|w| upper_first(w)).collect()
}

/// Lower-camel variant of [`to_type_name`]: "Línea de Pedido" -> "lineaDePedido".
pub fn to_field_name(text: &str) -> String {
    lower_first(&to_type_name(text))
}

/// "Mi Proyecto 2024" -> "mi.proyecto.2024".
pub fn to_package_path(text: &str) -> String {
    words(text)
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(".")
}

/// Map a dotted package onto its directory path: "mi.proyecto" -> "mi/proyecto".
pub fn package_dir(package: &str) -> String {
    package.replace('.', "/")
}

/// Getter name for a field: "total" -> "getTotal".
pub fn getter(field: &str) -> String {
    format!("get{}", upper_first(field))
}

/// Setter name for a field: "total" -> "setTotal".
pub fn setter(field: &str) -> String {
    format!("set{}", upper_first(field))
}

/// Resolved type name for every class in a snapshot, keyed by class id.
///
/// Built once per generation run so the classifier and the templates agree
/// on every name. Classes whose name normalizes to nothing are called
/// `Entity<N>` after their 1-based position.
#[derive(Debug, Clone, Default)]
pub struct ClassNames {
    by_id: HashMap<String, String>,
}

impl ClassNames {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let by_id = snapshot
            .classes
            .iter()
            .enumerate()
            .map(|(i, class)| {
                let mut name = to_type_name(&class.name);
                if name.is_empty() {
                    name = format!("Entity{}", i + 1);
                    tracing::warn!(class_id = %class.id, raw = %class.name, fallback = %name, "class name has no usable characters");
                }
                (class.id.clone(), name)
            })
            .collect();
        Self { by_id }
    }

    pub fn type_name(&self, class_id: &str) -> Option<&str> {
        self.by_id.get(class_id).map(String::as_str)
    }

    pub fn contains(&self, class_id: &str) -> bool {
        self.by_id.contains_key(class_id)
    }
}
