//! Relationship classification.
//!
//! Relations reference classes by id. For every class the classifier derives
//! the relationship fields it carries, so templates never look at the raw
//! relation list. Each side of a relation is computed independently from the
//! same inputs, which is what keeps the two ends of a pair consistent.

use std::collections::{BTreeMap, HashSet};

use blueprint_core::{RelationDef, RelationKind, Snapshot};

use crate::naming::{lower_first, ClassNames};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    ManyToOne,
    OneToMany,
    ManyToMany,
}

/// Which end of a relation holds the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Owning,
    Inverse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipField {
    pub owner_class_id: String,
    pub kind: RelationshipKind,
    pub side: Side,
    pub related_class_id: String,
    /// Normalized type name of the related class.
    pub related_type: String,
    pub field_name: String,
    /// Foreign key column for to-one/to-many pairs, join table for many-to-many.
    pub join_name: String,
    /// Field on the related class that owns the mapping (inverse side only).
    pub mapped_by: Option<String>,
}

/// Foreign key column for a to-one reference: "order" -> "order_id".
pub fn join_column(field_name: &str) -> String {
    format!("{}_id", field_name.to_lowercase())
}

/// Join table name for a many-to-many relation.
///
/// An association class, when it resolves, names the table; an unresolved
/// association class id is used verbatim. Otherwise the name is
/// `<target>_<source>`, both lower-cased, whichever side asks.
pub fn join_table_name(relation: &RelationDef, names: &ClassNames) -> Option<String> {
    if let Some(assoc) = &relation.association_class_id {
        return Some(match names.type_name(assoc) {
            Some(name) => name.to_lowercase(),
            None => assoc.clone(),
        });
    }
    let source = names.type_name(&relation.source_id)?;
    let target = names.type_name(&relation.target_id)?;
    Some(format!("{}_{}", target.to_lowercase(), source.to_lowercase()))
}

/// Suffix that keeps repeated relations of one kind between the same two
/// classes apart: "" for the first, "2" for the second, and so on. Both
/// ends compute it from the relation list, so they agree.
fn repeat_suffix(relation: &RelationDef, snapshot: &Snapshot) -> String {
    let earlier = snapshot
        .relations
        .iter()
        .take_while(|r| !std::ptr::eq(*r, relation))
        .filter(|r| {
            r.kind == relation.kind
                && r.source_id == relation.source_id
                && r.target_id == relation.target_id
        })
        .count();
    if earlier == 0 {
        String::new()
    } else {
        (earlier + 1).to_string()
    }
}

/// Relationship fields carried by `class_id`, in relation-list order.
pub fn classify(class_id: &str, snapshot: &Snapshot, names: &ClassNames) -> Vec<RelationshipField> {
    let mut fields = Vec::new();

    for relation in &snapshot.relations {
        let touches = relation.source_id == class_id || relation.target_id == class_id;
        if !touches {
            continue;
        }
        let (Some(source), Some(target)) = (
            names.type_name(&relation.source_id),
            names.type_name(&relation.target_id),
        ) else {
            continue;
        };
        let suffix = repeat_suffix(relation, snapshot);

        match relation.kind {
            RelationKind::Association => {
                // The source holds the foreign reference to the target.
                if relation.source_id == class_id {
                    let field_name = format!("{}{suffix}", lower_first(target));
                    fields.push(RelationshipField {
                        owner_class_id: class_id.to_string(),
                        kind: RelationshipKind::ManyToOne,
                        side: Side::Owning,
                        related_class_id: relation.target_id.clone(),
                        related_type: target.to_string(),
                        join_name: join_column(&field_name),
                        field_name,
                        mapped_by: None,
                    });
                }
                if relation.target_id == class_id {
                    let owning_field = format!("{}{suffix}", lower_first(target));
                    fields.push(RelationshipField {
                        owner_class_id: class_id.to_string(),
                        kind: RelationshipKind::OneToMany,
                        side: Side::Inverse,
                        related_class_id: relation.source_id.clone(),
                        related_type: source.to_string(),
                        field_name: format!("{}List{suffix}", lower_first(source)),
                        join_name: join_column(&owning_field),
                        mapped_by: Some(owning_field),
                    });
                }
            }
            RelationKind::AssociationNtoN => {
                let Some(mut join_name) = join_table_name(relation, names) else {
                    continue;
                };
                if !suffix.is_empty() {
                    join_name = format!("{join_name}_{suffix}");
                }
                if relation.source_id == class_id {
                    fields.push(RelationshipField {
                        owner_class_id: class_id.to_string(),
                        kind: RelationshipKind::ManyToMany,
                        side: Side::Owning,
                        related_class_id: relation.target_id.clone(),
                        related_type: target.to_string(),
                        field_name: format!("{}Set{suffix}", lower_first(target)),
                        join_name: join_name.clone(),
                        mapped_by: None,
                    });
                }
                // A self many-to-many only carries the owning set.
                if relation.target_id == class_id && !relation.is_self_relation() {
                    fields.push(RelationshipField {
                        owner_class_id: class_id.to_string(),
                        kind: RelationshipKind::ManyToMany,
                        side: Side::Inverse,
                        related_class_id: relation.source_id.clone(),
                        related_type: source.to_string(),
                        field_name: format!("{}Set{suffix}", lower_first(source)),
                        join_name,
                        mapped_by: Some(format!("{}Set{suffix}", lower_first(target))),
                    });
                }
            }
            RelationKind::Inheritance
            | RelationKind::Aggregation
            | RelationKind::Composition
            | RelationKind::Dependency
            | RelationKind::Other => {}
        }
    }

    let mut seen = HashSet::new();
    for field in &fields {
        if !seen.insert(field.field_name.as_str()) {
            tracing::warn!(class_id = %class_id, field = %field.field_name, "two relationships produce the same field name");
        }
    }
    fields
}

/// Relationship fields for every class, built once per generation run.
#[derive(Debug, Clone, Default)]
pub struct RelationshipIndex {
    by_class: BTreeMap<String, Vec<RelationshipField>>,
}

impl RelationshipIndex {
    pub fn build(snapshot: &Snapshot, names: &ClassNames) -> Self {
        for relation in &snapshot.relations {
            for endpoint in [&relation.source_id, &relation.target_id] {
                if !names.contains(endpoint) {
                    tracing::warn!(
                        relation_id = %relation.id,
                        missing_class = %endpoint,
                        "relation references an unknown class, skipping"
                    );
                }
            }
        }

        let by_class = snapshot
            .classes
            .iter()
            .map(|class| (class.id.clone(), classify(&class.id, snapshot, names)))
            .collect();
        Self { by_class }
    }

    pub fn fields_for(&self, class_id: &str) -> &[RelationshipField] {
        self.by_class.get(class_id).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RelationshipField])> {
        self.by_class
            .iter()
            .map(|(id, fields)| (id.as_str(), fields.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::ClassDef;
    use pretty_assertions::assert_eq;

    fn class(id: &str, name: &str) -> ClassDef {
        ClassDef {
            id: id.into(),
            name: name.into(),
            attributes: vec![],
        }
    }

    fn relation(id: &str, source: &str, target: &str, kind: RelationKind) -> RelationDef {
        RelationDef {
            id: id.into(),
            source_id: source.into(),
            target_id: target.into(),
            kind,
            association_class_id: None,
        }
    }

    fn index(snapshot: &Snapshot) -> RelationshipIndex {
        RelationshipIndex::build(snapshot, &ClassNames::from_snapshot(snapshot))
    }

    #[test]
    fn association_source_holds_the_reference() {
        let snapshot = Snapshot {
            classes: vec![class("o", "Order"), class("i", "Item")],
            relations: vec![relation("r1", "i", "o", RelationKind::Association)],
        };
        let index = index(&snapshot);

        let item = index.fields_for("i");
        assert_eq!(item.len(), 1);
        assert_eq!(item[0].kind, RelationshipKind::ManyToOne);
        assert_eq!(item[0].field_name, "order");
        assert_eq!(item[0].join_name, "order_id");
        assert_eq!(item[0].related_type, "Order");

        let order = index.fields_for("o");
        assert_eq!(order.len(), 1);
        assert_eq!(order[0].kind, RelationshipKind::OneToMany);
        assert_eq!(order[0].field_name, "itemList");
        assert_eq!(order[0].mapped_by.as_deref(), Some("order"));
        assert_eq!(order[0].related_class_id, "i");
    }

    #[test]
    fn many_to_many_fallback_join_name_matches_on_both_sides() {
        let snapshot = Snapshot {
            classes: vec![class("s", "Student"), class("c", "Course")],
            relations: vec![relation("r1", "s", "c", RelationKind::AssociationNtoN)],
        };
        let index = index(&snapshot);

        let student = &index.fields_for("s")[0];
        let course = &index.fields_for("c")[0];
        assert_eq!(student.join_name, "course_student");
        assert_eq!(course.join_name, student.join_name);
        assert_eq!(student.side, Side::Owning);
        assert_eq!(student.field_name, "courseSet");
        assert_eq!(course.side, Side::Inverse);
        assert_eq!(course.field_name, "studentSet");
        assert_eq!(course.mapped_by.as_deref(), Some("courseSet"));
    }

    #[test]
    fn association_class_names_the_join_table() {
        let mut rel = relation("r1", "s", "c", RelationKind::AssociationNtoN);
        rel.association_class_id = Some("e".into());
        let snapshot = Snapshot {
            classes: vec![
                class("s", "Student"),
                class("c", "Course"),
                class("e", "Enrollment"),
            ],
            relations: vec![rel],
        };
        let index = index(&snapshot);
        assert_eq!(index.fields_for("s")[0].join_name, "enrollment");
        assert_eq!(index.fields_for("c")[0].join_name, "enrollment");
    }

    #[test]
    fn unresolved_association_class_id_is_used_verbatim() {
        let mut rel = relation("r1", "s", "c", RelationKind::AssociationNtoN);
        rel.association_class_id = Some("student_course".into());
        let snapshot = Snapshot {
            classes: vec![class("s", "Student"), class("c", "Course")],
            relations: vec![rel],
        };
        let index = index(&snapshot);
        assert_eq!(index.fields_for("c")[0].join_name, "student_course");
    }

    #[test]
    fn self_association_yields_both_ends_on_one_class() {
        let snapshot = Snapshot {
            classes: vec![class("e", "Employee")],
            relations: vec![relation("r1", "e", "e", RelationKind::Association)],
        };
        let fields = classify("e", &snapshot, &ClassNames::from_snapshot(&snapshot));
        let names: Vec<&str> = fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["employee", "employeeList"]);
        assert!(fields.iter().all(|f| f.related_class_id == "e"));
    }

    #[test]
    fn self_many_to_many_yields_only_the_owning_field() {
        let snapshot = Snapshot {
            classes: vec![class("u", "User")],
            relations: vec![relation("r1", "u", "u", RelationKind::AssociationNtoN)],
        };
        let index = index(&snapshot);
        let fields = index.fields_for("u");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].side, Side::Owning);
        assert_eq!(fields[0].join_name, "user_user");
    }

    #[test]
    fn repeated_relations_get_distinct_matching_fields() {
        let snapshot = Snapshot {
            classes: vec![class("o", "Order"), class("i", "Item"), class("t", "Tag")],
            relations: vec![
                relation("r1", "i", "o", RelationKind::Association),
                relation("r2", "i", "t", RelationKind::AssociationNtoN),
                relation("r3", "i", "o", RelationKind::Association),
                relation("r4", "i", "t", RelationKind::AssociationNtoN),
            ],
        };
        let index = index(&snapshot);

        let item: Vec<(&str, &str)> = index
            .fields_for("i")
            .iter()
            .map(|f| (f.field_name.as_str(), f.join_name.as_str()))
            .collect();
        assert_eq!(
            item,
            vec![
                ("order", "order_id"),
                ("tagSet", "tag_item"),
                ("order2", "order2_id"),
                ("tagSet2", "tag_item_2"),
            ]
        );

        let order = index.fields_for("o");
        assert_eq!(order[0].field_name, "itemList");
        assert_eq!(order[1].field_name, "itemList2");
        assert_eq!(order[1].mapped_by.as_deref(), Some("order2"));

        let tag = index.fields_for("t");
        assert_eq!(tag[1].field_name, "itemSet2");
        assert_eq!(tag[1].mapped_by.as_deref(), Some("tagSet2"));
        assert_eq!(tag[1].join_name, "tag_item_2");
    }

    #[test]
    fn dangling_and_unsupported_relations_are_skipped() {
        let snapshot = Snapshot {
            classes: vec![class("a", "Animal"), class("d", "Dog")],
            relations: vec![
                relation("r1", "d", "ghost", RelationKind::Association),
                relation("r2", "d", "a", RelationKind::Inheritance),
                relation("r3", "d", "a", RelationKind::Other),
                relation("r4", "d", "a", RelationKind::Association),
            ],
        };
        let index = index(&snapshot);
        assert_eq!(index.fields_for("d").len(), 1);
        assert_eq!(index.fields_for("d")[0].field_name, "animal");
        assert_eq!(index.fields_for("a").len(), 1);
        assert!(index.fields_for("ghost").is_empty());
    }
}
