//! JPA entity for one class.

use crate::naming::{getter, setter};
use crate::relations::{RelationshipField, RelationshipKind, Side};
use crate::writer::SourceWriter;

use super::{Attribute, ClassContext};

fn collection_type(field: &RelationshipField) -> Option<(&'static str, &'static str)> {
    match field.kind {
        RelationshipKind::ManyToOne => None,
        RelationshipKind::OneToMany => Some(("List", "ArrayList")),
        RelationshipKind::ManyToMany => Some(("Set", "HashSet")),
    }
}

fn field_type(field: &RelationshipField) -> String {
    match collection_type(field) {
        Some((iface, _)) => format!("{iface}<{}>", field.related_type),
        None => field.related_type.clone(),
    }
}

fn column_annotation(attr: &Attribute) -> Option<String> {
    let mut parts = Vec::new();
    if attr.is_required {
        parts.push("nullable = false".to_string());
    }
    if let Some(max) = attr.max_length.filter(|_| attr.java.is_text()) {
        parts.push(format!("length = {max}"));
    }
    (!parts.is_empty()).then(|| format!("@Column({})", parts.join(", ")))
}

fn write_key_annotations(w: &mut SourceWriter, generated: bool) {
    w.line("@Id");
    if generated {
        w.line("@GeneratedValue(strategy = GenerationType.IDENTITY)");
    }
}

fn write_relationship(w: &mut SourceWriter, ctx: &ClassContext<'_>, field: &RelationshipField) {
    match (field.kind, field.side) {
        (RelationshipKind::ManyToOne, _) => {
            w.line("@ManyToOne");
            w.line(format!("@JoinColumn(name = \"{}\")", field.join_name));
        }
        (RelationshipKind::OneToMany, _) => {
            let mapped_by = field.mapped_by.as_deref().unwrap_or_default();
            w.line(format!("@OneToMany(mappedBy = \"{mapped_by}\")"));
        }
        (RelationshipKind::ManyToMany, Side::Owning) => {
            let own = ctx.type_name.to_lowercase();
            let other = field.related_type.to_lowercase();
            let inverse_column = if own == other {
                format!("related_{other}_id")
            } else {
                format!("{other}_id")
            };
            w.line("@ManyToMany");
            w.line(format!(
                "@JoinTable(name = \"{}\", joinColumns = @JoinColumn(name = \"{own}_id\"), inverseJoinColumns = @JoinColumn(name = \"{inverse_column}\"))",
                field.join_name
            ));
        }
        (RelationshipKind::ManyToMany, Side::Inverse) => {
            let mapped_by = field.mapped_by.as_deref().unwrap_or_default();
            w.line(format!("@ManyToMany(mappedBy = \"{mapped_by}\")"));
        }
    }
    match collection_type(field) {
        Some((_, concrete)) => w.line(format!(
            "private {} {} = new {concrete}<>();",
            field_type(field),
            field.field_name
        )),
        None => w.line(format!("private {} {};", field_type(field), field.field_name)),
    };
}

fn write_accessors(w: &mut SourceWriter, java_type: &str, field: &str) {
    w.blank();
    w.open(format!("public {java_type} {}()", getter(field)))
        .line(format!("return {field};"))
        .close();
    w.blank();
    w.open(format!("public void {}({java_type} {field})", setter(field)))
        .line(format!("this.{field} = {field};"))
        .close();
}

pub fn render(ctx: &ClassContext<'_>) -> String {
    let mut imports: Vec<&str> = vec!["jakarta.persistence.*"];
    imports.extend(ctx.attribute_imports());
    imports.extend(ctx.primary_key.java.import);
    for field in ctx.relationships {
        match collection_type(field) {
            Some(("List", _)) => imports.extend(["java.util.ArrayList", "java.util.List"]),
            Some(_) => imports.extend(["java.util.HashSet", "java.util.Set"]),
            None => {}
        }
    }

    let mut w = SourceWriter::new();
    w.preamble(&ctx.layer_package("model"), imports);
    w.line("@Entity");
    w.open(format!("public class {}", ctx.type_name));

    let key = &ctx.primary_key;
    if key.synthesized {
        w.blank();
        write_key_annotations(&mut w, key.is_generated());
        w.line(format!("private {} {};", key.java.name, key.field_name));
    }

    for attr in &ctx.attributes {
        w.blank();
        if attr.is_primary_key {
            write_key_annotations(&mut w, key.is_generated());
        } else if let Some(column) = column_annotation(attr) {
            w.line(column);
        }
        w.line(format!("private {} {};", attr.java.name, attr.field_name));
    }

    for field in ctx.relationships {
        w.blank();
        write_relationship(&mut w, ctx, field);
    }

    w.blank();
    w.open(format!("public {}()", ctx.type_name)).close();

    if key.synthesized {
        write_accessors(&mut w, key.java.name, &key.field_name);
    }
    for attr in &ctx.attributes {
        write_accessors(&mut w, attr.java.name, &attr.field_name);
    }
    for field in ctx.relationships {
        write_accessors(&mut w, &field_type(field), &field.field_name);
    }

    w.close();
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::join_column;
    use crate::templates::fixtures::*;
    use blueprint_core::{ClassDef, TypeTag};

    fn many_to_one(target: &str) -> RelationshipField {
        let field_name = crate::naming::lower_first(target);
        RelationshipField {
            owner_class_id: "i".into(),
            kind: RelationshipKind::ManyToOne,
            side: Side::Owning,
            related_class_id: "o".into(),
            related_type: target.into(),
            join_name: join_column(&field_name),
            field_name,
            mapped_by: None,
        }
    }

    #[test]
    fn integer_key_is_generated() {
        let class = order();
        let out = render(&ClassContext::new(&class, "Order", &[], "shop"));
        assert!(out.starts_with("package shop.model;\n"));
        assert!(out.contains("import java.math.BigDecimal;"));
        assert!(out.contains(
            "    @Id\n    @GeneratedValue(strategy = GenerationType.IDENTITY)\n    private Integer id;"
        ));
        assert!(out.contains("    @Column(nullable = false)\n    private BigDecimal total;"));
        assert!(out.contains("    @Column(length = 40)\n    private String referenceCode;"));
        assert!(out.contains("    public void setReferenceCode(String referenceCode) {"));
    }

    #[test]
    fn non_integer_keys_are_not_generated() {
        for tag in [
            TypeTag::String,
            TypeTag::Double,
            TypeTag::Float,
            TypeTag::Date,
            TypeTag::Decimal,
        ] {
            let class = ClassDef {
                id: "c".into(),
                name: "Code".into(),
                attributes: vec![pk("code", tag)],
            };
            let out = render(&ClassContext::new(&class, "Code", &[], "x"));
            assert!(out.contains("@Id"), "{tag:?}");
            assert!(!out.contains("@GeneratedValue"), "{tag:?}");
        }
    }

    #[test]
    fn synthesized_key_comes_first() {
        let class = ClassDef {
            id: "n".into(),
            name: "Note".into(),
            attributes: vec![attr("text", TypeTag::String)],
        };
        let out = render(&ClassContext::new(&class, "Note", &[], "x"));
        let id_at = out.find("private Long id;").unwrap();
        let text_at = out.find("private String text;").unwrap();
        assert!(id_at < text_at);
        assert!(out.contains("@GeneratedValue"));
        assert!(out.contains("public Long getId()"));
    }

    #[test]
    fn relationship_fields_are_mapped() {
        let class = ClassDef {
            id: "i".into(),
            name: "Item".into(),
            attributes: vec![pk("id", TypeTag::Long)],
        };
        let fields = vec![many_to_one("Order")];
        let out = render(&ClassContext::new(&class, "Item", &fields, "shop"));
        assert!(out.contains(
            "    @ManyToOne\n    @JoinColumn(name = \"order_id\")\n    private Order order;"
        ));
        assert!(out.contains("public Order getOrder()"));
        assert!(!out.contains("java.util"));
    }

    #[test]
    fn collections_are_initialized() {
        let class = order();
        let fields = vec![
            RelationshipField {
                owner_class_id: "o".into(),
                kind: RelationshipKind::OneToMany,
                side: Side::Inverse,
                related_class_id: "i".into(),
                related_type: "Item".into(),
                field_name: "itemList".into(),
                join_name: "order_id".into(),
                mapped_by: Some("order".into()),
            },
            RelationshipField {
                owner_class_id: "o".into(),
                kind: RelationshipKind::ManyToMany,
                side: Side::Owning,
                related_class_id: "t".into(),
                related_type: "Tag".into(),
                field_name: "tagSet".into(),
                join_name: "tag_order".into(),
                mapped_by: None,
            },
        ];
        let out = render(&ClassContext::new(&class, "Order", &fields, "shop"));
        assert!(out.contains("@OneToMany(mappedBy = \"order\")\n    private List<Item> itemList = new ArrayList<>();"));
        assert!(out.contains("@JoinTable(name = \"tag_order\", joinColumns = @JoinColumn(name = \"order_id\"), inverseJoinColumns = @JoinColumn(name = \"tag_id\"))"));
        assert!(out.contains("private Set<Tag> tagSet = new HashSet<>();"));
        assert!(out.contains("import java.util.ArrayList;"));
        assert!(out.contains("import java.util.HashSet;"));
    }
}
