//! Inbound and outbound transfer objects. Both carry the attribute set only;
//! relationship fields never travel through the API.

use crate::naming::{getter, setter};
use crate::writer::SourceWriter;

use super::{Attribute, ClassContext};

fn constraints(attr: &Attribute) -> Vec<String> {
    let mut out = Vec::new();
    if attr.is_required {
        out.push(if attr.java.is_text() { "@NotBlank" } else { "@NotNull" }.to_string());
    }
    if let Some(max) = attr.max_length.filter(|_| attr.java.is_text()) {
        out.push(format!("@Size(max = {max})"));
    }
    out
}

fn constraint_imports(ctx: &ClassContext<'_>) -> Vec<&'static str> {
    let mut imports = Vec::new();
    for attr in &ctx.attributes {
        if attr.is_required {
            imports.push(if attr.java.is_text() {
                "jakarta.validation.constraints.NotBlank"
            } else {
                "jakarta.validation.constraints.NotNull"
            });
        }
        if attr.max_length.is_some() && attr.java.is_text() {
            imports.push("jakarta.validation.constraints.Size");
        }
    }
    imports
}

fn render_dto(ctx: &ClassContext<'_>, suffix: &str, validated: bool) -> String {
    let mut imports: Vec<&str> = ctx.attribute_imports().collect();
    if validated {
        imports.extend(constraint_imports(ctx));
    }

    let mut w = SourceWriter::new();
    w.preamble(&ctx.layer_package("dto"), imports);
    w.open(format!("public class {}{suffix}", ctx.type_name));

    for attr in &ctx.attributes {
        w.blank();
        if validated {
            for annotation in constraints(attr) {
                w.line(annotation);
            }
        }
        w.line(format!("private {} {};", attr.java.name, attr.field_name));
    }

    for attr in &ctx.attributes {
        let (ty, field) = (attr.java.name, &attr.field_name);
        w.blank();
        w.open(format!("public {ty} {}()", getter(field)))
            .line(format!("return {field};"))
            .close();
        w.blank();
        w.open(format!("public void {}({ty} {field})", setter(field)))
            .line(format!("this.{field} = {field};"))
            .close();
    }

    w.close();
    w.finish()
}

/// `XRequest`: inbound payload with validation constraints.
pub fn render_request(ctx: &ClassContext<'_>) -> String {
    render_dto(ctx, "Request", true)
}

/// `XResponse`: outbound payload, same shape, no constraints.
pub fn render_response(ctx: &ClassContext<'_>) -> String {
    render_dto(ctx, "Response", false)
}
