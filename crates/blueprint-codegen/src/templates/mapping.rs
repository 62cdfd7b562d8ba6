//! Field-by-field copy between transfer objects and the entity.
//!
//! Relationship fields are left untouched here; callers that need them wire
//! them up in the logic layer.

use crate::naming::{getter, setter};
use crate::writer::SourceWriter;

use super::ClassContext;

pub fn render(ctx: &ClassContext<'_>) -> String {
    let name = &ctx.type_name;
    let model = ctx.qualified("model", name);
    let request = ctx.qualified("dto", &format!("{name}Request"));
    let response = ctx.qualified("dto", &format!("{name}Response"));

    let mut w = SourceWriter::new();
    w.preamble(
        &ctx.layer_package("mapping"),
        [
            model.as_str(),
            request.as_str(),
            response.as_str(),
            "org.springframework.stereotype.Component",
        ],
    );
    w.line("@Component");
    w.open(format!("public class {name}Mapper"));

    w.blank();
    w.open(format!("public {name} toModel({name}Request request)"));
    w.line(format!("{name} model = new {name}();"));
    for attr in &ctx.attributes {
        w.line(format!(
            "model.{}(request.{}());",
            setter(&attr.field_name),
            getter(&attr.field_name)
        ));
    }
    w.line("return model;");
    w.close();

    w.blank();
    w.open(format!("public {name}Response toResponse({name} model)"));
    w.line(format!("{name}Response response = new {name}Response();"));
    for attr in &ctx.attributes {
        w.line(format!(
            "response.{}(model.{}());",
            setter(&attr.field_name),
            getter(&attr.field_name)
        ));
    }
    w.line("return response;");
    w.close();

    w.close();
    w.finish()
}
