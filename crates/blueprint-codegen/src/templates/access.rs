//! Spring Data repository for one entity.

use crate::writer::SourceWriter;

use super::ClassContext;

pub fn render(ctx: &ClassContext<'_>) -> String {
    let model = ctx.qualified("model", &ctx.type_name);
    let mut imports = vec![
        model.as_str(),
        "org.springframework.data.jpa.repository.JpaRepository",
        "org.springframework.stereotype.Repository",
    ];
    imports.extend(ctx.primary_key.java.import);

    let mut w = SourceWriter::new();
    w.preamble(&ctx.layer_package("access"), imports);
    w.line("@Repository");
    w.open(format!(
        "public interface {name}Access extends JpaRepository<{name}, {key}>",
        name = ctx.type_name,
        key = ctx.primary_key.java.name
    ));
    w.close();
    w.finish()
}
