//! Service layer: CRUD operations over the repository, converting through
//! the mapper. Absence is reported as a 404 `ResponseStatusException`.

use crate::naming::setter;
use crate::writer::SourceWriter;

use super::ClassContext;

pub fn render(ctx: &ClassContext<'_>) -> String {
    let name = &ctx.type_name;
    let key = ctx.primary_key.java.name;
    let access = ctx.qualified("access", &format!("{name}Access"));
    let request = ctx.qualified("dto", &format!("{name}Request"));
    let response = ctx.qualified("dto", &format!("{name}Response"));
    let mapper = ctx.qualified("mapping", &format!("{name}Mapper"));
    let model = ctx.qualified("model", name);

    let mut imports = vec![
        access.as_str(),
        request.as_str(),
        response.as_str(),
        mapper.as_str(),
        model.as_str(),
        "java.util.List",
        "org.springframework.http.HttpStatus",
        "org.springframework.stereotype.Service",
        "org.springframework.web.server.ResponseStatusException",
    ];
    imports.extend(ctx.primary_key.java.import);

    let mut w = SourceWriter::new();
    w.preamble(&ctx.layer_package("logic"), imports);
    w.line("@Service");
    w.open(format!("public class {name}Logic"));

    w.blank();
    w.line(format!("private final {name}Access access;"));
    w.line(format!("private final {name}Mapper mapper;"));

    w.blank();
    w.open(format!("public {name}Logic({name}Access access, {name}Mapper mapper)"))
        .line("this.access = access;")
        .line("this.mapper = mapper;")
        .close();

    w.blank();
    w.open(format!("public void create({name}Request request)"))
        .line("access.save(mapper.toModel(request));")
        .close();

    w.blank();
    w.open(format!("public {name}Response getById({key} id)"))
        .line("return access.findById(id)")
        .line("        .map(mapper::toResponse)")
        .line("        .orElseThrow(() -> notFound(id));")
        .close();

    w.blank();
    w.open(format!("public List<{name}Response> listAll()"))
        .line("return access.findAll().stream()")
        .line("        .map(mapper::toResponse)")
        .line("        .toList();")
        .close();

    w.blank();
    w.open(format!("public void update({key} id, {name}Request request)"));
    w.open("if (!access.existsById(id))")
        .line("throw notFound(id);")
        .close();
    w.line(format!("{name} model = mapper.toModel(request);"))
        .line(format!("model.{}(id);", setter(&ctx.primary_key.field_name)))
        .line("access.save(model);")
        .close();

    w.blank();
    w.open(format!("public void delete({key} id)"));
    w.open("if (!access.existsById(id))")
        .line("throw notFound(id);")
        .close();
    w.line("access.deleteById(id);").close();

    w.blank();
    w.open(format!("private ResponseStatusException notFound({key} id)"))
        .line(format!(
            "return new ResponseStatusException(HttpStatus.NOT_FOUND, \"{name} \" + id + \" not found\");"
        ))
        .close();

    w.close();
    w.finish()
}
