//! REST controller exposing the CRUD routes for one entity.

use crate::writer::SourceWriter;

use super::ClassContext;

pub fn render(ctx: &ClassContext<'_>) -> String {
    let name = &ctx.type_name;
    let key = ctx.primary_key.java.name;
    let logic = ctx.qualified("logic", &format!("{name}Logic"));
    let request = ctx.qualified("dto", &format!("{name}Request"));
    let response = ctx.qualified("dto", &format!("{name}Response"));

    let mut imports = vec![
        logic.as_str(),
        request.as_str(),
        response.as_str(),
        "jakarta.validation.Valid",
        "java.util.List",
        "org.springframework.http.HttpStatus",
        "org.springframework.http.ResponseEntity",
        "org.springframework.web.bind.annotation.*",
    ];
    imports.extend(ctx.primary_key.java.import);

    let mut w = SourceWriter::new();
    w.preamble(&ctx.layer_package("api"), imports);
    w.line("@RestController");
    w.line(format!("@RequestMapping(\"{}\")", ctx.resource_path()));
    w.open(format!("public class {name}Api"));

    w.blank();
    w.line(format!("private final {name}Logic logic;"));

    w.blank();
    w.open(format!("public {name}Api({name}Logic logic)"))
        .line("this.logic = logic;")
        .close();

    w.blank();
    w.line("@PostMapping");
    w.open(format!(
        "public ResponseEntity<Void> create(@Valid @RequestBody {name}Request request)"
    ))
    .line("logic.create(request);")
    .line("return ResponseEntity.status(HttpStatus.CREATED).build();")
    .close();

    w.blank();
    w.line("@GetMapping(\"/{id}\")");
    w.open(format!(
        "public ResponseEntity<{name}Response> getById(@PathVariable {key} id)"
    ))
    .line("return ResponseEntity.ok(logic.getById(id));")
    .close();

    w.blank();
    w.line("@GetMapping");
    w.open(format!("public ResponseEntity<List<{name}Response>> listAll()"))
        .line("return ResponseEntity.ok(logic.listAll());")
        .close();

    w.blank();
    w.line("@PutMapping(\"/{id}\")");
    w.open(format!(
        "public ResponseEntity<Void> update(@PathVariable {key} id, @Valid @RequestBody {name}Request request)"
    ))
    .line("logic.update(id, request);")
    .line("return ResponseEntity.ok().build();")
    .close();

    w.blank();
    w.line("@DeleteMapping(\"/{id}\")");
    w.open(format!("public ResponseEntity<Void> delete(@PathVariable {key} id)"))
        .line("logic.delete(id);")
        .line("return ResponseEntity.noContent().build();")
        .close();

    w.close();
    w.finish()
}
