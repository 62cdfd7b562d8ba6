//! Project-level artifacts, generated once per run.

use crate::writer::SourceWriter;

use super::ProjectContext;

/// Starters every generated project depends on: web, JPA, validation, H2.
const DEPENDENCIES: &[(&str, &str, Option<&str>)] = &[
    ("org.springframework.boot", "spring-boot-starter-web", None),
    ("org.springframework.boot", "spring-boot-starter-data-jpa", None),
    ("org.springframework.boot", "spring-boot-starter-validation", None),
    ("com.h2database", "h2", Some("runtime")),
];

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Maven `pom.xml`.
pub fn render_manifest(ctx: &ProjectContext<'_>) -> String {
    let layout = ctx.layout;
    let project = &ctx.config.project;

    let mut w = SourceWriter::new();
    w.line(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    w.open_tag(r#"project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd""#);
    w.line("<modelVersion>4.0.0</modelVersion>");
    w.blank();
    w.open_tag("parent")
        .line("<groupId>org.springframework.boot</groupId>")
        .line("<artifactId>spring-boot-starter-parent</artifactId>")
        .line(format!("<version>{}</version>", project.spring_boot_version))
        .line("<relativePath/>")
        .close_tag("parent");
    w.blank();
    w.line(format!("<groupId>{}</groupId>", layout.package))
        .line(format!("<artifactId>{}</artifactId>", layout.artifact_id))
        .line(format!("<version>{}</version>", project.version))
        .line(format!("<name>{}</name>", xml_escape(ctx.display_name)))
        .line(format!(
            "<description>CRUD backend generated for {}</description>",
            xml_escape(ctx.display_name)
        ));
    w.blank();
    w.open_tag("properties")
        .line(format!("<java.version>{}</java.version>", project.java_version))
        .close_tag("properties");
    w.blank();
    w.open_tag("dependencies");
    for (group, artifact, scope) in DEPENDENCIES {
        w.open_tag("dependency")
            .line(format!("<groupId>{group}</groupId>"))
            .line(format!("<artifactId>{artifact}</artifactId>"));
        if let Some(scope) = scope {
            w.line(format!("<scope>{scope}</scope>"));
        }
        w.close_tag("dependency");
    }
    w.close_tag("dependencies");
    w.blank();
    w.open_tag("build")
        .open_tag("plugins")
        .open_tag("plugin")
        .line("<groupId>org.springframework.boot</groupId>")
        .line("<artifactId>spring-boot-maven-plugin</artifactId>")
        .close_tag("plugin")
        .close_tag("plugins")
        .close_tag("build");
    w.close_tag("project");
    w.finish()
}

/// `src/main/resources/application.properties`.
pub fn render_runtime_config(ctx: &ProjectContext<'_>) -> String {
    let db = &ctx.config.database;
    let mut w = SourceWriter::new();
    w.line(format!("spring.application.name={}", ctx.layout.artifact_id))
        .line(format!("server.port={}", ctx.config.server.port))
        .blank()
        .line(format!(
            "spring.datasource.url=jdbc:h2:mem:{};DB_CLOSE_DELAY=-1",
            ctx.layout.artifact_id
        ))
        .line("spring.datasource.driver-class-name=org.h2.Driver")
        .line(format!("spring.datasource.username={}", db.username))
        .line(format!("spring.datasource.password={}", db.password))
        .blank()
        .line(format!("spring.jpa.hibernate.ddl-auto={}", db.ddl_auto))
        .line("spring.jpa.open-in-view=false")
        .line(format!("spring.h2.console.enabled={}", db.console));
    w.finish()
}

/// The `@SpringBootApplication` entry point.
pub fn render_application(ctx: &ProjectContext<'_>) -> String {
    let app = &ctx.layout.application_type;
    let mut w = SourceWriter::new();
    w.preamble(
        &ctx.layout.package,
        [
            "org.springframework.boot.SpringApplication",
            "org.springframework.boot.autoconfigure.SpringBootApplication",
        ],
    );
    w.line("@SpringBootApplication");
    w.open(format!("public class {app}"));
    w.blank();
    w.open("public static void main(String[] args)")
        .line(format!("SpringApplication.run({app}.class, args);"))
        .close();
    w.close();
    w.finish()
}

/// `README.md` listing every entity and its routes.
pub fn render_readme(ctx: &ProjectContext<'_>) -> String {
    let mut w = SourceWriter::new();
    w.line(format!("# {}", ctx.display_name))
        .blank()
        .line("Spring Boot CRUD backend generated from a class diagram.")
        .blank()
        .line("## Running")
        .blank()
        .line("```sh")
        .line("mvn spring-boot:run")
        .line("```")
        .blank()
        .line(format!(
            "The API listens on port {}. Data lives in an in-memory H2 database{}.",
            ctx.config.server.port,
            if ctx.config.database.console {
                " (console at `/h2-console`)"
            } else {
                ""
            }
        ))
        .blank()
        .line("## Endpoints")
        .blank()
        .line("| Entity | Method | Path | Result |")
        .line("|--------|--------|------|--------|");
    for entity in &ctx.entities {
        let (name, path) = (&entity.type_name, &entity.resource_path);
        w.line(format!("| {name} | POST | `{path}` | 201 Created |"))
            .line(format!("| {name} | GET | `{path}/{{id}}` | 200 OK, 404 if missing |"))
            .line(format!("| {name} | GET | `{path}` | 200 OK, list |"))
            .line(format!("| {name} | PUT | `{path}/{{id}}` | 200 OK, 404 if missing |"))
            .line(format!("| {name} | DELETE | `{path}/{{id}}` | 204 No Content, 404 if missing |"));
    }
    w.blank()
        .line("## Layout")
        .blank()
        .line(format!("Sources live under `src/main/java/{}`:", ctx.layout.package_dir))
        .blank()
        .line("- `model`: JPA entities")
        .line("- `access`: Spring Data repositories")
        .line("- `logic`: services")
        .line("- `dto`: request and response payloads")
        .line("- `mapping`: DTO and entity conversion")
        .line("- `api`: REST controllers");
    w.finish()
}
