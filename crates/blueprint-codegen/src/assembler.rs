//! Project assembly: runs every template over the snapshot and lays the
//! results out under the package hierarchy derived from the project name.

use std::collections::HashMap;

use blueprint_core::config::BlueprintConfig;
use blueprint_core::Snapshot;

use crate::error::GenerateError;
use crate::naming::{package_dir, to_package_path, to_type_name, ClassNames};
use crate::relations::RelationshipIndex;
use crate::templates::{
    access, api, dto, logic, mapping, model, project, ClassContext, EntitySummary, ProjectContext,
};

pub const SOURCE_ROOT: &str = "src/main/java";
pub const CONFIG_DIR: &str = "src/main/resources";
pub const MANIFEST_FILE: &str = "pom.xml";
pub const README_FILE: &str = "README.md";
pub const RUNTIME_CONFIG_FILE: &str = "application.properties";

const DEFAULT_PACKAGE: &str = "demo";
const DEFAULT_TYPE: &str = "Demo";

// --- Layout ---

/// Where everything goes for one project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Dotted root package, e.g. `mi.proyecto.2024`.
    pub package: String,
    /// `mi/proyecto/2024`
    pub package_dir: String,
    /// Maven artifact id and top-level directory, e.g. `mi-proyecto-2024`.
    pub artifact_id: String,
    /// `MiProyecto2024Application`
    pub application_type: String,
}

impl ProjectLayout {
    pub fn new(project_name: &str) -> Self {
        let mut package = to_package_path(project_name);
        if package.is_empty() {
            package = DEFAULT_PACKAGE.to_string();
        }
        let mut type_name = to_type_name(project_name);
        if type_name.is_empty() {
            type_name = DEFAULT_TYPE.to_string();
        }
        Self {
            package_dir: package_dir(&package),
            artifact_id: package.replace('.', "-"),
            application_type: format!("{type_name}Application"),
            package,
        }
    }

    pub fn root(&self) -> &str {
        &self.artifact_id
    }

    pub fn archive_name(&self) -> String {
        format!("{}.tar.gz", self.artifact_id)
    }

    /// `<root>/<relative>` for project-level files.
    pub fn project_file(&self, relative: &str) -> String {
        format!("{}/{relative}", self.root())
    }

    /// `<root>/src/main/java/<package dir>/<relative>`
    pub fn source_file(&self, relative: &str) -> String {
        format!("{}/{SOURCE_ROOT}/{}/{relative}", self.root(), self.package_dir)
    }

    pub fn artifact_path(&self, kind: ArtifactKind, type_name: &str) -> String {
        self.source_file(&format!(
            "{}/{}.java",
            kind.layer(),
            kind.file_stem(type_name)
        ))
    }
}

// --- Per-class artifacts ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Access,
    Logic,
    Api,
    Request,
    Response,
    Mapper,
}

impl ArtifactKind {
    pub const ALL: [Self; 7] = [
        Self::Model,
        Self::Access,
        Self::Logic,
        Self::Api,
        Self::Request,
        Self::Response,
        Self::Mapper,
    ];

    /// Sub-package the artifact lives in.
    pub const fn layer(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Access => "access",
            Self::Logic => "logic",
            Self::Api => "api",
            Self::Request | Self::Response => "dto",
            Self::Mapper => "mapping",
        }
    }

    pub fn file_stem(self, type_name: &str) -> String {
        let suffix = match self {
            Self::Model => "",
            Self::Access => "Access",
            Self::Logic => "Logic",
            Self::Api => "Api",
            Self::Request => "Request",
            Self::Response => "Response",
            Self::Mapper => "Mapper",
        };
        format!("{type_name}{suffix}")
    }

    pub fn render(self, ctx: &ClassContext<'_>) -> String {
        match self {
            Self::Model => model::render(ctx),
            Self::Access => access::render(ctx),
            Self::Logic => logic::render(ctx),
            Self::Api => api::render(ctx),
            Self::Request => dto::render_request(ctx),
            Self::Response => dto::render_response(ctx),
            Self::Mapper => mapping::render(ctx),
        }
    }
}

// --- File tree ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Generated files in insertion order, unique by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    files: Vec<GeneratedFile>,
    index: HashMap<String, usize>,
}

impl FileTree {
    /// Insert a file. An existing path keeps its position and gets the new
    /// content; the replaced content is returned.
    pub fn insert(&mut self, path: String, content: String) -> Option<String> {
        if let Some(&i) = self.index.get(&path) {
            return Some(std::mem::replace(&mut self.files[i].content, content));
        }
        self.index.insert(path.clone(), self.files.len());
        self.files.push(GeneratedFile { path, content });
        None
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.index
            .get(path)
            .map(|&i| self.files[i].content.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl IntoIterator for FileTree {
    type Item = GeneratedFile;
    type IntoIter = std::vec::IntoIter<GeneratedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

// --- Assembler ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    Idle,
    Validating,
    Generating,
    Assembled,
    Failed,
}

pub struct ProjectAssembler<'a> {
    config: &'a BlueprintConfig,
    state: AssemblyState,
}

impl<'a> ProjectAssembler<'a> {
    pub const fn new(config: &'a BlueprintConfig) -> Self {
        Self {
            config,
            state: AssemblyState::Idle,
        }
    }

    pub const fn state(&self) -> AssemblyState {
        self.state
    }

    fn transition(&mut self, next: AssemblyState) {
        tracing::debug!(from = ?self.state, to = ?next, "assembler state");
        self.state = next;
    }

    /// Build the full file tree. Fails without output when the snapshot has
    /// no classes; everything else is generated leniently.
    pub fn assemble(
        &mut self,
        snapshot: &Snapshot,
        project_name: &str,
    ) -> Result<FileTree, GenerateError> {
        self.transition(AssemblyState::Validating);
        if snapshot.is_empty() {
            self.transition(AssemblyState::Failed);
            return Err(GenerateError::EmptyModel);
        }

        self.transition(AssemblyState::Generating);
        let layout = ProjectLayout::new(project_name);
        let names = ClassNames::from_snapshot(snapshot);
        let relationships = RelationshipIndex::build(snapshot, &names);
        tracing::info!(
            project = %layout.artifact_id,
            classes = snapshot.classes.len(),
            relations = snapshot.relations.len(),
            "generating project"
        );

        let contexts: Vec<ClassContext<'_>> = snapshot
            .classes
            .iter()
            .filter_map(|class| {
                let type_name = names.type_name(&class.id)?;
                Some(ClassContext::new(
                    class,
                    type_name,
                    relationships.fields_for(&class.id),
                    &layout.package,
                ))
            })
            .collect();

        let project_ctx = ProjectContext {
            display_name: display_name(project_name),
            layout: &layout,
            config: self.config,
            entities: contexts
                .iter()
                .map(|ctx| EntitySummary {
                    type_name: ctx.type_name.clone(),
                    resource_path: ctx.resource_path(),
                })
                .collect(),
        };

        let mut tree = FileTree::default();
        let project_files = [
            (
                layout.project_file(MANIFEST_FILE),
                project::render_manifest(&project_ctx),
            ),
            (
                layout.project_file(README_FILE),
                project::render_readme(&project_ctx),
            ),
            (
                layout.project_file(&format!("{CONFIG_DIR}/{RUNTIME_CONFIG_FILE}")),
                project::render_runtime_config(&project_ctx),
            ),
            (
                layout.source_file(&format!("{}.java", layout.application_type)),
                project::render_application(&project_ctx),
            ),
        ];
        for (path, content) in project_files {
            tracing::debug!(%path, "project artifact");
            tree.insert(path, content);
        }

        for ctx in &contexts {
            for kind in ArtifactKind::ALL {
                let path = layout.artifact_path(kind, &ctx.type_name);
                tracing::debug!(%path, "class artifact");
                if tree.insert(path.clone(), kind.render(ctx)).is_some() {
                    tracing::warn!(%path, class = %ctx.type_name, "two classes normalize to the same name, later one wins");
                }
            }
        }

        self.transition(AssemblyState::Assembled);
        tracing::info!(files = tree.len(), "project assembled");
        Ok(tree)
    }
}

fn display_name(project_name: &str) -> &str {
    let trimmed = project_name.trim();
    if trimmed.is_empty() {
        DEFAULT_TYPE
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::fixtures::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn layout_from_project_name() {
        let layout = ProjectLayout::new("Mi Proyecto 2024");
        assert_eq!(layout.package, "mi.proyecto.2024");
        assert_eq!(layout.package_dir, "mi/proyecto/2024");
        assert_eq!(layout.artifact_id, "mi-proyecto-2024");
        assert_eq!(layout.application_type, "MiProyecto2024Application");
        assert_eq!(layout.archive_name(), "mi-proyecto-2024.tar.gz");
        assert_eq!(
            layout.artifact_path(ArtifactKind::Request, "Order"),
            "mi-proyecto-2024/src/main/java/mi/proyecto/2024/dto/OrderRequest.java"
        );
    }

    #[test]
    fn blank_project_name_falls_back() {
        let layout = ProjectLayout::new(" -- ");
        assert_eq!(layout.package, "demo");
        assert_eq!(layout.application_type, "DemoApplication");
        assert_eq!(display_name("  "), "Demo");
    }

    #[test]
    fn file_tree_replaces_in_place() {
        let mut tree = FileTree::default();
        assert_eq!(tree.insert("a".into(), "1".into()), None);
        assert_eq!(tree.insert("b".into(), "2".into()), None);
        assert_eq!(tree.insert("a".into(), "3".into()), Some("1".into()));
        assert_eq!(tree.paths().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(tree.get("a"), Some("3"));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn empty_snapshot_fails_without_output() {
        let config = BlueprintConfig::default();
        let mut assembler = ProjectAssembler::new(&config);
        assert_eq!(assembler.state(), AssemblyState::Idle);

        let result = assembler.assemble(&Snapshot::default(), "Shop");

        assert!(matches!(result, Err(GenerateError::EmptyModel)));
        assert_eq!(assembler.state(), AssemblyState::Failed);
    }

    #[test]
    fn project_files_come_first_then_classes_in_order() {
        let config = BlueprintConfig::default();
        let mut item = order();
        item.id = "i".into();
        item.name = "Item".into();
        let snapshot = Snapshot {
            classes: vec![order(), item],
            relations: vec![],
        };
        let mut assembler = ProjectAssembler::new(&config);

        let tree = assembler.assemble(&snapshot, "Shop").unwrap();

        assert_eq!(assembler.state(), AssemblyState::Assembled);
        assert_eq!(tree.len(), 4 + 2 * 7);
        let paths: Vec<&str> = tree.paths().collect();
        assert_eq!(
            &paths[..5],
            &[
                "shop/pom.xml",
                "shop/README.md",
                "shop/src/main/resources/application.properties",
                "shop/src/main/java/shop/ShopApplication.java",
                "shop/src/main/java/shop/model/Order.java",
            ]
        );
        assert_eq!(paths[11], "shop/src/main/java/shop/model/Item.java");
    }

    #[test]
    fn colliding_class_names_overwrite() {
        let config = BlueprintConfig::default();
        let mut twin = order();
        twin.id = "o2".into();
        twin.name = "order".into();
        twin.attributes.truncate(1);
        let snapshot = Snapshot {
            classes: vec![order(), twin],
            relations: vec![],
        };

        let tree = ProjectAssembler::new(&config)
            .assemble(&snapshot, "Shop")
            .unwrap();

        assert_eq!(tree.len(), 4 + 7);
        let model = tree.get("shop/src/main/java/shop/model/Order.java").unwrap();
        assert!(!model.contains("total"));
    }
}
