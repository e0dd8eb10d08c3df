//! Pipeline orchestrator
//!
//! Coordinates a generation run over a project tree:
//! Discovery → Parser → Builder (ClassDatabase) → Renderer

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, span, trace, warn, Level};
use walkdir::WalkDir;

use crate::core::{CompilationUnit, Database, DiagramError, GeneratorConfig, Renderer, SOURCE_EXTENSION};
use crate::plugins::java::JavaParser;
use crate::plugins::plantuml::{ClassDatabase, ClassDiagramBuilder, PlantUmlRenderer, TypeClassifier};

/// Runs the parse → build → render pipeline
///
/// One orchestrator holds one configuration. Each call to
/// [`Orchestrator::build_project`] starts from an empty [`ClassDatabase`], so
/// repeated runs over unchanged input produce identical output.
pub struct Orchestrator {
    config: GeneratorConfig,
    parser: JavaParser,
    builder: ClassDiagramBuilder,
    renderer: PlantUmlRenderer,
}

impl Orchestrator {
    /// Create an orchestrator with the default configuration
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        let classifier = TypeClassifier::with_extra(config.extra_ignored.iter().cloned());
        Self {
            config,
            parser: JavaParser::new(),
            builder: ClassDiagramBuilder::with_classifier(classifier),
            renderer: PlantUmlRenderer::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Java sources under every configured sub-path of `root`, in visit order
    ///
    /// Sub-paths are visited in configuration order; files inside one
    /// sub-path are ordered by a depth-first walk sorted by file name.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        let discover_span = span!(Level::DEBUG, "discover", root = %root.display());
        let _enter = discover_span.enter();

        let files: Vec<PathBuf> = self
            .config
            .source_roots
            .iter()
            .flat_map(|sub_path| discover_sources(&root.join(sub_path)))
            .collect();

        debug!(file_count = files.len(), "Discovery completed");
        files
    }

    /// Read and parse one source file
    pub fn parse_file(&self, path: &Path) -> Result<CompilationUnit> {
        let source = fs::read_to_string(path)
            .map_err(DiagramError::from)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let unit = self
            .parser
            .parse(&source)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(unit)
    }

    /// Parse every discovered file into one build context
    ///
    /// Files that cannot be read or parsed are logged and skipped.
    pub fn build_project(&self, root: &Path) -> Result<ClassDatabase> {
        let build_span = span!(Level::INFO, "build_project", root = %root.display());
        let _enter = build_span.enter();

        if !root.is_dir() {
            return Err(DiagramError::discovery_error(
                root,
                "project root is not a directory".to_string(),
            )
            .into());
        }

        let mut database = ClassDatabase::new();
        let mut skipped = 0usize;

        for path in self.discover(root) {
            match self.parse_file(&path) {
                Ok(unit) => {
                    trace!(path = %path.display(), declarations = unit.declaration_count(), "Parsed file");
                    self.builder.visit_unit(&unit, &mut database);
                }
                Err(error) => {
                    skipped += 1;
                    warn!(path = %path.display(), error = %format!("{:#}", error), "Skipping file");
                }
            }
        }

        info!(
            entities = database.node_count(),
            associations = database.edge_count(),
            skipped,
            "Project model built"
        );
        Ok(database)
    }

    /// Build and render the diagram for a project tree
    pub fn generate_project(&self, root: &Path) -> Result<String> {
        let generate_span = span!(Level::INFO, "generate_project", root = %root.display());
        let _enter = generate_span.enter();

        let database = self.build_project(root)?;
        self.render(&database)
    }

    /// Generate the diagram for `root` and write it to the configured output path
    pub fn write_project(&self, root: &Path) -> Result<PathBuf> {
        let document = self.generate_project(root)?;
        let path = self.config.output_path.clone();
        fs::write(&path, document)
            .map_err(DiagramError::from)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Diagram written");
        Ok(path)
    }

    /// Render the diagram for a single Java source text
    ///
    /// Unlike project runs, a parse failure here is returned to the caller.
    pub fn process_source(&self, source: &str) -> Result<String> {
        let process_span = span!(Level::INFO, "process_source", input_len = source.len());
        let _enter = process_span.enter();

        let unit = self.parser.parse(source)?;
        let mut database = ClassDatabase::new();
        self.builder.visit_unit(&unit, &mut database);
        self.render(&database)
    }

    fn render(&self, database: &ClassDatabase) -> Result<String> {
        let render_span = span!(Level::DEBUG, "pipeline_render", renderer = self.renderer.name());
        let _enter = render_span.enter();

        let document = self.renderer.render(database)?;
        debug!(output_len = document.len(), "Rendering completed");
        Ok(document)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

fn discover_sources(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        warn!(path = %dir.display(), "Source directory not found");
        return Vec::new();
    }

    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(error = %error, "Skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext == SOURCE_EXTENSION)
        })
        .map(|entry| entry.into_path())
        .collect()
}
