//! javapuml - Generate PlantUML class diagrams from Java sources
//!
//! A library for parsing Java class and interface declarations and rendering
//! them as a PlantUML class diagram with inferred associations.
//!
//! # Quick Start
//!
//! ```rust
//! use javapuml::render;
//!
//! let source = "class Order { List<LineItem> items; double total() { return 0; } }";
//! let puml = render(source).unwrap();
//! assert!(puml.contains("Order - \"*\" LineItem"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use javapuml::prelude::*;
//!
//! let source = "public class OrderRepository extends Repository<Order> {}";
//!
//! // Parse into the declaration model
//! let unit = JavaParser::new().parse(source).unwrap();
//! assert_eq!(unit.types[0].extends, vec!["Repository<Order>"]);
//!
//! // Build the diagram model
//! let database = ClassDiagramBuilder::new().build(&unit.types);
//! assert!(database.get_entity("Order_OrderRepository").is_some());
//!
//! // Render to PlantUML
//! let puml = PlantUmlRenderer::new().render(&database).unwrap();
//! assert!(puml.contains("class \"Repository<Order>\" as Repository_Order { }"));
//! ```

pub mod core;
pub mod plugins;

pub use core::*;

use std::path::Path;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        CompilationUnit, Database, DiagramError, FieldDecl, GeneratorConfig, MethodDecl,
        Renderer, TypeDeclaration, TypeExpr, TypeKind, TypeShape,
    };
    pub use crate::plugins::java::JavaParser;
    pub use crate::plugins::orchestrator::Orchestrator;
    pub use crate::plugins::plantuml::{
        ClassDatabase, ClassDiagramBuilder, PlantUmlRenderer, TypeClassifier,
    };
}

/// Render one Java source text as a PlantUML class diagram
///
/// # Example
/// ```rust
/// use javapuml::render;
///
/// let puml = render("interface Shape { double area(); }").unwrap();
/// assert_eq!(puml, "@startuml\ninterface Shape {\n\t+ double area()\n}\n@enduml\n");
/// ```
pub fn render(source: &str) -> anyhow::Result<String> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::new().process_source(source)
}

/// Parse one Java source text without building a diagram
///
/// # Example
/// ```rust
/// use javapuml::{parse, TypeKind};
///
/// let unit = parse("package shop; interface Shape {} class Circle implements Shape {}").unwrap();
/// assert_eq!(unit.package.as_deref(), Some("shop"));
/// assert_eq!(unit.types[0].kind, TypeKind::Interface);
/// assert_eq!(unit.types[1].implements, vec!["Shape"]);
/// ```
pub fn parse(source: &str) -> Result<CompilationUnit, DiagramError> {
    plugins::java::JavaParser::new().parse(source)
}

/// Generate the diagram for a project tree
///
/// Scans the sub-paths named in `config` below `root`; files that fail to
/// parse are logged and skipped.
pub fn generate(root: &Path, config: &GeneratorConfig) -> anyhow::Result<String> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::with_config(config.clone()).generate_project(root)
}
