//! Core renderer trait for diagram output
//!
//! This trait defines the interface for rendering diagram data
//! into a textual output format.

use anyhow::Result;

use super::Database;

/// Core trait for diagram renderers
///
/// # Example
/// ```
/// use javapuml::core::Renderer;
/// use javapuml::plugins::plantuml::{ClassDatabase, PlantUmlRenderer};
///
/// let db = ClassDatabase::new();
/// let renderer = PlantUmlRenderer::new();
/// let output = renderer.render(&db).unwrap();
/// assert_eq!(output, "@startuml\n@enduml\n");
/// ```
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the diagram database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
