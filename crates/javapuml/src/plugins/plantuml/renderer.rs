//! PlantUML class diagram renderer
//!
//! Serializes a [`ClassDatabase`] into PlantUML text:
//!
//! ```text
//! @startuml
//! class Order {
//! 	+ items: List<LineItem>
//! 	+ double total()
//! }
//! Order - "*" LineItem
//! @enduml
//! ```

use std::fmt::Write as _;

use anyhow::Result;

use super::database::{Association, ClassDatabase, DiagramEntity, SpecializedGeneric};
use crate::core::{Database, DiagramError, Renderer};

pub const START_MARKER: &str = "@startuml";
pub const END_MARKER: &str = "@enduml";

/// PlantUML renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantUmlRenderer;

impl PlantUmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Write one entity block followed by its stub lines
    pub fn write_entity(&self, out: &mut String, entity: &DiagramEntity) -> std::fmt::Result {
        write!(out, "{} {}", entity.kind.keyword(), entity.display_name())?;
        if !entity.extends.is_empty() {
            write!(out, " extends {}", entity.extends.join(", "))?;
        }
        if !entity.implements.is_empty() {
            write!(out, " implements {}", entity.implements.join(", "))?;
        }
        out.push_str(" {\n");

        for member in &entity.members {
            writeln!(out, "\t+ {}", member)?;
        }
        out.push_str("}\n");

        for stub in &entity.stubs {
            writeln!(out, "{}", stub_line(stub))?;
        }
        Ok(())
    }
}

/// `class "Base<Arg>" as Base_Arg { }`
pub fn stub_line(stub: &SpecializedGeneric) -> String {
    format!("class \"{}\" as {} {{ }}", stub.label(), stub.alias())
}

/// `Owner - Target` or `Owner - "*" Target`
pub fn association_line(association: &Association) -> String {
    format!(
        "{} - {}{}",
        association.owner,
        association.multiplicity.marker(),
        association.target
    )
}

impl Renderer<ClassDatabase> for PlantUmlRenderer {
    type Output = String;

    fn render(&self, database: &ClassDatabase) -> Result<String> {
        let mut out = String::new();
        out.push_str(START_MARKER);
        out.push('\n');

        for entity in database.nodes() {
            self.write_entity(&mut out, entity).map_err(|e| {
                DiagramError::render_error(format!(
                    "failed to write entity '{}': {}",
                    entity.display_name(),
                    e
                ))
            })?;
        }

        for association in database.edges() {
            out.push_str(&association_line(association));
            out.push('\n');
        }

        out.push_str(END_MARKER);
        out.push('\n');
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "plantuml"
    }

    fn format(&self) -> &'static str {
        "puml"
    }
}
