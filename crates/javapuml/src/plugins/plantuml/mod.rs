//! PlantUML class diagram plugin
//!
//! Builds diagram entities and associations from type declarations and
//! renders them as PlantUML.

mod builder;
mod database;
mod renderer;
pub mod typeinfo;

pub use builder::ClassDiagramBuilder;
pub use database::{Association, ClassDatabase, DiagramEntity, SpecializedGeneric};
pub use renderer::{association_line, stub_line, PlantUmlRenderer, END_MARKER, START_MARKER};
pub use typeinfo::{
    extract_association_target, is_ignored_type, parse_generic, GenericType, Multiplicity,
    TypeClassifier, IGNORED_TYPES,
};
