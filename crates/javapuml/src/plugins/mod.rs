//! Plugin implementations
//!
//! The Java front-end produces declarations, the PlantUML plugin turns them
//! into a class diagram, and the orchestrator wires both to the file system.

pub mod java;
pub mod orchestrator;
pub mod plantuml;

pub use java::*;
pub use orchestrator::*;
pub use plantuml::*;
