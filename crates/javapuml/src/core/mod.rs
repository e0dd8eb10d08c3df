//! Core abstractions for diagram generation
//!
//! This module defines the declaration model, the traits the diagram
//! plugins implement, and the shared error and logging infrastructure.

mod config;
mod database;
mod error;
pub mod logging;
mod renderer;
mod types;

pub use config::*;
pub use database::*;
pub use error::*;
pub use logging::*;
pub use renderer::*;
pub use types::*;
