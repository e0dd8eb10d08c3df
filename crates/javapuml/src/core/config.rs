//! Generator configuration
//!
//! Controls which sub-directories of a project are scanned and which extra
//! type names are kept out of association edges.

use std::path::PathBuf;

/// Sub-directories scanned when no explicit list is configured, in scan order
pub const DEFAULT_SOURCE_ROOTS: &[&str] = &["controllers", "models/repositories", "services"];

/// Output file written by the CLI when no path is given
pub const DEFAULT_OUTPUT_PATH: &str = "output.puml";

/// File extension of the sources picked up during discovery
pub const SOURCE_EXTENSION: &str = "java";

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Sub-paths relative to the project root, visited in this order
    pub source_roots: Vec<PathBuf>,
    /// Type names ignored in addition to the built-in list
    pub extra_ignored: Vec<String>,
    /// Where the rendered document is written
    pub output_path: PathBuf,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self {
            source_roots: DEFAULT_SOURCE_ROOTS.iter().map(PathBuf::from).collect(),
            extra_ignored: Vec::new(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }

    /// Replace the scanned sub-paths
    ///
    /// An empty list keeps the defaults.
    pub fn with_source_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots: Vec<PathBuf> = roots.into_iter().map(Into::into).collect();
        if !roots.is_empty() {
            self.source_roots = roots;
        }
        self
    }

    /// Add type names that never produce association edges
    pub fn with_extra_ignored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_ignored.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
