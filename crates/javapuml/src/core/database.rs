//! Core database trait for diagram data
//!
//! A database is the build context of one run: it is filled while the
//! declarations are visited and read once by the renderer. The trait is the
//! read side that renderers are written against.

/// Read access to a diagram database
///
/// The associated types allow each diagram type to define its own
/// node and edge structures with type-specific metadata.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Iterate over all nodes in insertion order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges in insertion order
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;
}
