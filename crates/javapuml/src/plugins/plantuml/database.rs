//! Class diagram database
//!
//! Stores diagram entities and association edges for one generation run.
//! Entities keep visit order; associations keep first-insertion order and
//! collapse duplicates.

use indexmap::IndexSet;

use super::typeinfo::Multiplicity;
use crate::core::{Database, TypeKind};

/// Stand-in entity for one concrete instantiation of a generic supertype
///
/// `Repository<Order>` becomes the alias `Repository_Order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecializedGeneric {
    pub base: String,
    pub arg: String,
}

impl SpecializedGeneric {
    pub fn new(base: impl Into<String>, arg: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            arg: arg.into(),
        }
    }

    /// The diagram identifier, `Base_Arg`
    pub fn alias(&self) -> String {
        format!("{}_{}", self.base, self.arg)
    }

    /// The displayed label, `Base<Arg>`
    pub fn label(&self) -> String {
        format!("{}<{}>", self.base, self.arg)
    }
}

/// One class or interface block in the diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEntity {
    pub kind: TypeKind,
    pub name: String,
    /// Disambiguation prefix accumulated from generic supertypes, e.g. `Order_`
    pub prefix: String,
    /// Resolved supertype names
    pub extends: Vec<String>,
    /// Implemented interfaces as written
    pub implements: Vec<String>,
    /// Field lines followed by method lines, without the `+ ` marker
    pub members: Vec<String>,
    /// Specialized generic stubs rendered right after this entity
    pub stubs: Vec<SpecializedGeneric>,
}

impl DiagramEntity {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            prefix: String::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            members: Vec::new(),
            stubs: Vec::new(),
        }
    }

    /// Prefix followed by the declared name
    pub fn display_name(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }
}

/// A field-derived edge from an entity to the type it references
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Association {
    pub owner: String,
    pub target: String,
    pub multiplicity: Multiplicity,
}

impl Association {
    pub fn new(
        owner: impl Into<String>,
        target: impl Into<String>,
        multiplicity: Multiplicity,
    ) -> Self {
        Self {
            owner: owner.into(),
            target: target.into(),
            multiplicity,
        }
    }
}

/// Class diagram database
///
/// This is the build context of a run: the builder is its only writer and the
/// renderer its only reader.
#[derive(Debug, Default)]
pub struct ClassDatabase {
    entities: Vec<DiagramEntity>,
    associations: IndexSet<Association>,
}

impl ClassDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, entity: DiagramEntity) {
        self.entities.push(entity);
    }

    /// Insert an association, returning false if it was already present
    pub fn add_association(&mut self, association: Association) -> bool {
        self.associations.insert(association)
    }

    /// Look up an entity by its display name
    pub fn get_entity(&self, display_name: &str) -> Option<&DiagramEntity> {
        self.entities
            .iter()
            .find(|entity| entity.display_name() == display_name)
    }
}

impl Database for ClassDatabase {
    type Node = DiagramEntity;
    type Edge = Association;

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.entities.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.associations.iter()
    }

    fn node_count(&self) -> usize {
        self.entities.len()
    }

    fn edge_count(&self) -> usize {
        self.associations.len()
    }
}
