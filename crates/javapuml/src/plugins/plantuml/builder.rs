//! Diagram model builder
//!
//! Turns type declarations into diagram entities and association edges.
//! Declarations are visited depth-first: an entity is committed before the
//! declarations nested inside it, and nested declarations become top-level
//! entities under their simple name.

use tracing::{debug, span, trace, Level};

use super::database::{Association, ClassDatabase, DiagramEntity, SpecializedGeneric};
use super::typeinfo::{extract_association_target, parse_generic, TypeClassifier};
use crate::core::{CompilationUnit, FieldDecl, MethodDecl, TypeDeclaration};

/// Builds a [`ClassDatabase`] from type declarations
#[derive(Debug, Clone, Default)]
pub struct ClassDiagramBuilder {
    classifier: TypeClassifier,
}

impl ClassDiagramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classifier(classifier: TypeClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &TypeClassifier {
        &self.classifier
    }

    /// Visit every declaration and return the filled database
    pub fn build<'a, I>(&self, declarations: I) -> ClassDatabase
    where
        I: IntoIterator<Item = &'a TypeDeclaration>,
    {
        let mut database = ClassDatabase::new();
        for declaration in declarations {
            self.visit(declaration, &mut database);
        }
        database
    }

    /// Visit all top-level declarations of a compilation unit
    pub fn visit_unit(&self, unit: &CompilationUnit, database: &mut ClassDatabase) {
        for declaration in &unit.types {
            self.visit(declaration, database);
        }
    }

    /// Commit one entity for `declaration`, then recurse into nested declarations
    pub fn visit(&self, declaration: &TypeDeclaration, database: &mut ClassDatabase) {
        let visit_span = span!(
            Level::DEBUG,
            "visit_declaration",
            name = %declaration.name,
            kind = %declaration.kind
        );
        let _enter = visit_span.enter();

        let entity = self.build_entity(declaration);
        let owner = entity.display_name();

        for field in &declaration.fields {
            if let Some(association) = self.associate(&owner, field) {
                let inserted = database.add_association(association);
                trace!(field = %field.name, inserted, "Association inferred");
            }
        }

        debug!(
            display_name = %owner,
            members = entity.members.len(),
            stubs = entity.stubs.len(),
            "Entity committed"
        );
        database.add_entity(entity);

        for nested in &declaration.nested {
            self.visit(nested, database);
        }
    }

    /// Build the entity for a single declaration, ignoring nested declarations
    pub fn build_entity(&self, declaration: &TypeDeclaration) -> DiagramEntity {
        let mut entity = DiagramEntity::new(declaration.kind, declaration.name.clone());

        for supertype in &declaration.extends {
            match parse_generic(supertype) {
                Some(generic) => {
                    let stub = SpecializedGeneric::new(generic.base.clone(), generic.first_arg());
                    entity.extends.push(stub.alias());
                    entity.prefix.push_str(&stub.arg);
                    entity.prefix.push('_');
                    entity.stubs.push(stub);
                }
                None => entity.extends.push(supertype.clone()),
            }
        }

        entity.implements = declaration.implements.clone();

        entity
            .members
            .extend(declaration.fields.iter().map(field_line));
        entity
            .members
            .extend(declaration.methods.iter().map(method_line));

        entity
    }

    /// The association a field implies, if its type is a non-ignored class or interface
    pub fn associate(&self, owner: &str, field: &FieldDecl) -> Option<Association> {
        if !field.ty.is_reference() {
            return None;
        }

        let (target, multiplicity) = extract_association_target(&field.ty.text);
        if self.classifier.is_ignored(&target) {
            trace!(field = %field.name, target = %target, "Ignored field type");
            return None;
        }

        Some(Association::new(owner, target, multiplicity))
    }
}

fn field_line(field: &FieldDecl) -> String {
    format!("{}: {}", field.name, field.ty.text)
}

fn method_line(method: &MethodDecl) -> String {
    if method.is_static {
        format!("{{static}} {}", method.signature())
    } else {
        method.signature()
    }
}
