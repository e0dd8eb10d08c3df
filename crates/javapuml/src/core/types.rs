//! Core type definitions for diagram generation
//!
//! This module contains the declaration model shared by the Java front-end
//! and the diagram builder: type declarations, their fields and methods, and
//! the compilation unit that groups them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
}

impl TypeKind {
    /// The keyword used for this kind in both Java and PlantUML
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Structural shape of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeShape {
    /// `int`, `double`, `boolean`, ...
    Primitive,
    /// A class or interface type, possibly qualified or parameterized
    Reference,
    /// Any type with one or more `[]` dimensions
    Array,
}

/// A type expression as written in the source, normalized to canonical spacing
///
/// Type arguments are separated by `", "` and nothing else carries whitespace,
/// so `Map<String,List<Item>>` is stored as `Map<String, List<Item>>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeExpr {
    pub text: String,
    pub shape: TypeShape,
}

impl TypeExpr {
    pub fn new(text: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            text: text.into(),
            shape,
        }
    }

    pub fn primitive(text: impl Into<String>) -> Self {
        Self::new(text, TypeShape::Primitive)
    }

    pub fn reference(text: impl Into<String>) -> Self {
        Self::new(text, TypeShape::Reference)
    }

    pub fn array(text: impl Into<String>) -> Self {
        Self::new(text, TypeShape::Array)
    }

    /// True for class or interface types
    pub fn is_reference(&self) -> bool {
        self.shape == TypeShape::Reference
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A single field variable
///
/// `int x, y;` yields two `FieldDecl`s sharing the same type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A method declaration without its body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub return_type: String,
    /// Parameter types only; varargs parameters end in `...`
    pub parameters: Vec<String>,
    pub is_static: bool,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters: Vec::new(),
            is_static: false,
        }
    }

    pub fn with_parameter(mut self, ty: impl Into<String>) -> Self {
        self.parameters.push(ty.into());
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Render the declaration as `<return> <name>(<T1>, <T2>)`
    ///
    /// Modifiers, parameter names and `throws` clauses are omitted.
    pub fn signature(&self) -> String {
        format!(
            "{} {}({})",
            self.return_type,
            self.name,
            self.parameters.join(", ")
        )
    }
}

/// A class or interface declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub kind: TypeKind,
    pub name: String,
    /// Raw `extends` expressions in declaration order
    pub extends: Vec<String>,
    /// Raw `implements` expressions in declaration order
    pub implements: Vec<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    /// Member classes and interfaces declared inside this one
    pub nested: Vec<TypeDeclaration>,
}

impl TypeDeclaration {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            extends: Vec::new(),
            implements: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn with_extends(mut self, ty: impl Into<String>) -> Self {
        self.extends.push(ty.into());
        self
    }

    pub fn with_implements(mut self, ty: impl Into<String>) -> Self {
        self.implements.push(ty.into());
        self
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_nested(mut self, nested: TypeDeclaration) -> Self {
        self.nested.push(nested);
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Count this declaration and every nested one
    pub fn declaration_count(&self) -> usize {
        1 + self
            .nested
            .iter()
            .map(TypeDeclaration::declaration_count)
            .sum::<usize>()
    }
}

/// The declarations found in one source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub package: Option<String>,
    pub imports: Vec<String>,
    pub types: Vec<TypeDeclaration>,
}

impl CompilationUnit {
    /// Count all class and interface declarations, nested ones included
    pub fn declaration_count(&self) -> usize {
        self.types
            .iter()
            .map(TypeDeclaration::declaration_count)
            .sum()
    }
}
