//! Type classification for association inference
//!
//! Decides which referenced types are built-ins that never become association
//! edges, and pulls the element type and multiplicity out of generic
//! container types.
//!
//! Generic matching is a single-level text pattern: `Name<...>` greedy up to
//! the last `>`. Arguments are split on every comma, so nested generics such
//! as `Map<String, List<Item>>` yield `List<Item>` as the second argument
//! while `Map<Key, Pair<A, B>>` splits inside `Pair`.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Type names that never produce association edges
pub const IGNORED_TYPES: &[&str] = &[
    "String",
    "Integer",
    "Long",
    "Double",
    "Float",
    "Character",
    "Object",
    "Boolean",
    "Byte",
    "Short",
    "T",
];

static GENERIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\s*<(.+)>$").expect("generic type pattern must compile")
});

/// Returns true if `name` is one of the built-in [`IGNORED_TYPES`]
pub fn is_ignored_type(name: &str) -> bool {
    IGNORED_TYPES.contains(&name)
}

/// A matched `Base<Arg1, Arg2, ...>` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericType {
    pub base: String,
    /// Comma-split arguments, each trimmed of surrounding whitespace
    pub args: Vec<String>,
}

impl GenericType {
    /// The argument before the first comma
    pub fn first_arg(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }
}

/// Match `expr` against `Identifier<Args>`
///
/// Returns `None` for anything else, including qualified names such as
/// `java.util.List<Item>`. Callers treat `None` as a plain type name.
pub fn parse_generic(expr: &str) -> Option<GenericType> {
    let caps = GENERIC_PATTERN.captures(expr)?;
    Some(GenericType {
        base: caps[1].to_string(),
        args: caps[2].split(',').map(|arg| arg.trim().to_string()).collect(),
    })
}

/// Association multiplicity inferred from generic wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Multiplicity {
    #[default]
    One,
    Many,
}

impl Multiplicity {
    /// The PlantUML cardinality label placed before the target, if any
    pub fn marker(self) -> &'static str {
        match self {
            Multiplicity::One => "",
            Multiplicity::Many => "\"*\" ",
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Multiplicity::One => write!(f, "one"),
            Multiplicity::Many => write!(f, "many"),
        }
    }
}

/// Pick the association target and multiplicity for a field type
///
/// For a generic the target is the second argument when there are two or
/// more (the value of a `Map<K, V>`), otherwise the only argument, and the
/// multiplicity is [`Multiplicity::Many`]. A plain type is its own target.
pub fn extract_association_target(expr: &str) -> (String, Multiplicity) {
    match parse_generic(expr) {
        Some(generic) => {
            let target = if generic.args.len() > 1 {
                generic.args[1].clone()
            } else {
                generic.first_arg().to_string()
            };
            (target, Multiplicity::Many)
        }
        None => (expr.to_string(), Multiplicity::One),
    }
}

/// Ignored-type lookup with user-supplied additions
///
/// The built-in [`IGNORED_TYPES`] always apply; extra names can only add to them.
#[derive(Debug, Clone, Default)]
pub struct TypeClassifier {
    extra: BTreeSet<String>,
}

impl TypeClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extra: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        is_ignored_type(name) || self.extra.contains(name)
    }

    /// Built-in names followed by the extra ones in sorted order
    pub fn ignored_names(&self) -> impl Iterator<Item = &str> {
        IGNORED_TYPES
            .iter()
            .copied()
            .chain(self.extra.iter().map(String::as_str))
    }
}
