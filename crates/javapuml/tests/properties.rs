//! Property tests for diagram generation invariants

use proptest::prelude::*;

use javapuml::plugins::plantuml::{ClassDiagramBuilder, IGNORED_TYPES};
use javapuml::prelude::*;

// ===================
// Strategies
// ===================

/// Class names that are never in the ignored list
fn class_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{1,12}".prop_filter("avoid ignored names", |s| {
        !IGNORED_TYPES.contains(&s.as_str())
    })
}

fn ignored_name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(IGNORED_TYPES).prop_map(str::to_string)
}

/// Field types wrapping an ignored name in the shapes association inference understands
fn ignored_field_type_strategy() -> impl Strategy<Value = String> {
    (ignored_name_strategy(), class_name_strategy(), 0usize..3).prop_map(
        |(ignored, key, shape)| match shape {
            0 => ignored,
            1 => format!("List<{ignored}>"),
            _ => format!("Map<{key}, {ignored}>"),
        },
    )
}

// ===================
// Property Test Functions
// ===================

fn check_member_count_and_order(
    fields: &[(String, String)],
    methods: &[String],
) -> Result<(), TestCaseError> {
    let mut source = String::from("class Subject {\n");
    for (name, ty) in fields {
        source.push_str(&format!("    private {ty} {name};\n"));
    }
    for name in methods {
        source.push_str(&format!("    public void {name}() {{ }}\n"));
    }
    source.push('}');

    let unit = javapuml::parse(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
    let database = ClassDiagramBuilder::new().build(&unit.types);
    let entity = database.nodes().next().unwrap();

    let expected: Vec<String> = fields
        .iter()
        .map(|(name, ty)| format!("{name}: {ty}"))
        .chain(methods.iter().map(|name| format!("void {name}()")))
        .collect();
    prop_assert_eq!(&entity.members, &expected);
    Ok(())
}

fn check_ignored_types_never_associate(owner: &str, ty: &str) -> Result<(), TestCaseError> {
    let declaration = TypeDeclaration::class(owner)
        .with_field(FieldDecl::new("value", TypeExpr::reference(ty)));
    let database = ClassDiagramBuilder::new().build([&declaration]);
    prop_assert_eq!(database.edge_count(), 0, "{} produced an edge", ty);
    Ok(())
}

fn check_duplicate_edges_render_once(
    owner: &str,
    target: &str,
    copies: usize,
) -> Result<(), TestCaseError> {
    let mut declaration = TypeDeclaration::class(owner);
    for i in 0..copies {
        declaration = declaration
            .with_field(FieldDecl::new(format!("single{i}"), TypeExpr::reference(target)))
            .with_field(FieldDecl::new(
                format!("many{i}"),
                TypeExpr::reference(format!("List<{target}>")),
            ));
    }

    let database = ClassDiagramBuilder::new().build([&declaration]);
    let output = PlantUmlRenderer::new()
        .render(&database)
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

    let single = format!("{owner} - {target}\n");
    let many = format!("{owner} - \"*\" {target}\n");
    prop_assert_eq!(output.matches(&single).count(), 1);
    prop_assert_eq!(output.matches(&many).count(), 1);
    Ok(())
}

fn check_generic_supertype(name: &str, base: &str, arg: &str) -> Result<(), TestCaseError> {
    let declaration = TypeDeclaration::class(name).with_extends(format!("{base}<{arg}>"));
    let database = ClassDiagramBuilder::new().build([&declaration]);
    let output = PlantUmlRenderer::new()
        .render(&database)
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

    let header = format!("class {arg}_{name} extends {base}_{arg} {{\n");
    let stub = format!("class \"{base}<{arg}>\" as {base}_{arg} {{ }}\n");
    prop_assert!(output.contains(&header), "missing header in {}", output);
    prop_assert_eq!(output.matches(&stub).count(), 1);
    Ok(())
}

fn check_rendering_is_idempotent(names: &[String]) -> Result<(), TestCaseError> {
    let source: String = names
        .windows(2)
        .map(|pair| format!("class {} {{ {} next; }}\n", pair[0], pair[1]))
        .collect();

    let first = javapuml::render(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
    let second = javapuml::render(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(first, second);
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #[test]
    fn member_lines_follow_declaration_order(
        fields in prop::collection::vec(("f_[a-z0-9]{0,8}", class_name_strategy()), 0..6),
        methods in prop::collection::vec("m_[a-z0-9]{0,8}", 0..6),
    ) {
        check_member_count_and_order(&fields, &methods)?;
    }

    #[test]
    fn ignored_types_never_associate(
        owner in class_name_strategy(),
        ty in ignored_field_type_strategy(),
    ) {
        check_ignored_types_never_associate(&owner, &ty)?;
    }

    #[test]
    fn duplicate_edges_render_once(
        owner in class_name_strategy(),
        target in class_name_strategy(),
        copies in 1usize..5,
    ) {
        check_duplicate_edges_render_once(&owner, &target, copies)?;
    }

    #[test]
    fn generic_supertypes_yield_one_stub(
        name in class_name_strategy(),
        base in class_name_strategy(),
        arg in class_name_strategy(),
    ) {
        check_generic_supertype(&name, &base, &arg)?;
    }

    #[test]
    fn rendering_is_idempotent(names in prop::collection::vec(class_name_strategy(), 2..6)) {
        check_rendering_is_idempotent(&names)?;
    }
}
