//! End-to-end tests that run the javapuml binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn javapuml(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_javapuml"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .env_remove("JAVAPUML_LOG_LEVEL")
        .env_remove("JAVAPUML_LOG_FORMAT")
        .output()
        .expect("failed to run javapuml")
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn shop() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "models/repositories/OrderRepository.java",
        "package shop.models.repositories;\n\
         public interface OrderRepository extends Repository<Order> {\n\
             List<Order> findAll();\n\
         }\n",
    );
    write(
        dir.path(),
        "services/OrderService.java",
        "package shop.services;\n\
         public class OrderService {\n\
             private final OrderRepository repository;\n\
             private Map<String, Order> cache;\n\
             public OrderService(OrderRepository repository) { this.repository = repository; }\n\
             public static OrderService create() { return null; }\n\
         }\n",
    );
    dir
}

#[test]
fn generate_writes_default_output_file() {
    let dir = shop();
    let output = javapuml(&["generate", "."], dir.path());

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "PlantUML code has been written to: output.puml\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("output.puml")).unwrap(),
        "@startuml\n\
         interface Order_OrderRepository extends Repository_Order {\n\
         \t+ List<Order> findAll()\n\
         }\n\
         class \"Repository<Order>\" as Repository_Order { }\n\
         class OrderService {\n\
         \t+ repository: OrderRepository\n\
         \t+ cache: Map<String, Order>\n\
         \t+ {static} OrderService create()\n\
         }\n\
         OrderService - OrderRepository\n\
         OrderService - \"*\" Order\n\
         @enduml\n"
    );
}

#[test]
fn generate_to_stdout() {
    let dir = shop();
    let output = javapuml(&["generate", ".", "-o", "-", "--subdir", "services"], dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("@startuml\nclass OrderService {"));
    assert!(stdout.ends_with("@enduml\n"));
    assert!(!dir.path().join("output.puml").exists());
}

#[test]
fn generate_skips_broken_files() {
    let dir = shop();
    write(dir.path(), "services/Broken.java", "public class Broken {\n");

    let output = javapuml(&["generate", ".", "-o", "-"], dir.path());

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Broken"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Broken.java"));
}

#[test]
fn generate_fails_on_unwritable_output() {
    let dir = shop();
    let output = javapuml(&["generate", ".", "-o", "no/such/dir/out.puml"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: Failed to write"));
}

#[test]
fn generate_fails_on_missing_root() {
    let dir = TempDir::new().unwrap();
    let output = javapuml(&["generate", "missing"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Discovery error"));
}

#[test]
fn inspect_prints_json() {
    let dir = shop();
    let output = javapuml(
        &["inspect", "-i", "services/OrderService.java", "--json"],
        dir.path(),
    );

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["package"], "shop.services");
    assert_eq!(json["types"][0]["name"], "OrderService");
    assert_eq!(json["types"][0]["kind"], "class");
    assert_eq!(json["types"][0]["fields"][1]["type"]["text"], "Map<String, Order>");
}

#[test]
fn ignored_lists_builtin_names() {
    let dir = TempDir::new().unwrap();
    let output = javapuml(&["ignored", "--json"], dir.path());

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], 11);
    assert_eq!(json["ignored_types"][0], "String");
}

#[test]
fn ignored_includes_extra_names() {
    let dir = TempDir::new().unwrap();
    let output = javapuml(&["ignored", "--ignore", "UUID", "--json"], dir.path());

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], 12);
    assert_eq!(json["ignored_types"][11], "UUID");
}
