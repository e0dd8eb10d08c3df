//! End-to-end tests over project trees on disk

use std::fs;
use std::path::Path;

use javapuml::prelude::*;
use javapuml::{generate, DEFAULT_SOURCE_ROOTS};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn shop() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "controllers/OrderController.java",
        "@RestController
         public class OrderController {
             private final OrderService orderService;
             public OrderController(OrderService orderService) { this.orderService = orderService; }
             @GetMapping(\"/orders\")
             public List<Order> list() { return orderService.findAll(); }
         }",
    );
    write(
        dir.path(),
        "models/repositories/OrderRepository.java",
        "public interface OrderRepository extends JpaRepository<Order, Long> {
             List<Order> findByCustomer(Customer customer);
         }",
    );
    write(
        dir.path(),
        "services/OrderService.java",
        "@Service
         public class OrderService {
             private OrderRepository repository;
             private Map<Long, Order> cache = new HashMap<>();
             public List<Order> findAll() { return repository.findAll(); }
         }",
    );
    write(
        dir.path(),
        "services/impl/AuditService.java",
        "class AuditService extends BaseService<AuditEvent> { List<AuditEvent> events; }",
    );
    write(dir.path(), "models/Order.java", "public class Order { Customer customer; }");
    dir
}

#[test]
fn test_default_source_roots() {
    assert_eq!(
        DEFAULT_SOURCE_ROOTS,
        &["controllers", "models/repositories", "services"]
    );
}

#[test]
fn test_generate_shop() {
    let dir = shop();
    let output = generate(dir.path(), &GeneratorConfig::default()).unwrap();

    assert_eq!(
        output,
        "@startuml\n\
         class OrderController {\n\
         \t+ orderService: OrderService\n\
         \t+ List<Order> list()\n\
         }\n\
         interface Order_OrderRepository extends JpaRepository_Order {\n\
         \t+ List<Order> findByCustomer(Customer)\n\
         }\n\
         class \"JpaRepository<Order>\" as JpaRepository_Order { }\n\
         class OrderService {\n\
         \t+ repository: OrderRepository\n\
         \t+ cache: Map<Long, Order>\n\
         \t+ List<Order> findAll()\n\
         }\n\
         class AuditEvent_AuditService extends BaseService_AuditEvent {\n\
         \t+ events: List<AuditEvent>\n\
         }\n\
         class \"BaseService<AuditEvent>\" as BaseService_AuditEvent { }\n\
         OrderController - OrderService\n\
         OrderService - OrderRepository\n\
         OrderService - \"*\" Order\n\
         AuditEvent_AuditService - \"*\" AuditEvent\n\
         @enduml\n"
    );
}

#[test]
fn test_files_outside_source_roots_are_ignored() {
    let dir = shop();
    let output = generate(dir.path(), &GeneratorConfig::default()).unwrap();
    assert!(!output.contains("class Order {"));
}

#[test]
fn test_custom_source_roots() {
    let dir = shop();
    let config = GeneratorConfig::new().with_source_roots(["models"]);
    let output = generate(dir.path(), &config).unwrap();

    assert!(output.contains("class Order {\n\t+ customer: Customer\n}\n"));
    assert!(output.contains("interface Order_OrderRepository"));
    assert!(!output.contains("OrderService {"));
}

#[test]
fn test_broken_file_is_skipped() {
    let dir = shop();
    write(dir.path(), "services/Broken.java", "public class Broken { int x }");

    let output = generate(dir.path(), &GeneratorConfig::default()).unwrap();
    assert!(!output.contains("Broken"));
    assert!(output.contains("class OrderService {"));
}

#[test]
fn test_empty_project() {
    let dir = TempDir::new().unwrap();
    let output = generate(dir.path(), &GeneratorConfig::default()).unwrap();
    assert_eq!(output, "@startuml\n@enduml\n");
}

#[test]
fn test_write_project_overwrites_output() {
    let dir = shop();
    let target = dir.path().join("output.puml");
    fs::write(&target, "stale").unwrap();

    let config = GeneratorConfig::new().with_output_path(&target);
    Orchestrator::with_config(config)
        .write_project(dir.path())
        .unwrap();

    let contents = fs::read_to_string(&target).unwrap();
    assert!(contents.starts_with("@startuml\nclass OrderController {"));
}
