mod common;

use common::greet_controller;
use ctrlrouter::dispatcher::ParsedRequest;
use ctrlrouter::error::SpecError;
use ctrlrouter::metadata::{ClassDef, MetadataRegistry};
use ctrlrouter::resolver::MetadataResolver;
use ctrlrouter::router::{join_path, RoutingTable};
use ctrlrouter::schema::TypeDescriptor;
use ctrlrouter::spec::{HandlerSpec, Operation, Parameter, Verb};
use http::Method;
use serde_json::json;

fn table_for(registry: &MetadataRegistry, class: ctrlrouter::ClassId) -> RoutingTable {
    let spec = MetadataResolver::new().resolve(registry, class).unwrap();
    let mut table = RoutingTable::new();
    table
        .register_controller(&registry.controller_ref(class).unwrap(), &spec)
        .unwrap();
    table
}

#[test]
fn test_join_path_examples() {
    assert_eq!(join_path("", "a"), "/a");
    assert_eq!(join_path("/root//x", "/a"), "/root/x/a");
    assert_eq!(join_path("//root//x", "//a///b////c"), "/root/x/a/b/c");
    assert_eq!(join_path("root//x", "//a///b////c"), "/root/x/a/b/c");
    assert_eq!(join_path("/root/", "/"), "/root");
}

#[test]
fn test_undecorated_parameters_are_dropped() {
    let mut registry = MetadataRegistry::new();
    let class = greet_controller(&mut registry, "/greet");

    let spec = MetadataResolver::new().resolve(&registry, class).unwrap();
    let op = spec.operation("/greet", Verb::Get).unwrap();
    assert_eq!(op.parameters().len(), 1);
    assert_eq!(
        serde_json::to_value(&op.parameters()[0]).unwrap(),
        json!({"name": "message", "in": "query", "schema": {"type": "string"}})
    );
}

#[test]
fn test_finds_simple_route() {
    let mut registry = MetadataRegistry::new();
    let class = greet_controller(&mut registry, "/hello");
    let table = table_for(&registry, class);

    let record = table.find(&ParsedRequest::new(Method::GET, "/hello")).unwrap();
    assert_eq!(record.describe(), "TestController.greet");
    assert_eq!(record.method_name.as_ref(), "greet");
    assert!(record.path_params.is_empty());

    assert!(table.find(&ParsedRequest::new(Method::GET, "/missing")).is_none());
}

#[test]
fn test_finds_route_under_base_path() {
    let mut registry = MetadataRegistry::new();
    let class = greet_controller(&mut registry, "/hello");
    registry.api(class, HandlerSpec::new().with_base_path("/my")).unwrap();
    let table = table_for(&registry, class);

    let record = table.find(&ParsedRequest::new(Method::GET, "/my/hello")).unwrap();
    assert_eq!(record.describe(), "TestController.greet");
    assert!(table.find(&ParsedRequest::new(Method::GET, "/hello")).is_none());
}

#[test]
fn test_extracts_path_parameters() {
    let mut registry = MetadataRegistry::new();
    let class = registry
        .define_class(ClassDef::new("OrderController").method(
            "line",
            [TypeDescriptor::string(), TypeDescriptor::number()],
        ))
        .unwrap();
    registry.get(class, "line", "/orders/{order}/lines/{line}", None).unwrap();
    registry.param(class, "line", 0, Parameter::path("order")).unwrap();
    registry.param(class, "line", 1, Parameter::path("line")).unwrap();
    let table = table_for(&registry, class);

    let request = ParsedRequest::from_url(Method::GET, "/orders/A-1/lines/3?expand=true");
    let record = table.find(&request).unwrap();
    assert_eq!(record.get_path_param("order"), Some("A-1"));
    assert_eq!(record.get_path_param("line"), Some("3"));
    assert_eq!(
        record.raw_arguments(&request),
        vec![("order", Some("A-1")), ("line", Some("3"))]
    );
}

#[test]
fn test_operation_id_names_the_method_of_class_level_paths() {
    let mut registry = MetadataRegistry::new();
    let class = registry.define_class(ClassDef::new("StatusController")).unwrap();
    registry
        .api(
            class,
            HandlerSpec::new().with_operation(Verb::Get, "/status", Operation::new().operation_id("status")),
        )
        .unwrap();
    let table = table_for(&registry, class);

    let record = table.find(&ParsedRequest::new(Method::GET, "/status")).unwrap();
    assert_eq!(record.describe(), "StatusController.status");
}

#[test]
fn test_operation_without_name_is_rejected() {
    let mut registry = MetadataRegistry::new();
    let class = registry.define_class(ClassDef::new("Anonymous")).unwrap();
    registry
        .api(class, HandlerSpec::new().with_operation(Verb::Get, "/x", Operation::new()))
        .unwrap();
    let spec = MetadataResolver::new().resolve(&registry, class).unwrap();

    let mut table = RoutingTable::new();
    let err = table
        .register_controller(&registry.controller_ref(class).unwrap(), &spec)
        .unwrap_err();
    assert!(matches!(err, SpecError::MissingOperationName { ref path, .. } if path == "/x"));
    assert!(table.is_empty());
}

#[test]
fn test_table_is_shareable_across_threads() {
    let mut registry = MetadataRegistry::new();
    let class = greet_controller(&mut registry, "/hello");
    let table = std::sync::Arc::new(table_for(&registry, class));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let table = std::sync::Arc::clone(&table);
            std::thread::spawn(move || table.route(&Method::GET, "/hello").map(|r| r.describe()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("TestController.greet"));
    }
}
