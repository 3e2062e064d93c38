use super::*;
use crate::metadata::ClassDef;
use crate::schema::{SemanticKind, TypeDescriptor};
use crate::spec::{Operation, Parameter, SchemaFragment, Verb};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_empty_class_resolves_to_empty_spec() {
    let mut registry = MetadataRegistry::new();
    let class = registry.define_class(ClassDef::new("Empty")).unwrap();
    let spec = MetadataResolver::new().resolve(&registry, class).unwrap();
    assert_eq!(*spec, HandlerSpec::default());
}

#[test]
fn test_base_path_and_path_keys_are_normalized() {
    let mut registry = MetadataRegistry::new();
    let class = registry.define_class(ClassDef::new("C").method("list", [])).unwrap();
    registry
        .api(
            class,
            HandlerSpec::new()
                .with_base_path("api//v1/")
                .with_operation(Verb::Get, "status/", Operation::new().operation_id("status")),
        )
        .unwrap();
    registry.get(class, "list", "//items/", None).unwrap();

    let spec = MetadataResolver::new().resolve(&registry, class).unwrap();
    assert_eq!(spec.base_path.as_deref(), Some("/api/v1"));
    let keys: Vec<_> = spec.paths.keys().map(String::as_str).collect();
    assert_eq!(keys, ["/status", "/items"]);
}

#[test]
fn test_operation_defaults_and_name_tag() {
    let mut registry = MetadataRegistry::new();
    let class = registry.define_class(ClassDef::new("C").method("ping", [])).unwrap();
    registry.get(class, "ping", "/ping", None).unwrap();

    let spec = MetadataResolver::new().resolve(&registry, class).unwrap();
    let op = spec.operation("/ping", Verb::Get).unwrap();
    assert!(op.responses.is_empty());
    assert!(op.parameters.is_none());
    assert_eq!(op.operation_name.as_deref(), Some("ping"));
    assert_eq!(
        serde_json::to_value(op).unwrap(),
        json!({"responses": {}, "x-operation-name": "ping"})
    );
}

#[test]
fn test_registry_originals_stay_untouched() {
    let mut registry = MetadataRegistry::new();
    let class = registry.define_class(ClassDef::new("C").method("ping", [])).unwrap();
    registry
        .get(class, "ping", "/ping", Some(Operation::new().operation_id("pingOp")))
        .unwrap();

    MetadataResolver::new().resolve(&registry, class).unwrap();
    let endpoints = registry.all_endpoints(class).unwrap();
    assert!(endpoints["ping"].spec.as_ref().unwrap().operation_name.is_none());
}

#[test]
fn test_method_level_parameters_are_used() {
    let mut registry = MetadataRegistry::new();
    let class = registry
        .define_class(ClassDef::new("C").method("list", []))
        .unwrap();
    registry.get(class, "list", "/items", None).unwrap();
    registry.method_param(class, "list", Parameter::query("limit")).unwrap();

    let spec = MetadataResolver::new().resolve(&registry, class).unwrap();
    let params = spec.operation("/items", Verb::Get).unwrap().parameters();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, "limit");
}

#[test]
fn test_large_parameter_index_resolves() {
    let mut registry = MetadataRegistry::new();
    let class = registry.define_class(ClassDef::new("C").method("m", [])).unwrap();
    registry.get(class, "m", "/m", None).unwrap();
    registry.param(class, "m", usize::MAX, Parameter::query("q")).unwrap();

    let spec = MetadataResolver::new().resolve(&registry, class).unwrap();
    let params = spec.operation("/m", Verb::Get).unwrap().parameters();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, "q");
}

#[test]
fn test_mixed_parameter_declarations_are_rejected() {
    let mut registry = MetadataRegistry::new();
    let class = registry
        .define_class(ClassDef::new("C").method("list", [TypeDescriptor::number()]))
        .unwrap();
    registry.get(class, "list", "/items", None).unwrap();
    registry.method_param(class, "list", Parameter::query("limit")).unwrap();
    registry.param(class, "list", 0, Parameter::query("offset")).unwrap();

    let err = MetadataResolver::new().resolve(&registry, class).unwrap_err();
    assert_eq!(
        err,
        SpecError::MixedParameterDeclarations {
            class: "C".to_string(),
            method: "list".to_string(),
        }
    );
}

#[test]
fn test_only_first_complex_parameter_is_harvested() {
    let mut registry = MetadataRegistry::new();
    let class = registry
        .define_class(ClassDef::new("C").method(
            "create",
            [
                TypeDescriptor::string(),
                TypeDescriptor::named("Note", || json!({"type": "object", "properties": {"title": {"type": "string"}}})),
                TypeDescriptor::named("Tag", || json!({"type": "object"})),
            ],
        ))
        .unwrap();
    registry.post(class, "create", "/notes", None).unwrap();

    let spec = MetadataResolver::new().resolve(&registry, class).unwrap();
    let schemas = &spec.components.as_ref().unwrap().schemas;
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas["Note"].properties.as_ref().unwrap()["title"], SchemaFragment::of_type("string"));
}

#[test]
fn test_semantic_parameter_stops_harvest() {
    let generated = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&generated);
    let mut registry = MetadataRegistry::new();
    let class = registry
        .define_class(ClassDef::new("C").method(
            "create",
            [
                TypeDescriptor::semantic(SemanticKind::Integer),
                TypeDescriptor::named("Note", move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    json!({"type": "object"})
                }),
            ],
        ))
        .unwrap();
    registry.post(class, "create", "/notes", None).unwrap();

    let spec = MetadataResolver::new().resolve(&registry, class).unwrap();
    let schemas = &spec.components.as_ref().unwrap().schemas;
    assert_eq!(schemas.keys().collect::<Vec<_>>(), vec!["Integer"]);
    assert_eq!(schemas["Integer"], SchemaFragment::default());
    assert!(spec.schema("Note").is_none());
    assert_eq!(generated.load(Ordering::SeqCst), 0);
}

#[test]
fn test_generator_errors_fail_resolution() {
    let mut registry = MetadataRegistry::new();
    let class = registry
        .define_class(ClassDef::new("C").method(
            "create",
            [TypeDescriptor::named("Broken", || json!({"type": "array"}))],
        ))
        .unwrap();
    registry.post(class, "create", "/x", None).unwrap();

    let mut resolver = MetadataResolver::new();
    assert_eq!(resolver.resolve(&registry, class).unwrap_err(), SpecError::MissingItems);
    assert!(resolver.is_empty());
}

#[test]
fn test_cache_is_per_class_and_resettable() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut registry = MetadataRegistry::new();
    let base = registry
        .define_class(ClassDef::new("Base").method(
            "create",
            [TypeDescriptor::named("Note", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                json!({"type": "object"})
            })],
        ))
        .unwrap();
    registry.post(base, "create", "/notes", None).unwrap();
    let child = registry.define_class(ClassDef::new("Child").extends(base)).unwrap();

    let mut resolver = MetadataResolver::new();
    let first = resolver.resolve(&registry, base).unwrap();
    let second = resolver.resolve(&registry, base).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let inherited = resolver.resolve(&registry, child).unwrap();
    assert!(!Arc::ptr_eq(&first, &inherited));
    assert_eq!(*first, *inherited);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(resolver.len(), 2);
    assert!(resolver.cached(child).is_some());

    resolver.reset();
    assert!(resolver.cached(base).is_none());
    resolver.resolve(&registry, base).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
