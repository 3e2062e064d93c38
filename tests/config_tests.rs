mod common;

use common::temp_file;
use ctrlrouter::config::{ApplicationConfig, RestConfig};
use ctrlrouter::logging::LogFormat;
use std::collections::HashMap;

#[test]
fn test_load_yaml() {
    let file = temp_file(
        "rest:\n  base_path: /api\n  dump_routes_on_start: true\nlog:\n  level: debug\n  format: pretty\n",
        "yaml",
    );
    let config = ApplicationConfig::load(file.path()).unwrap();

    assert_eq!(config.rest.base_path.as_deref(), Some("/api"));
    assert!(config.rest.dump_routes_on_start);
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.log.format, LogFormat::Pretty);
    assert!(!config.log.include_location);
}

#[test]
fn test_load_toml() {
    let file = temp_file(
        "[rest]\nbase_path = \"/v2\"\n\n[log]\ntarget_filter = \"ctrlrouter::router=debug\"\n",
        "toml",
    );
    let config = ApplicationConfig::load(file.path()).unwrap();

    assert_eq!(config.rest.base_path.as_deref(), Some("/v2"));
    assert!(!config.rest.dump_routes_on_start);
    assert_eq!(config.log.level, "info");
    assert_eq!(config.log.target_filter.as_deref(), Some("ctrlrouter::router=debug"));
}

#[test]
fn test_load_json() {
    let file = temp_file(r#"{"log": {"format": "json", "include_location": true}}"#, "json");
    let config = ApplicationConfig::load(file.path()).unwrap();

    assert_eq!(config.rest, RestConfig::default());
    assert_eq!(config.log.format, LogFormat::Json);
    assert!(config.log.include_location);
}

#[test]
fn test_empty_yaml_mapping_gives_defaults() {
    let file = temp_file("{}\n", "yml");
    assert_eq!(
        ApplicationConfig::load(file.path()).unwrap(),
        ApplicationConfig::default()
    );
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let file = temp_file("base_path=/api", "ini");
    let err = ApplicationConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("Unsupported config format 'ini'"));
}

#[test]
fn test_invalid_content_is_reported() {
    let file = temp_file("rest: [unclosed", "yaml");
    let err = ApplicationConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().starts_with("Invalid YAML config"));
}

#[test]
fn test_missing_file_is_reported() {
    let err = ApplicationConfig::load(std::path::Path::new("/nonexistent/ctrlr.yaml")).unwrap_err();
    assert!(err.to_string().starts_with("Failed to read config file"));
}

#[test]
fn test_overrides_win_over_file_values() {
    let file = temp_file("rest:\n  base_path: /api\nlog:\n  level: warn\n", "yaml");
    let mut config = ApplicationConfig::load(file.path()).unwrap();

    let env: HashMap<&str, &str> = HashMap::from([
        ("CTRLR_BASE_PATH", "/override"),
        ("CTRLR_DUMP_ROUTES", "true"),
        ("CTRLR_LOG_LEVEL", "trace"),
        ("CTRLR_LOG_FORMAT", "PRETTY"),
        ("CTRLR_LOG_INCLUDE_LOCATION", "not-a-bool"),
    ]);
    config.apply_overrides(|key| env.get(key).map(|v| (*v).to_string()));

    assert_eq!(config.rest.base_path.as_deref(), Some("/override"));
    assert!(config.rest.dump_routes_on_start);
    assert_eq!(config.log.level, "trace");
    assert_eq!(config.log.format, LogFormat::Pretty);
    assert!(!config.log.include_location);
}
