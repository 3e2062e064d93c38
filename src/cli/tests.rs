//! Unit tests for CLI commands

use crate::cli::{build_application, match_lines, route_lines, Cli, Commands};
use crate::config::ApplicationConfig;
use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;

const NOTES_SPEC: &str = r#"
basePath: /notes
paths:
  /:
    get:
      x-operation-name: list
      parameters:
        - name: limit
          in: query
      responses: {}
  /{id}:
    get:
      operationId: findById
      parameters:
        - name: id
          in: path
          required: true
        - name: x-tenant
          in: header
      responses: {}
"#;

fn spec_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(NOTES_SPEC.as_bytes()).unwrap();
    file
}

#[test]
fn test_match_command_parses() {
    let cli = Cli::try_parse_from([
        "ctrlrouter",
        "match",
        "--spec",
        "notes.yaml",
        "--url",
        "/notes/1",
        "--verbose",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Commands::Match {
            spec,
            controller,
            method,
            url,
        } => {
            assert_eq!(spec.to_string_lossy(), "notes.yaml");
            assert_eq!(controller, "Controller");
            assert_eq!(method, "GET");
            assert_eq!(url, "/notes/1");
        }
        Commands::Routes { .. } => panic!("Expected Match command"),
    }
}

#[test]
fn test_routes_requires_spec() {
    assert!(Cli::try_parse_from(["ctrlrouter", "routes"]).is_err());
}

#[test]
fn test_route_lines() {
    let file = spec_file();
    let app = build_application(ApplicationConfig::default(), file.path(), "NoteController").unwrap();

    assert_eq!(
        route_lines(app.routes()),
        vec![
            "GET     /notes -> NoteController.list".to_string(),
            "GET     /notes/{id} -> NoteController.findById".to_string(),
        ]
    );
}

#[test]
fn test_route_lines_with_configured_base_path() {
    let file = spec_file();
    let mut config = ApplicationConfig::default();
    config.rest.base_path = Some("/api/".to_string());
    let app = build_application(config, file.path(), "NoteController").unwrap();

    assert_eq!(app.routes().routes()[1].path.as_ref(), "/api/notes/{id}");
}

#[test]
fn test_match_lines() {
    let file = spec_file();
    let app = build_application(ApplicationConfig::default(), file.path(), "NoteController").unwrap();

    let lines = match_lines(app.routes(), "get", "/notes/7?limit=3").unwrap().unwrap();
    assert_eq!(
        lines,
        vec![
            "GET /notes/{id} -> NoteController.findById".to_string(),
            "  path id = 7".to_string(),
        ]
    );

    let list = match_lines(app.routes(), "GET", "/notes?limit=3").unwrap().unwrap();
    assert_eq!(list[1], "  query limit = 3");

    assert!(match_lines(app.routes(), "DELETE", "/notes/7").unwrap().is_none());
    assert!(match_lines(app.routes(), "BAD METHOD", "/notes").is_err());
}

#[test]
fn test_build_application_reports_missing_file() {
    let err = build_application(
        ApplicationConfig::default(),
        std::path::Path::new("/nonexistent/spec.yaml"),
        "C",
    )
    .err()
    .unwrap();
    assert!(format!("{err:#}").contains("failed to read spec"));
}
