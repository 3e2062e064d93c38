use super::types::HandlerSpec;
use anyhow::Context;
use std::path::Path;

/// Load a serialized [`HandlerSpec`] from a YAML (`.yaml`/`.yml`) or JSON file.
pub fn load_handler_spec(file_path: impl AsRef<Path>) -> anyhow::Result<HandlerSpec> {
    let file_path = file_path.as_ref();
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read spec {}", file_path.display()))?;
    parse_handler_spec(&content, is_yaml(file_path))
        .with_context(|| format!("failed to parse spec {}", file_path.display()))
}

/// Parse a [`HandlerSpec`] from a string.
pub fn parse_handler_spec(content: &str, yaml: bool) -> anyhow::Result<HandlerSpec> {
    let spec = if yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    Ok(spec)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
