//! YAML and JSON rendering of assembled OpenAPI documents.

use crate::openapi_builder::OpenApiDocument;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes an OpenAPI document to YAML format.
///
/// Paths and operations keep their assembly order in the output.
///
/// # Example
///
/// ```
/// use route_pattern_oapi::openapi_builder::OpenApiBuilder;
/// use route_pattern_oapi::serializer::serialize_yaml;
///
/// let doc = OpenApiBuilder::new().build();
/// let yaml = serialize_yaml(&doc).unwrap();
/// assert!(yaml.contains("openapi:"));
/// ```
pub fn serialize_yaml(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to YAML");
    serde_yaml::to_string(doc)
        .context("Failed to serialize OpenAPI document to YAML")
}

/// Serializes an OpenAPI document to pretty-printed JSON.
pub fn serialize_json(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to JSON");
    serde_json::to_string_pretty(doc)
        .context("Failed to serialize OpenAPI document to JSON")
}

/// Writes `content` to `path`, creating missing parent directories.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::DocumentAssembler;
    use crate::openapi_builder::{Info, OpenApiBuilder, OpenApiDocument};
    use crate::route::{FieldType, RouteDefinition};
    use indexmap::IndexMap;
    use tempfile::TempDir;

    /// Helper function to create a minimal OpenAPI document for testing
    fn create_test_document() -> OpenApiDocument {
        OpenApiDocument {
            openapi: "3.0.0".to_string(),
            info: Info {
                title: "Test API".to_string(),
                version: "1.0.0".to_string(),
                description: Some("A test API".to_string()),
            },
            paths: IndexMap::new(),
        }
    }

    fn create_route_document() -> OpenApiDocument {
        let routes = vec![
            RouteDefinition::new("sys", "tools/hash(/(?P<urlalgorithm>.+))?")
                .with_operations(["update"])
                .with_field("urlalgorithm", FieldType::String, "Algorithm to use.")
                .with_field("input", FieldType::String, "Base64 input."),
            RouteDefinition::new("sys", "auth/(?P<path>.+?)/tune$")
                .with_operations(["read"]),
        ];

        let mut builder = OpenApiBuilder::new();
        for entry in DocumentAssembler::assemble(&routes).unwrap() {
            builder.add_path(&entry);
        }
        builder.build()
    }

    #[test]
    fn test_serialize_yaml() {
        let yaml = serialize_yaml(&create_test_document()).unwrap();

        assert!(yaml.contains("openapi:"));
        assert!(yaml.contains("3.0.0"));
        assert!(yaml.contains("title: Test API"));
        assert!(yaml.contains("description: A test API"));
        assert!(yaml.contains("paths:"));
    }

    #[test]
    fn test_serialize_json() {
        let json = serialize_json(&create_test_document()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["openapi"], "3.0.0");
        assert_eq!(parsed["info"]["title"], "Test API");
        assert!(parsed["paths"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_serialize_json_pretty_format() {
        let json = serialize_json(&create_test_document()).unwrap();

        assert!(json.contains('\n'));
        assert!(json.lines().count() > 5, "Pretty printed JSON should have multiple lines");
    }

    #[test]
    fn test_serialize_yaml_with_routes() {
        let yaml = serialize_yaml(&create_route_document()).unwrap();

        assert!(yaml.contains("/sys/tools/hash:"));
        assert!(yaml.contains("/sys/tools/hash/{urlalgorithm}"));
        assert!(yaml.contains("/sys/auth/{path}/tune"));
        assert!(yaml.contains("requestBody:"));
        assert!(yaml.contains("in: path"));

        // Paths appear in assembly order.
        let short = yaml.find("/sys/tools/hash:").unwrap();
        let long = yaml.find("/sys/tools/hash/{urlalgorithm}").unwrap();
        let tune = yaml.find("/sys/auth/{path}/tune").unwrap();
        assert!(short < long && long < tune);
    }

    #[test]
    fn test_serialize_json_with_routes() {
        let json = serialize_json(&create_route_document()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let post = &parsed["paths"]["/sys/tools/hash/{urlalgorithm}"]["post"];
        assert_eq!(post["parameters"][0]["name"], "urlalgorithm");
        assert_eq!(post["parameters"][0]["in"], "path");
        let props = &post["requestBody"]["content"]["application/json"]["schema"]["properties"];
        assert_eq!(props["input"]["type"], "string");
        assert!(props.get("urlalgorithm").is_none());

        let get = &parsed["paths"]["/sys/auth/{path}/tune"]["get"];
        assert!(get.get("requestBody").is_none());
        assert_eq!(get["parameters"][0]["schema"]["type"], "string");
    }

    #[test]
    fn test_roundtrip_yaml_serialization() {
        let doc = create_route_document();
        let yaml = serialize_yaml(&doc).unwrap();

        let deserialized: OpenApiDocument = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(deserialized.openapi, doc.openapi);
        assert_eq!(deserialized.info.title, doc.info.title);
        let paths: Vec<_> = deserialized.paths.keys().collect();
        let expected: Vec<_> = doc.paths.keys().collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn test_write_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.yaml");

        write_to_file("test content", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "test content");
    }

    #[test]
    fn test_write_to_file_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("subdir").join("nested").join("test.yaml");

        write_to_file("test content", &file_path).unwrap();

        assert!(file_path.exists());
    }

    #[test]
    fn test_write_to_file_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.yaml");

        write_to_file("initial content", &file_path).unwrap();
        write_to_file("new content", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new content");
    }
}
