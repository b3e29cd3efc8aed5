use crate::assembler::{OperationEntry, PathEntry};
use crate::classifier::ClassifiedField;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

pub const OPENAPI_VERSION: &str = "3.0.0";
pub const DEFAULT_TITLE: &str = "Generated API";
pub const DEFAULT_VERSION: &str = "1.0.0";

/// OpenAPI document builder
pub struct OpenApiBuilder {
    /// OpenAPI info section
    info: Info,
    /// Paths collection (URL path -> PathItem), in insertion order
    paths: IndexMap<String, PathItem>,
}

/// OpenAPI Info object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API version
    pub version: String,
    /// API description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OpenAPI PathItem object - all operations for a single path keyed by verb
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(flatten)]
    pub operations: IndexMap<String, Operation>,
}

/// OpenAPI Operation object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Operation summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Path parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    /// Request body
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses
    pub responses: IndexMap<String, Response>,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter location, always `path` here
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter is required
    pub required: bool,
    /// Parameter description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter schema
    pub schema: Schema,
}

/// OpenAPI Schema object, limited to what route fields need
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties for object schemas, in field declaration order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
}

/// OpenAPI RequestBody object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Whether the request body is required
    pub required: bool,
    /// Content types and their schemas
    pub content: IndexMap<String, MediaType>,
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type
    pub schema: Schema,
}

/// OpenAPI Response object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Response description
    pub description: String,
}

/// Complete OpenAPI document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version
    pub openapi: String,
    /// API info
    pub info: Info,
    /// API paths
    pub paths: IndexMap<String, PathItem>,
}

impl OpenApiBuilder {
    /// Create a new OpenApiBuilder with default info
    pub fn new() -> Self {
        debug!("Initializing OpenApiBuilder");
        Self {
            info: Info {
                title: DEFAULT_TITLE.to_string(),
                version: DEFAULT_VERSION.to_string(),
                description: Some("API documentation generated from route patterns".to_string()),
            },
            paths: IndexMap::new(),
        }
    }

    /// Set custom info for the API
    pub fn with_info(mut self, title: String, version: String, description: Option<String>) -> Self {
        self.info = Info {
            title,
            version,
            description,
        };
        self
    }

    /// Add every operation of an assembled path
    pub fn add_path(&mut self, entry: &PathEntry) {
        debug!("Adding path: {} ({} operations)", entry.path, entry.operations.len());

        let path_item = self.paths.entry(entry.path.clone()).or_default();
        for op in &entry.operations {
            path_item
                .operations
                .insert(op.verb.as_str().to_string(), Self::operation(op));
        }
    }

    fn operation(entry: &OperationEntry) -> Operation {
        let parameters = if entry.path_parameters.is_empty() {
            None
        } else {
            Some(entry.path_parameters.iter().map(Self::parameter).collect())
        };

        let request_body = if entry.body_properties.is_empty() {
            None
        } else {
            let properties = entry
                .body_properties
                .iter()
                .map(|field| (field.name.clone(), Self::field_schema(field)))
                .collect();
            let schema = Schema {
                schema_type: Some("object".to_string()),
                description: None,
                properties: Some(properties),
            };

            let mut content = IndexMap::new();
            content.insert("application/json".to_string(), MediaType { schema });
            Some(RequestBody {
                required: true,
                content,
            })
        };

        let mut responses = IndexMap::new();
        responses.insert(
            "200".to_string(),
            Response {
                description: "Successful response".to_string(),
            },
        );

        Operation {
            summary: entry.summary.clone(),
            parameters,
            request_body,
            responses,
        }
    }

    fn parameter(field: &ClassifiedField) -> Parameter {
        Parameter {
            name: field.name.clone(),
            location: "path".to_string(),
            required: true,
            description: non_empty(&field.description),
            schema: Schema {
                schema_type: Some(field.output_type.as_str().to_string()),
                description: None,
                properties: None,
            },
        }
    }

    fn field_schema(field: &ClassifiedField) -> Schema {
        Schema {
            schema_type: Some(field.output_type.as_str().to_string()),
            description: non_empty(&field.description),
            properties: None,
        }
    }

    /// Build the final OpenAPI document
    pub fn build(self) -> OpenApiDocument {
        debug!("Building final OpenAPI document with {} paths", self.paths.len());

        OpenApiDocument {
            openapi: OPENAPI_VERSION.to_string(),
            info: self.info,
            paths: self.paths,
        }
    }
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
