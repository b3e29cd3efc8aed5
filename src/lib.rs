//! Route Pattern OpenAPI Generator - OpenAPI documentation from regex-style route patterns.
//!
//! Routes are described by a mount root, a pattern in a restricted regex dialect
//! (literals, `(?P<name>...)` captures and up to two `(...)?` optional groups), the
//! operation kinds they support and their fields. Each pattern is expanded into every
//! concrete path it can match, fields are split into path parameters and body
//! properties, and the result is assembled into an OpenAPI document.
//!
//! # Architecture
//!
//! 1. [`scanner`] - Locates route-definition files
//! 2. [`parser`] - Loads route-definition files into [`route::RouteManifest`]s
//! 3. [`expander`] - Expands one pattern into concrete path templates
//! 4. [`classifier`] - Partitions fields and maps their types
//! 5. [`assembler`] - Produces one operation entry per path and verb
//! 6. [`openapi_builder`] - Constructs the OpenAPI document
//! 7. [`serializer`] - Serializes the document to YAML or JSON
//!
//! # Example Usage
//!
//! ```
//! use route_pattern_oapi::{
//!     assembler::DocumentAssembler,
//!     openapi_builder::OpenApiBuilder,
//!     route::{FieldType, RouteDefinition},
//!     serializer::serialize_yaml,
//! };
//!
//! let routes = vec![
//!     RouteDefinition::new("sys", "tools/hash(/(?P<urlalgorithm>.+))?")
//!         .with_operations(["update"])
//!         .with_field("input", FieldType::String, "Base64 input"),
//! ];
//!
//! let mut builder = OpenApiBuilder::new();
//! for entry in DocumentAssembler::assemble(&routes).unwrap() {
//!     builder.add_path(&entry);
//! }
//! let yaml = serialize_yaml(&builder.build()).unwrap();
//! assert!(yaml.contains("/sys/tools/hash"));
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod scanner;
pub mod parser;
pub mod route;
pub mod expander;
pub mod classifier;
pub mod assembler;
pub mod openapi_builder;
pub mod serializer;
pub mod error;
