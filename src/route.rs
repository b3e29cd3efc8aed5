//! Route data model shared by the expander, classifier and assembler.
//!
//! Route definitions arrive from an external introspection source (in this crate, the
//! route-definition files loaded by [`crate::parser`]). Each definition names a mount
//! root, a regex-flavoured path pattern, the operation kinds it supports and the fields
//! it accepts.
//!
//! # Example
//!
//! ```
//! use route_pattern_oapi::route::{OperationKind, RoutePattern, Verb};
//!
//! let pattern = RoutePattern::new("sys", "tools/hash(/(?P<urlalgorithm>.+))?");
//! assert_eq!(pattern.root, "sys");
//!
//! let kind: OperationKind = "update".parse().unwrap();
//! assert_eq!(kind.verb(), Some(Verb::Post));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A raw pattern string mounted under a root prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    /// The mount prefix (e.g. a logical backend name such as `sys`)
    pub root: String,
    /// The pattern body in the restricted dialect
    pub raw: String,
}

impl RoutePattern {
    /// Create a new RoutePattern
    pub fn new(root: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            raw: raw.into(),
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.root, self.raw)
    }
}

/// The abstract action a route supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Read,
    Update,
    Delete,
    /// Listing is never documented as its own verb
    List,
}

impl OperationKind {
    /// Map the operation kind to the verb it is documented under.
    ///
    /// Returns `None` for [`OperationKind::List`], which never produces an operation.
    pub fn verb(self) -> Option<Verb> {
        match self {
            OperationKind::Read => Some(Verb::Get),
            OperationKind::Update => Some(Verb::Post),
            OperationKind::Delete => Some(Verb::Delete),
            OperationKind::List => None,
        }
    }
}

/// Error returned when an operation kind string is outside the known set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperationKind(pub String);

impl FromStr for OperationKind {
    type Err = UnknownOperationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(OperationKind::Read),
            "update" => Ok(OperationKind::Update),
            "delete" => Ok(OperationKind::Delete),
            "list" => Ok(OperationKind::List),
            other => Err(UnknownOperationKind(other.to_string())),
        }
    }
}

/// HTTP verbs emitted in the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    /// Lowercase verb name as used for OpenAPI path item keys
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Delete => "delete",
        }
    }

    /// Whether operations with this verb carry a request body
    pub fn has_body(self) -> bool {
        matches!(self, Verb::Post)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic type of a route field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    String,
    NameString,
    LowerCaseString,
    Int,
    DurationSecond,
    Bool,
    Map,
    KvPairs,
    Header,
    Slice,
    StringSlice,
    CommaStringSlice,
    CommaIntSlice,
}

/// The small type taxonomy used in the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    String,
    Number,
    Boolean,
    Object,
}

impl OutputType {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputType::String => "string",
            OutputType::Number => "number",
            OutputType::Boolean => "boolean",
            OutputType::Object => "object",
        }
    }
}

/// Metadata for a single named field on a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name, unique within a route
    pub name: String,
    /// Semantic type as declared by the route
    pub field_type: FieldType,
    /// Free-text description
    pub description: String,
}

impl FieldDescriptor {
    /// Create a new FieldDescriptor
    pub fn new(name: impl Into<String>, field_type: FieldType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            description: description.into(),
        }
    }

    /// Descriptor used for a captured parameter that has no declared field
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, String::new())
    }
}

/// Field declaration as it appears in a route-definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub description: String,
}

/// A single route as supplied by the route-definition source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Mount prefix; falls back to the manifest root when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Pattern body in the restricted dialect
    pub pattern: String,
    /// One-line help text used as the operation summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    /// Operation kinds, kept as written so unknown kinds surface at assembly
    #[serde(default)]
    pub operations: Vec<String>,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,
}

impl RouteDefinition {
    /// Create a new RouteDefinition with no operations or fields
    pub fn new(root: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            root: Some(root.into()),
            pattern: pattern.into(),
            synopsis: None,
            operations: Vec::new(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style helper to add operation kinds
    pub fn with_operations<I, S>(mut self, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operations.extend(operations.into_iter().map(Into::into));
        self
    }

    /// Builder-style helper to declare a field
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType, description: impl Into<String>) -> Self {
        self.fields.insert(
            name.into(),
            FieldSpec {
                field_type,
                description: description.into(),
            },
        );
        self
    }

    /// Builder-style helper to set the synopsis
    pub fn with_synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis = Some(synopsis.into());
        self
    }

    /// The route's pattern under its effective root, if it has one
    pub fn route_pattern(&self) -> Option<RoutePattern> {
        self.root
            .as_ref()
            .map(|root| RoutePattern::new(root.clone(), self.pattern.clone()))
    }

    /// Field descriptors in declaration order
    pub fn field_descriptors(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .map(|(name, spec)| FieldDescriptor::new(name.clone(), spec.field_type, spec.description.clone()))
            .collect()
    }
}

/// Contents of one route-definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Default root for routes that do not set their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
}
