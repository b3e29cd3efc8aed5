//! Field classification: splits a route's fields into path parameters and body properties.
//!
//! A field whose name is bound by a `{name}` placeholder in the expanded path becomes a
//! path parameter. Every other field is a body property, documented only for verbs that
//! carry a request body.

use crate::route::{FieldDescriptor, FieldType, OutputType, Verb};
use indexmap::IndexSet;
use log::debug;

/// Marker appended to descriptions truncated at a line break
pub const ELLIPSIS: &str = "…";

/// A field ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedField {
    pub name: String,
    /// Semantic type as declared
    pub field_type: FieldType,
    /// Type in the output taxonomy
    pub output_type: OutputType,
    /// Single-line description
    pub description: String,
}

impl ClassifiedField {
    fn from_descriptor(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name.clone(),
            field_type: field.field_type,
            output_type: FieldClassifier::output_type(field.field_type),
            description: normalize_description(&field.description),
        }
    }
}

/// Result of classifying a route's fields for one path and verb.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedFields {
    /// In placeholder order
    pub path_parameters: Vec<ClassifiedField>,
    /// In field declaration order; empty unless the verb carries a body
    pub body_properties: Vec<ClassifiedField>,
}

pub struct FieldClassifier;

impl FieldClassifier {
    /// Partitions `fields` against the parameter names of one expanded path.
    ///
    /// A parameter with no matching field is still emitted as a `string` with an
    /// empty description.
    pub fn classify(params: &IndexSet<String>, fields: &[FieldDescriptor], verb: Verb) -> ClassifiedFields {
        let path_parameters = params
            .iter()
            .map(|name| match fields.iter().find(|f| &f.name == name) {
                Some(field) => ClassifiedField::from_descriptor(field),
                None => {
                    debug!("No field metadata for path parameter '{}'", name);
                    ClassifiedField::from_descriptor(&FieldDescriptor::placeholder(name.clone()))
                }
            })
            .collect();

        let body_properties = if verb.has_body() {
            fields
                .iter()
                .filter(|f| !params.contains(&f.name))
                .map(ClassifiedField::from_descriptor)
                .collect()
        } else {
            Vec::new()
        };

        ClassifiedFields {
            path_parameters,
            body_properties,
        }
    }

    /// Maps a semantic field type onto the output taxonomy.
    ///
    /// Sequence types collapse to `string`; element types are not modelled.
    pub fn output_type(field_type: FieldType) -> OutputType {
        match field_type {
            FieldType::String | FieldType::NameString | FieldType::LowerCaseString => OutputType::String,
            FieldType::Int | FieldType::DurationSecond => OutputType::Number,
            FieldType::Bool => OutputType::Boolean,
            FieldType::Map | FieldType::KvPairs | FieldType::Header => OutputType::Object,
            FieldType::Slice
            | FieldType::StringSlice
            | FieldType::CommaStringSlice
            | FieldType::CommaIntSlice => OutputType::String,
        }
    }
}

/// Trims `text` and cuts it at the first line break, appending [`ELLIPSIS`].
pub fn normalize_description(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.find(|c| c == '\n' || c == '\r') {
        Some(idx) => format!("{}{}", trimmed[..idx].trim_end(), ELLIPSIS),
        None => trimmed.to_string(),
    }
}
