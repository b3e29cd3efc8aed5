//! Document assembly: one operation entry per expanded path and documented verb.
//!
//! Routes are processed in the order they are supplied. Each route's pattern is expanded
//! once, and every expanded path receives an operation for every documented operation
//! kind on the route. Entries are grouped by path in discovery order.

use crate::classifier::{normalize_description, ClassifiedField, FieldClassifier};
use crate::error::{Error, Result};
use crate::expander::PatternExpander;
use crate::route::{OperationKind, RouteDefinition, RoutePattern, Verb};
use indexmap::IndexMap;
use log::{debug, warn};

/// One documented operation on one concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationEntry {
    pub path: String,
    pub verb: Verb,
    /// Normalised route synopsis
    pub summary: Option<String>,
    pub path_parameters: Vec<ClassifiedField>,
    /// Only populated for `post`
    pub body_properties: Vec<ClassifiedField>,
}

/// All operations discovered for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub path: String,
    /// In the order the operations were discovered
    pub operations: Vec<OperationEntry>,
}

impl PathEntry {
    /// The operation documented under `verb`, if any
    pub fn operation(&self, verb: Verb) -> Option<&OperationEntry> {
        self.operations.iter().find(|op| op.verb == verb)
    }
}

pub struct DocumentAssembler;

impl DocumentAssembler {
    /// Assembles route definitions into path entries.
    ///
    /// # Errors
    ///
    /// Fails the whole run when a route has no root, names an operation kind outside
    /// `read`, `update`, `delete` and `list`, or carries a malformed pattern.
    pub fn assemble(routes: &[RouteDefinition]) -> Result<Vec<PathEntry>> {
        debug!("Assembling {} route(s)", routes.len());
        let mut grouped: IndexMap<String, PathEntry> = IndexMap::new();

        for route in routes {
            let pattern = route.route_pattern().ok_or_else(|| {
                Error::InvalidArgument(format!("route '{}' has no root", route.pattern))
            })?;

            let verbs = Self::verbs(&pattern, &route.operations)?;
            let paths = PatternExpander::expand_route(&pattern)?;
            if verbs.is_empty() {
                debug!("Skipping {}: no documented operations", pattern);
                continue;
            }

            let fields = route.field_descriptors();
            let summary = route
                .synopsis
                .as_deref()
                .map(normalize_description)
                .filter(|s| !s.is_empty());

            for expanded in paths {
                let entry = grouped
                    .entry(expanded.template.clone())
                    .or_insert_with(|| PathEntry {
                        path: expanded.template.clone(),
                        operations: Vec::new(),
                    });

                for &verb in &verbs {
                    if entry.operation(verb).is_some() {
                        warn!(
                            "Duplicate {} operation for {} from {}, keeping the first",
                            verb, expanded.template, pattern
                        );
                        continue;
                    }

                    let classified = FieldClassifier::classify(&expanded.params, &fields, verb);
                    debug!("Adding {} {}", verb, expanded.template);
                    entry.operations.push(OperationEntry {
                        path: expanded.template.clone(),
                        verb,
                        summary: summary.clone(),
                        path_parameters: classified.path_parameters,
                        body_properties: classified.body_properties,
                    });
                }
            }
        }

        Ok(grouped.into_values().collect())
    }

    /// Maps operation kinds to verbs in source order, skipping `list` and repeats.
    fn verbs(pattern: &RoutePattern, operations: &[String]) -> Result<Vec<Verb>> {
        let mut verbs = Vec::new();
        for op in operations {
            let kind: OperationKind = op.parse().map_err(|_| Error::UnknownOperation {
                root: pattern.root.clone(),
                pattern: pattern.raw.clone(),
                kind: op.clone(),
            })?;
            if let Some(verb) = kind.verb() {
                if !verbs.contains(&verb) {
                    verbs.push(verb);
                }
            }
        }
        Ok(verbs)
    }
}
