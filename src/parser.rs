use crate::route::{RouteDefinition, RouteManifest};
use anyhow::{bail, Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Loader for route-definition files.
///
/// Files ending in `.json` are read as JSON, everything else as YAML. Routes that do
/// not carry their own `root` inherit the manifest-level `root`.
///
/// # Example
///
/// ```no_run
/// use route_pattern_oapi::parser::DefinitionParser;
/// use std::path::Path;
///
/// let parsed = DefinitionParser::parse_file(Path::new("routes/sys.yaml")).unwrap();
/// println!("Loaded {} routes", parsed.manifest.routes.len());
/// ```
pub struct DefinitionParser;

/// A successfully loaded definition file.
#[derive(Debug)]
pub struct ParsedManifest {
    /// Path to the definition file
    pub path: PathBuf,
    /// Manifest with every route's root resolved
    pub manifest: RouteManifest,
}

impl DefinitionParser {
    /// Loads a single route-definition file.
    ///
    /// An empty file yields an empty manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The content is not a valid manifest
    /// - A route has no root and the manifest sets no default
    pub fn parse_file(path: &Path) -> Result<ParsedManifest> {
        debug!("Loading definition file: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let manifest = Self::parse_str(&content, Self::is_json(path))
            .with_context(|| format!("Failed to parse route definitions in file: {}", path.display()))?;

        debug!(
            "Loaded {} routes from {}",
            manifest.routes.len(),
            path.display()
        );

        Ok(ParsedManifest {
            path: path.to_path_buf(),
            manifest,
        })
    }

    /// Parses manifest text and resolves route roots.
    pub fn parse_str(content: &str, json: bool) -> Result<RouteManifest> {
        if content.trim().is_empty() {
            return Ok(RouteManifest::default());
        }

        let mut manifest: RouteManifest = if json {
            serde_json::from_str(content)?
        } else {
            serde_yaml::from_str(content)?
        };

        let default_root = manifest.root.clone();
        for route in &mut manifest.routes {
            Self::resolve_root(route, default_root.as_deref())?;
        }

        Ok(manifest)
    }

    /// Parses multiple definition files, continuing even if some fail.
    ///
    /// Returns one `Result` per input path, in input order.
    pub fn parse_files(paths: &[PathBuf]) -> Vec<Result<ParsedManifest>> {
        debug!("Loading {} definition files", paths.len());

        let results: Vec<Result<ParsedManifest>> = paths
            .iter()
            .map(|path| match Self::parse_file(path) {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to load {}: {:#}", path.display(), e);
                    Err(e)
                }
            })
            .collect();

        let success_count = results.iter().filter(|r| r.is_ok()).count();
        debug!(
            "Loading complete: {} succeeded, {} failed",
            success_count,
            results.len() - success_count
        );

        results
    }

    fn is_json(path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }

    fn resolve_root(route: &mut RouteDefinition, default_root: Option<&str>) -> Result<()> {
        if route.root.is_none() {
            match default_root {
                Some(root) => route.root = Some(root.to_string()),
                None => bail!("Route '{}' has no root and the file sets no default root", route.pattern),
            }
        }
        Ok(())
    }
}
