use anyhow::{bail, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions recognised as route-definition files
pub const DEFINITION_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// File scanner for locating route-definition files.
///
/// The `FileScanner` accepts either a single definition file or a directory. Directories
/// are walked recursively for `.yaml`, `.yml` and `.json` files, skipping `target` and
/// hidden directories (those starting with `.`).
///
/// # Example
///
/// ```no_run
/// use route_pattern_oapi::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./routes"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} definition files", result.definition_files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
}

/// Result of a scan.
pub struct ScanResult {
    /// Definition files, sorted by path so generation order is reproducible
    pub definition_files: Vec<PathBuf>,
    /// Warning messages for any issues encountered (e.g., inaccessible directories)
    pub warnings: Vec<String>,
}

impl FileScanner {
    /// Creates a new `FileScanner` for a definition file or directory.
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Whether `path` has a route-definition extension
    pub fn is_definition_file(path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| DEFINITION_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Collects route-definition files.
    ///
    /// A root that is itself a file is returned as the only result, whatever its
    /// extension. Inaccessible entries inside a directory are recorded as warnings and
    /// scanning continues.
    ///
    /// # Errors
    ///
    /// Returns an error if the root path does not exist.
    pub fn scan(&self) -> Result<ScanResult> {
        if !self.root_path.exists() {
            bail!("Input path does not exist: {}", self.root_path.display());
        }

        if self.root_path.is_file() {
            debug!("Input is a single file: {}", self.root_path.display());
            return Ok(ScanResult {
                definition_files: vec![self.root_path.clone()],
                warnings: Vec::new(),
            });
        }

        let mut definition_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .into_iter()
            .filter_entry(|e| {
                // Don't filter the root directory itself
                if e.path() == self.root_path {
                    return true;
                }

                let file_name = e.file_name().to_string_lossy();
                let is_hidden = file_name.starts_with('.');
                let is_target = file_name == "target";

                !is_hidden && !is_target
            })
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && Self::is_definition_file(path) {
                        definition_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        definition_files.sort();
        debug!(
            "Found {} definition files under {}",
            definition_files.len(),
            self.root_path.display()
        );

        Ok(ScanResult {
            definition_files,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn file_names(result: &ScanResult) -> Vec<String> {
        result
            .definition_files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_scan_finds_definition_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("sys.yaml"), "routes: []").unwrap();
        fs::write(root.join("auth.json"), "{}").unwrap();
        fs::write(root.join("identity.yml"), "routes: []").unwrap();
        fs::write(root.join("readme.md"), "# README").unwrap();

        let result = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(file_names(&result), vec!["auth.json", "identity.yml", "sys.yaml"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("routes.txt");
        fs::write(&file, "routes: []").unwrap();

        let result = FileScanner::new(file.clone()).scan().unwrap();
        assert_eq!(result.definition_files, vec![file]);
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let result = FileScanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert!(result.definition_files.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("backends/secret")).unwrap();
        fs::write(root.join("sys.yaml"), "").unwrap();
        fs::write(root.join("backends/secret/kv.yaml"), "").unwrap();

        let result = FileScanner::new(root.to_path_buf()).scan().unwrap();
        assert_eq!(result.definition_files.len(), 2);
    }

    #[test]
    fn test_scan_skips_target_and_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("target")).unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join("target/out.json"), "{}").unwrap();
        fs::write(root.join(".git/config.yaml"), "").unwrap();
        fs::write(root.join("sys.yaml"), "").unwrap();

        let result = FileScanner::new(root.to_path_buf()).scan().unwrap();
        assert_eq!(file_names(&result), vec!["sys.yaml"]);
    }

    #[test]
    fn test_scan_missing_path() {
        let result = FileScanner::new(PathBuf::from("/nonexistent/routes")).scan();
        assert!(result.is_err());
    }

    #[test]
    fn test_is_definition_file() {
        assert!(FileScanner::is_definition_file(Path::new("a.yaml")));
        assert!(FileScanner::is_definition_file(Path::new("a.YML")));
        assert!(FileScanner::is_definition_file(Path::new("a.json")));
        assert!(!FileScanner::is_definition_file(Path::new("a.rs")));
        assert!(!FileScanner::is_definition_file(Path::new("Makefile")));
    }
}
