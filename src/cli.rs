use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Route Pattern OpenAPI Generator - Generate OpenAPI documentation from route pattern definitions
#[derive(Parser, Debug)]
#[command(name = "route-pattern-oapi")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Route-definition file, or a directory of them (.yaml, .yml, .json)
    #[arg(value_name = "INPUT")]
    pub input_path: PathBuf,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Document title (overrides any title in the definition files)
    #[arg(short = 't', long = "title")]
    pub title: Option<String>,

    /// Document version (overrides any version in the definition files)
    #[arg(long = "api-version", value_name = "VERSION")]
    pub api_version: Option<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.input_path.exists() {
        anyhow::bail!("Input path does not exist: {}", args.input_path.display());
    }

    info!("Input path: {}", args.input_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Generate the document text for `args` without writing it anywhere
pub fn generate(args: &CliArgs) -> Result<String> {
    use crate::assembler::DocumentAssembler;
    use crate::openapi_builder::{OpenApiBuilder, DEFAULT_TITLE, DEFAULT_VERSION};
    use crate::parser::DefinitionParser;
    use crate::route::RouteDefinition;
    use crate::scanner::FileScanner;
    use crate::serializer::{serialize_json, serialize_yaml};

    // Step 1: Locate definition files
    info!("Scanning for route definitions...");
    let scanner = FileScanner::new(args.input_path.clone());
    let scan_result = scanner.scan()?;

    info!("Found {} definition files", scan_result.definition_files.len());
    for warning in &scan_result.warnings {
        log::warn!("{}", warning);
    }

    // Step 2: Load definitions; an unreadable file would leave the document incomplete
    info!("Loading route definitions...");
    let mut manifests = Vec::new();
    for result in DefinitionParser::parse_files(&scan_result.definition_files) {
        manifests.push(result?);
    }

    let mut title = args.title.clone();
    let mut version = args.api_version.clone();
    let mut routes: Vec<RouteDefinition> = Vec::new();
    for parsed in manifests {
        debug!(
            "{} contributes {} routes",
            parsed.path.display(),
            parsed.manifest.routes.len()
        );
        title = title.or(parsed.manifest.title);
        version = version.or(parsed.manifest.version);
        routes.extend(parsed.manifest.routes);
    }

    info!("Loaded {} routes", routes.len());
    if routes.is_empty() {
        log::warn!("No routes found in the input");
    }

    // Step 3: Expand patterns and assemble operations
    info!("Expanding route patterns...");
    let entries = DocumentAssembler::assemble(&routes).context("Failed to assemble routes")?;
    let operation_count: usize = entries.iter().map(|e| e.operations.len()).sum();

    // Step 4: Build OpenAPI document
    info!("Building OpenAPI document...");
    let mut builder = OpenApiBuilder::new().with_info(
        title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        None,
    );
    for entry in &entries {
        builder.add_path(entry);
    }
    let document = builder.build();

    // Step 5: Serialize to requested format
    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&document)?,
        OutputFormat::Json => serialize_json(&document)?,
    };

    info!("Summary:");
    info!("  - Definition files: {}", scan_result.definition_files.len());
    info!("  - Routes: {}", routes.len());
    info!("  - Paths: {}", entries.len());
    info!("  - Operations: {}", operation_count);

    Ok(content)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::serializer::write_to_file;

    info!("Starting OpenAPI document generation...");
    let content = generate(&args)?;

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
        info!("Successfully wrote OpenAPI document to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    info!("Generation complete!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args_for(input: PathBuf) -> CliArgs {
        CliArgs::parse_from(["route-pattern-oapi", input.to_str().unwrap()])
    }

    #[test]
    fn test_default_arguments() {
        let args = CliArgs::parse_from(["route-pattern-oapi", "routes"]);

        assert_eq!(args.input_path, PathBuf::from("routes"));
        assert!(matches!(args.output_format, OutputFormat::Yaml));
        assert!(args.output_path.is_none());
        assert!(args.title.is_none());
        assert!(args.api_version.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_all_arguments() {
        let args = CliArgs::parse_from([
            "route-pattern-oapi",
            "routes",
            "-f",
            "json",
            "-o",
            "out/openapi.json",
            "-t",
            "Vault",
            "--api-version",
            "0.9.0",
            "-v",
        ]);

        assert!(matches!(args.output_format, OutputFormat::Json));
        assert_eq!(args.output_path, Some(PathBuf::from("out/openapi.json")));
        assert_eq!(args.title.as_deref(), Some("Vault"));
        assert_eq!(args.api_version.as_deref(), Some("0.9.0"));
        assert!(args.verbose);
    }

    #[test]
    fn test_missing_input_path_is_rejected() {
        let args = args_for(PathBuf::from("/nonexistent/routes"));
        assert!(parse_args_from_parsed(args).is_err());
    }

    #[test]
    fn test_generate_uses_manifest_info() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("sys.yaml");
        fs::write(
            &file,
            "title: Vault\nversion: 0.9.0\nroot: sys\nroutes:\n  - pattern: seal\n    operations: [update]\n",
        )
        .unwrap();

        let yaml = generate(&args_for(file)).unwrap();
        assert!(yaml.contains("title: Vault"));
        assert!(yaml.contains("/sys/seal:"));
    }

    #[test]
    fn test_cli_title_overrides_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("sys.yaml");
        fs::write(&file, "title: Vault\nroot: sys\nroutes: []\n").unwrap();

        let mut args = args_for(file);
        args.title = Some("Override".to_string());

        let yaml = generate(&args).unwrap();
        assert!(yaml.contains("title: Override"));
    }

    #[test]
    fn test_generate_fails_on_unknown_operation() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("sys.yaml");
        fs::write(
            &file,
            "root: sys\nroutes:\n  - pattern: seal\n    operations: [update, patch]\n",
        )
        .unwrap();

        let err = generate(&args_for(file)).unwrap_err();
        assert!(format!("{:#}", err).contains("Unrecognized operation kind 'patch'"));
    }

    #[test]
    fn test_generate_fails_on_unreadable_definition() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("good.yaml"), "root: sys\nroutes: []\n").unwrap();
        fs::write(temp_dir.path().join("bad.json"), "{ nope").unwrap();

        assert!(generate(&args_for(temp_dir.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_run_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("sys.yaml");
        fs::write(&file, "root: sys\nroutes:\n  - pattern: seal\n    operations: [update]\n").unwrap();
        let output = temp_dir.path().join("out").join("openapi.json");

        let mut args = args_for(file);
        args.output_format = OutputFormat::Json;
        args.output_path = Some(output.clone());
        run(args).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert!(parsed["paths"]["/sys/seal"]["post"].is_object());
    }
}
