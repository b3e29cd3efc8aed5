//! Route Pattern OpenAPI Generator - command-line tool.
//!
//! Reads route definitions (regex-style path patterns plus field metadata) from YAML or
//! JSON files and writes an OpenAPI 3.0 document describing every concrete path.
//!
//! # Usage
//!
//! ```bash
//! route-pattern-oapi [OPTIONS] <INPUT>
//! ```
//!
//! # Examples
//!
//! Generate YAML documentation from a directory of definitions:
//! ```bash
//! route-pattern-oapi ./routes -o openapi.yaml
//! ```
//!
//! Generate JSON documentation from a single file:
//! ```bash
//! route-pattern-oapi ./routes/sys.yaml -f json -o openapi.json
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use route_pattern_oapi::cli;

fn main() -> Result<()> {
    // Parse once so the verbose flag can configure the logger before validation logs anything
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Route Pattern OpenAPI Generator starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");

    Ok(())
}
