use crate::config::DocumentConfig;
use crate::openapi_builder::DocumentBuilder;
use crate::route::Route;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use crate::shape::DocumentShape;
use crate::viewer::{render_swagger_ui, ViewerConfig};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// routedoc - Generate an API description document from route definitions
#[derive(Parser, Debug)]
#[command(name = "routedoc")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Document metadata file (YAML or JSON)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Document shape (defaults to the config value, then openapi3)
    #[arg(short = 's', long = "shape", value_enum)]
    pub shape: Option<DocumentShape>,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Also write the Swagger UI page to this file
    #[arg(long = "viewer", value_name = "FILE")]
    pub viewer_path: Option<PathBuf>,

    /// URL the Swagger UI page loads the document from
    #[arg(long = "spec-url", default_value = "/openapi.json")]
    pub spec_url: String,

    /// Keep authorization data in the Swagger UI page across reloads
    #[arg(long = "persist-authorization")]
    pub persist_authorization: bool,

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

/// Log already-parsed arguments
pub fn log_args(args: &CliArgs) {
    debug!("Parsed arguments: {:?}", args);

    if let Some(ref config) = args.config {
        info!("Config file: {}", config.display());
    }
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }
}

/// Run the main workflow over the routes of an application
pub fn run(args: &CliArgs, routes: &[Route]) -> Result<()> {
    info!("Starting document generation...");

    // Step 1: Load document metadata
    let config = match &args.config {
        Some(path) => DocumentConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => DocumentConfig::default(),
    };
    let shape = args.shape.or(config.shape).unwrap_or_default();
    info!("Document shape: {:?} ({})", shape, shape.version());

    // Step 2: Build the document
    info!("Building document from {} routes...", routes.len());
    let builder = config.apply(DocumentBuilder::new());
    let document = builder
        .build(routes)
        .context("Failed to build the API document")?;

    // Step 3: Serialize to requested format
    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&document, shape)?,
        OutputFormat::Json => serialize_json(&document, shape)?,
    };

    // Step 4: Output to file or stdout
    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)
            .with_context(|| format!("Failed to write to file: {}", output_path.display()))?;
    } else {
        println!("{}", content);
    }

    // Step 5: Optional viewer page
    if let Some(viewer_path) = &args.viewer_path {
        let viewer = ViewerConfig {
            title: document.info.title.clone(),
            spec_url: args.spec_url.clone(),
            persist_authorization: args.persist_authorization,
            ..ViewerConfig::default()
        };
        let page = render_swagger_ui(&viewer).context("Failed to render viewer page")?;
        write_to_file(&page, viewer_path)
            .with_context(|| format!("Failed to write viewer page: {}", viewer_path.display()))?;
        info!("Wrote viewer page to {}", viewer_path.display());
    }

    info!("Generation complete!");
    info!("Summary:");
    info!("  - Routes: {}", routes.len());
    info!("  - Paths: {}", document.paths.len());
    info!("  - Schemas: {}", document.schemas.len());

    Ok(())
}
