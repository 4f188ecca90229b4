//! routedoc - Command-line tool for generating API description documents.
//!
//! The binary builds the document of the bundled sample application and prints it or
//! writes it to a file.
//!
//! # Usage
//!
//! ```bash
//! routedoc [OPTIONS]
//! ```
//!
//! # Examples
//!
//! Generate the legacy shape as JSON:
//! ```bash
//! routedoc --shape swagger2 -f json -o swagger.json
//! ```
//!
//! Use document metadata from a file and write the Swagger UI page too:
//! ```bash
//! routedoc -c doc.yaml -o openapi.yaml --viewer index.html
//! ```

mod sample;

use anyhow::Result;
use clap::Parser;
use log::info;
use routedoc::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    // Initialize logger based on verbose flag
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("routedoc starting...");
    cli::log_args(&args);

    cli::run(&args, &sample::routes())?;

    info!("Document generation completed successfully");

    Ok(())
}
