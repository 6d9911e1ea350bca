//! Command-line interface for rst-parser
//! Parses a plaintext file into an RST discourse tree and prints it in bracketed form.
//!
//! Usage:
//!   rst-parse `<input>` [`<output>`]                 - Annotate, assemble, parse and print
//!   rst-parse `<input>` --payload                  - Input is a saved JSON annotation payload
//!   rst-parse `<input>` --format document-json     - Print the assembled document instead of a tree
//!
//! Logging goes to stderr; set `RUST_LOG=rst_parser=debug` to follow the stages.

use clap::{Arg, ArgAction, ArgMatches, Command};
use config::ConfigError;
use rst_parser::rst::annotation::{Annotator, CoreNlpClient, PayloadReplay};
use rst_parser::rst::clusters::{ClusterError, ClusterResource};
use rst_parser::rst::config::{Loader, RstConfig};
use rst_parser::rst::formats::FormatRegistry;
use rst_parser::rst::parsing::{RightBranchingModel, ShiftReduceParser};
use rst_parser::rst::transforms::stages::{Annotate, Assemble};
use rst_parser::rst::transforms::standard::{full_pipeline, PipelineParts};
use rst_parser::rst::transforms::{Transform, TransformError};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output format that stops after assembly
const DOCUMENT_JSON: &str = "document-json";

#[derive(Debug, Error)]
enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("could not {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cluster resource: {0}")]
    Clusters(#[from] ClusterError),
    #[error("{0}")]
    Transform(#[from] TransformError),
    #[error("could not serialize document: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let matches = Command::new("rst-parse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse a plaintext file into an RST discourse tree")
        .arg(
            Arg::new("input")
                .help("Path to the plaintext input (or JSON payload with --payload)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Where to write the tree (default: stdout)")
                .index(2),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration layered over the built-in defaults"),
        )
        .arg(
            Arg::new("payload")
                .long("payload")
                .help("Treat the input as an annotation payload instead of plaintext")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("clusters")
                .long("clusters")
                .help("Word cluster file (overrides resources.clusters)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: pretty, flat or document-json (overrides output.format)"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), PipelineError> {
    let config = load_config(matches)?;

    let input = matches
        .get_one::<String>("input")
        .map(PathBuf::from)
        .unwrap_or_default();
    let source = std::fs::read_to_string(&input).map_err(|source| PipelineError::Io {
        action: "read",
        path: input.clone(),
        source,
    })?;

    let output = if matches.get_flag("payload") {
        render(PayloadReplay, &config, source)?
    } else {
        let client = CoreNlpClient::new(config.annotator.url.clone())
            .with_annotators(config.annotator.annotators.clone())
            .with_timeout(config.annotator.timeout());
        render(client, &config, source)?
    };

    match matches.get_one::<String>("output") {
        Some(path) => std::fs::write(path, output).map_err(|source| PipelineError::Io {
            action: "write",
            path: PathBuf::from(path),
            source,
        })?,
        None => print!("{}", output),
    }
    Ok(())
}

fn load_config(matches: &ArgMatches) -> Result<RstConfig, PipelineError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(clusters) = matches.get_one::<String>("clusters") {
        loader = loader.set_override("resources.clusters", clusters.as_str())?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    Ok(loader.build()?)
}

fn render<A>(annotator: A, config: &RstConfig, source: String) -> Result<String, PipelineError>
where
    A: Annotator + Send + Sync + 'static,
{
    if config.output.format == DOCUMENT_JSON {
        let to_document = Transform::from_fn(Ok)
            .then(Annotate::new(annotator))
            .then(Assemble::new(config.numbering));
        let document = to_document.run(source)?;
        return Ok(format!("{}\n", serde_json::to_string_pretty(&document)?));
    }

    let clusters = match &config.resources.clusters {
        Some(path) => ClusterResource::from_path(path)?,
        None => {
            info!("no cluster resource configured, parsing without cluster features");
            ClusterResource::empty()
        }
    };

    let pipeline = full_pipeline(PipelineParts {
        annotator,
        numbering: config.numbering,
        parser: ShiftReduceParser::new(RightBranchingModel),
        clusters: Arc::new(clusters),
        registry: FormatRegistry::with_margin(config.output.margin),
        format: config.output.format.clone(),
    });
    Ok(pipeline.run(source)?)
}
