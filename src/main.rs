//! sdkgen CLI entrypoint
//! Parses command-line arguments and dispatches to the client generator.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use sdkgen::application::{GenerateClientRequest, GenerateClientUseCase};
use sdkgen::core::Config;
use sdkgen::generation::{CamelCaseNamer, GenerationOrchestrator};
use sdkgen::infrastructure::generation::TeraModuleRenderer;
use sdkgen::infrastructure::openapi::CompositeOpenApiLoader;
use sdkgen::infrastructure::output::FileSystemOutputService;
use std::path::PathBuf;
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::{Context, anyhow};
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sdkgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file; flags override its values
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a JavaScript client module from an OpenAPI document
    Generate {
        /// Path or URL to OpenAPI schema (YAML or JSON)
        #[arg(long)]
        schema_path: Option<String>,
        /// File the generated module is written to
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Version sent in the X-SDK-Version header
        #[arg(long)]
        sdk_version: Option<String>,
    },
    /// Print the compiled request specifications as JSON
    Inspect {
        /// Path or URL to OpenAPI schema (YAML or JSON)
        #[arg(long)]
        schema_path: Option<String>,
        /// Version sent in the X-SDK-Version header
        #[arg(long)]
        sdk_version: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `inspect` output stays machine-readable
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let file_config = match &cli.config {
        Some(path) => Config::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Generate {
            schema_path,
            output,
            sdk_version,
        } => {
            let config = file_config.merge(Config {
                schema_path,
                output,
                sdk_version,
            });
            generate_client(config).await?
        }
        Commands::Inspect {
            schema_path,
            sdk_version,
        } => {
            let config = file_config.merge(Config {
                schema_path,
                output: None,
                sdk_version,
            });
            inspect_client(config).await?
        }
    }
    Ok(())
}

/// Wire the default loader, renderer and output service
fn build_use_case() -> anyhow::Result<GenerateClientUseCase> {
    let renderer = TeraModuleRenderer::new().context("Failed to load client template")?;
    let orchestrator = GenerationOrchestrator::new(Arc::new(CamelCaseNamer), Arc::new(renderer));

    Ok(GenerateClientUseCase::new(
        Arc::new(CompositeOpenApiLoader::new()),
        Arc::new(orchestrator),
        Arc::new(FileSystemOutputService::new()),
    ))
}

/// Generate the client module and write it to disk
async fn generate_client(config: Config) -> anyhow::Result<()> {
    let schema_path = config
        .schema_path
        .ok_or_else(|| anyhow!("--schema-path is required"))?;
    let output_path = config
        .output
        .unwrap_or_else(|| PathBuf::from("index.js"));

    info!(
        schema_path = %schema_path,
        output = %output_path.display(),
        "Generating client module"
    );

    let response = build_use_case()?
        .execute(GenerateClientRequest {
            schema_path,
            output_path,
            sdk_version: config.sdk_version,
        })
        .await
        .context("Failed to generate client module")?;

    info!(
        "✅ Wrote {} operations to {} ({} bytes)",
        response.exports.len(),
        response.output_path.display(),
        response.bytes_written
    );
    Ok(())
}

/// Print the compiled module as JSON
async fn inspect_client(config: Config) -> anyhow::Result<()> {
    let schema_path = config
        .schema_path
        .ok_or_else(|| anyhow!("--schema-path is required"))?;

    let module = build_use_case()?
        .inspect(&schema_path, config.sdk_version.as_deref())
        .await
        .context("Failed to compile OpenAPI document")?;

    println!("{}", serde_json::to_string_pretty(&module)?);
    Ok(())
}
