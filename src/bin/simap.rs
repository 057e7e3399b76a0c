//! SImap CLI - document-to-cartography analysis.
//!
//! Analyzes an architecture document, prints the PlantUML diagram and the
//! prioritized recommendations, and optionally writes a full report file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;

use simap_rs::core::config::ReportFormat;
use simap_rs::detectors::recommendations::Priority;
use simap_rs::io::reports::ReportWriter;
use simap_rs::{SimapConfig, SimapEngine};

#[derive(Parser)]
#[command(name = "simap", version, about = "Information-system cartography from documents")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a document and render its cartography
    Analyze(AnalyzeArgs),
    /// Print the default configuration as YAML
    PrintDefaultConfig,
    /// Validate a configuration file
    ValidateConfig {
        /// Path to the YAML configuration
        config: PathBuf,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Document to analyze (.pdf, .docx, or plain text)
    file: PathBuf,

    /// Display name of the generated map (defaults to the file stem)
    #[arg(long)]
    name: Option<String>,

    /// Report format used with --output
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write a report file instead of printing the diagram only
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Optional YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
    Plantuml,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Yaml => ReportFormat::Yaml,
            OutputFormat::Plantuml => ReportFormat::PlantUml,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Analyze(args) => analyze(args).await?,
        Commands::PrintDefaultConfig => {
            print!("{}", serde_yaml::to_string(&SimapConfig::default())?);
        }
        Commands::ValidateConfig { config } => {
            let loaded = SimapConfig::from_yaml_file(&config)?;
            loaded.validate()?;
            println!("Configuration valide: {}", config.display());
        }
    }

    Ok(())
}

async fn analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => SimapConfig::from_yaml_file(path)?,
        None => SimapConfig::default(),
    };

    let engine = SimapEngine::new(config)?;
    let mut results = engine.analyze_document(&args.file).await?;

    if let Some(name) = args.name {
        results.system_map.name = name;
    }

    println!(
        "Cartographie '{}': {} composants, {} relations\n",
        results.system_map.name,
        results.summary.component_count,
        results.summary.relationship_count
    );

    if let Some(diagram) = &results.system_map.diagram {
        println!("{diagram}\n");
    }

    println!("Recommandations ({}):", results.summary.recommendation_count);
    for recommendation in &results.recommendations {
        let tag = match recommendation.priority {
            Priority::High => recommendation.priority.as_str().red().to_string(),
            Priority::Medium => recommendation.priority.as_str().yellow().to_string(),
            Priority::Low => recommendation.priority.as_str().green().to_string(),
        };
        println!("  [{tag}] {} — {}", recommendation.title, recommendation.description);
    }

    if let Some(output) = args.output {
        ReportWriter::new().write(&results, &output, args.format.into())?;
        println!("\nRapport écrit dans {}", output.display());
    }

    Ok(())
}
