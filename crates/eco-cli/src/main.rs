//! eco - energy and carbon analytics for LLM inference workloads

use anyhow::Result;
use clap::{Parser, Subcommand};
use eco_core::{ModelName, TaskCategory};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use output::OutputFormat;

/// Energy and carbon analytics for LLM inference workloads
#[derive(Debug, Parser)]
#[command(name = "eco")]
#[command(about = "Energy and carbon analytics for LLM inference workloads")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a synthetic batch and print per-model analytics
    Analyze {
        /// Simulation configuration YAML file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of samples (overrides the configuration)
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        /// Random seed (overrides the configuration)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Directory to export CSV and JSON reports into
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Also print every enriched sample
        #[arg(long)]
        show_samples: bool,

        /// Only print samples of this model (e.g. "GPT-4", "llama-3")
        #[arg(short, long)]
        model: Option<ModelName>,

        /// Only print samples of this task category
        #[arg(long)]
        category: Option<TaskCategory>,
    },

    /// Estimate energy and CO2 of modeled workloads
    Estimate {
        /// Simulation configuration YAML file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Workload durations in seconds (comma-separated); sampled when omitted
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        durations: Vec<f64>,

        /// Random seed for sampled durations
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Classify a prompt and estimate its per-model footprint
    Prompt {
        /// Prompt text
        text: String,

        /// Simulation configuration YAML file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Random seed for the multiplier jitter
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Write the default simulation configuration
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "eco.yaml")]
        file: PathBuf,
    },

    /// Validate a simulation configuration file
    Validate {
        /// Path to the configuration YAML file
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.verbose)?;
    debug!("Starting eco CLI with {:?}", cli);

    let output_format = cli.output;

    match cli.command {
        Commands::Analyze { config, samples, seed, export, show_samples, model, category } => {
            let filter = commands::analyze::SampleFilter { model, category };
            commands::analyze::run_analyze(
                config,
                samples,
                seed,
                export,
                show_samples,
                filter,
                output_format,
            )
        }
        Commands::Estimate { config, durations, seed } => {
            commands::estimate::run_estimate(config, durations, seed, output_format)
        }
        Commands::Prompt { text, config, seed } => {
            commands::prompt::run_prompt(text, config, seed, output_format)
        }
        Commands::Generate { file } => commands::config::generate_config(file, output_format),
        Commands::Validate { config } => commands::config::validate_config(config, output_format),
    }
}

fn parse_level(log_level: &str, verbose: bool) -> tracing::Level {
    if verbose {
        return tracing::Level::DEBUG;
    }

    match log_level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::INFO,
    }
}

fn init_tracing(log_level: &str, verbose: bool) -> Result<()> {
    let level = parse_level(log_level, verbose);

    // Logs go to stderr so JSON/YAML on stdout stay parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("eco_cli={level},eco_sim={level},eco_core={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
