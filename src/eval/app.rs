use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::CommonArgs;
use crate::dataset::{label_counts, load_dataset};
use crate::eval::{evaluate, EvaluationResult};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    pub common_args: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every sample and report accuracy
    Run {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Load the dataset and summarise it without scoring
    Inspect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub async fn main() -> Result<()> {
    // Logs go to stderr; stdout only carries the result
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run_app().await
}

pub async fn run_app() -> Result<()> {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    run(cli, &mut stdout).await
}

/// Execute a parsed command line, writing the report to `out`.
pub async fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let args = cli.common_args;
    match cli.command {
        Commands::Run { format } => {
            info!(
                "Running evaluation of {} with format {:?}",
                args.dataset.display(),
                format
            );
            let result = run_evaluation(&args).await?;
            write_result(out, &result, format)?;
        }
        Commands::Inspect => {
            info!("Inspecting dataset {}", args.dataset.display());
            inspect_dataset(&args, out)?;
        }
    }
    Ok(())
}

async fn run_evaluation(args: &CommonArgs) -> Result<EvaluationResult> {
    let samples = load_dataset(&args.dataset, args.dataset_format)
        .context("Failed to load dataset")?;
    let scorer = args.scorer();
    let result = evaluate(&samples, &scorer)
        .await
        .context("Evaluation aborted")?;
    Ok(result)
}

fn inspect_dataset(args: &CommonArgs, out: &mut dyn Write) -> Result<()> {
    let samples = load_dataset(&args.dataset, args.dataset_format)
        .context("Failed to load dataset")?;
    writeln!(out, "Samples: {}", samples.len())?;
    for (label, count) in label_counts(&samples) {
        writeln!(out, "{}: {}", label, count)?;
    }
    Ok(())
}

/// Render an accuracy the way it is reported, e.g. `100.0` or `50.0`.
pub fn format_accuracy(accuracy_percent: f64) -> String {
    // Debug keeps the fractional part on whole numbers
    format!("{:?}", accuracy_percent)
}

pub fn write_result(
    out: &mut dyn Write,
    result: &EvaluationResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(
                out,
                "Accuracy: {}%",
                format_accuracy(result.accuracy_percent)
            )?;
        }
        OutputFormat::Json => {
            let body = serde_json::to_string_pretty(result)?;
            writeln!(out, "{}", body)?;
        }
    }
    Ok(())
}
