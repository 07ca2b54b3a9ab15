use crate::dataset::DatasetFormat;
use crate::scorer::process::ProcessScorer;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments shared by every subcommand
#[derive(Parser, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the labeled dataset
    #[arg(
        long,
        env = "SENTIMENT_DATASET",
        default_value = "./testData/sentimentTestSamples.json"
    )]
    pub dataset: PathBuf,

    /// Dataset encoding
    #[arg(long, value_enum, default_value = "auto")]
    pub dataset_format: DatasetFormat,

    /// Program that scores one text per invocation
    #[arg(long, env = "SENTIMENT_SCORER", default_value = "node")]
    pub scorer_program: String,

    /// Arguments passed to the scorer before the sample text
    #[arg(
        long = "scorer-arg",
        default_value = "sentimentAnalyzer.js",
        allow_hyphen_values = true
    )]
    pub scorer_args: Vec<String>,

    /// Give up on a sample if the scorer runs longer than this
    #[arg(long, env = "SENTIMENT_SCORER_TIMEOUT_SECS")]
    pub scorer_timeout_secs: Option<u64>,
}

impl CommonArgs {
    pub fn scorer(&self) -> ProcessScorer {
        let scorer = ProcessScorer::new(
            self.scorer_program.clone(),
            self.scorer_args.clone(),
        );
        match self.scorer_timeout_secs {
            Some(secs) => scorer.with_timeout(Duration::from_secs(secs)),
            None => scorer,
        }
    }
}
