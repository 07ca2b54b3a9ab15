use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or decoding the labeled dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Dataset {} is not a list of {{text, label}} records: {source}",
        .path.display()
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Dataset {} has an invalid CSV record: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Dataset {}, record {index}: {reason}", .path.display())]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        reason: String,
    },
}

/// Failures of the external scoring collaborator for a single text.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Failed to spawn scorer {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Scorer wrote to stderr: {0}")]
    Stderr(String),

    #[error("Scorer exited with {0}")]
    ExitStatus(std::process::ExitStatus),

    #[error("Scorer output is not a number: {0:?}")]
    InvalidOutput(String),

    #[error("Scorer did not finish within {0} seconds")]
    Timeout(u64),

    #[error("{0}")]
    Scripted(String),
}

/// Anything that aborts an evaluation run.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Scoring failed for sample {index}: {source}")]
    Scoring {
        index: usize,
        #[source]
        source: ScoringError,
    },

    #[error("Dataset contains no samples; accuracy is undefined")]
    EmptyDataset,
}
