pub mod cli;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod scorer;

pub mod test_utils;

pub use dataset::{load_dataset, DatasetFormat, Label, Sample};
pub use error::{DatasetError, EvalError, ScoringError};
pub use eval::{evaluate, predict_label, EvaluationResult};
pub use scorer::ScorerTrait;
