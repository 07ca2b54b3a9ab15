pub mod fake;
pub mod process;

use crate::error::ScoringError;
use async_trait::async_trait;

/// A record of one text handed to a scorer
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRequest {
    pub text: String,
}

/// A trait that abstracts the external sentiment scorer
///
/// The evaluator only needs one signed number per text, so the real
/// subprocess-backed scorer and the scripted fake used in tests share this
/// interface.
///
/// Implementation notes:
/// - Uses `async-trait` so the evaluator can hold a `&dyn ScorerTrait`
/// - Callers await each score before requesting the next one
#[async_trait]
pub trait ScorerTrait: Send + Sync {
    /// Produces the sentiment score for `text`
    ///
    /// # Returns
    /// A positive number for positive sentiment, negative for negative and
    /// zero for neutral, or the reason the scorer failed
    async fn score(&self, text: &str) -> Result<f64, ScoringError>;
}

/// Parses a scorer's entire stdout payload as a single float.
///
/// Surrounding whitespace (including the trailing newline most scorers
/// print) is ignored; anything else, including NaN, is rejected.
pub fn parse_score(output: &str) -> Result<f64, ScoringError> {
    let trimmed = output.trim();
    match trimmed.parse::<f64>() {
        Ok(score) if !score.is_nan() => Ok(score),
        _ => Err(ScoringError::InvalidOutput(trimmed.to_string())),
    }
}
