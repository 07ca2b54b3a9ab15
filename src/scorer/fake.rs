use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::ScoringError;
use crate::scorer::{ScoreRequest, ScorerTrait};

/// A fake scorer for testing
///
/// This fake lets tests control exactly which scores (or failures) are
/// returned, in order, without spawning any process. It uses a builder
/// pattern for configuration and records every text it was asked to score.
///
/// # Example
///
/// ```
/// use sentiment_eval::scorer::ScorerTrait;
/// use sentiment_eval::scorer::fake::FakeScorer;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let scorer = FakeScorer::new().with_scores(vec![0.8, -0.5]);
///
///     assert_eq!(scorer.score("great!").await?, 0.8);
///     assert_eq!(scorer.score("bad.").await?, -0.5);
///     assert_eq!(scorer.requests.lock().unwrap().len(), 2);
///     Ok(())
/// }
/// ```
pub struct FakeScorer {
    responses: Mutex<Vec<Result<f64, String>>>,
    default_score: f64,
    // Track requests for verification in tests
    pub requests: Mutex<Vec<ScoreRequest>>,
}

impl Default for FakeScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeScorer {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(vec![]),
            default_score: 0.0,
            requests: Mutex::new(vec![]),
        }
    }

    /// Add a score to be returned by the fake scorer
    pub fn with_score(self, score: f64) -> Self {
        self.responses.lock().unwrap().push(Ok(score));
        self
    }

    /// Add multiple scores to be returned in sequence
    pub fn with_scores(self, scores: Vec<f64>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .extend(scores.into_iter().map(Ok));
        self
    }

    /// Queue a failure, as if the scorer had written `message` to stderr
    pub fn with_error(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Err(message.to_string()));
        self
    }

    /// Score returned once the queued responses run out
    pub fn with_default_score(mut self, score: f64) -> Self {
        self.default_score = score;
        self
    }
}

#[async_trait]
impl ScorerTrait for FakeScorer {
    async fn score(&self, text: &str) -> Result<f64, ScoringError> {
        self.requests.lock().unwrap().push(ScoreRequest {
            text: text.to_string(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(self.default_score);
        }
        responses.remove(0).map_err(ScoringError::Scripted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_scorer_responses() -> Result<(), anyhow::Error> {
        let scorer = FakeScorer::new().with_score(0.8).with_score(-0.5);

        assert_eq!(scorer.score("first").await?, 0.8);
        assert_eq!(scorer.score("second").await?, -0.5);

        // Falls back to the default once the queue is drained
        assert_eq!(scorer.score("third").await?, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_fake_scorer_errors() {
        let scorer = FakeScorer::new().with_error("boom").with_score(1.0);

        let err = scorer.score("a").await.unwrap_err();
        assert!(matches!(err, ScoringError::Scripted(ref m) if m == "boom"));
        assert_eq!(scorer.score("b").await.unwrap(), 1.0);
    }

    #[tokio::test]
    async fn test_request_tracking() {
        let scorer = FakeScorer::new().with_default_score(2.0);

        let _ = scorer.score("great!").await.unwrap();
        let _ = scorer.score("bad.").await.unwrap();

        let requests = scorer.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].text, "great!");
        assert_eq!(requests[1].text, "bad.");
    }
}
