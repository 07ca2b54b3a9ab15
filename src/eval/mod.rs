use crate::dataset::{Label, Sample};
use crate::error::EvalError;
use crate::scorer::ScorerTrait;
use tracing::{debug, info, instrument, warn};

pub mod app;
pub mod models;

pub use app::main;
pub use models::{EvaluationResult, LabelBreakdown, SampleOutcome};

/// Bucket a score by its sign. Exactly zero is neutral.
pub fn predict_label(score: f64) -> Label {
    if score > 0.0 {
        Label::Positive
    } else if score < 0.0 {
        Label::Negative
    } else {
        Label::Neutral
    }
}

/// Score every sample in order and tally how many predictions match.
///
/// Each score is awaited before the next sample is sent, so the scorer
/// sees the dataset in file order with one call in flight. The first
/// scoring failure aborts the run; no partial result is returned.
#[instrument(skip_all, fields(samples = samples.len()))]
pub async fn evaluate(
    samples: &[Sample],
    scorer: &dyn ScorerTrait,
) -> Result<EvaluationResult, EvalError> {
    if samples.is_empty() {
        warn!("Refusing to evaluate an empty dataset");
        return Err(EvalError::EmptyDataset);
    }

    let mut outcomes = Vec::with_capacity(samples.len());
    for (index, sample) in samples.iter().enumerate() {
        let score = scorer
            .score(&sample.text)
            .await
            .map_err(|source| EvalError::Scoring { index, source })?;

        let predicted = predict_label(score);
        let correct = predicted == sample.label;
        debug!(
            index,
            score,
            expected = %sample.label,
            predicted = %predicted,
            correct,
            "Scored sample"
        );

        outcomes.push(SampleOutcome {
            index,
            text: sample.text.clone(),
            expected: sample.label,
            predicted,
            score,
            correct,
        });
    }

    let result = EvaluationResult::from_outcomes(outcomes);
    info!(
        "Evaluation finished: {}/{} correct ({}%)",
        result.correct_count, result.total_count, result.accuracy_percent
    );
    Ok(result)
}
