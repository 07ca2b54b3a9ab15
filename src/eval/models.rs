use crate::dataset::Label;
use serde::Serialize;

/// What happened to one sample during an evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleOutcome {
    pub index: usize,
    pub text: String,
    pub expected: Label,
    pub predicted: Label,
    pub score: f64,
    pub correct: bool,
}

/// Hits for one ground-truth label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelBreakdown {
    pub label: Label,
    pub expected: usize,
    pub correct: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub correct_count: usize,
    pub total_count: usize,
    pub accuracy_percent: f64,
    pub per_label: Vec<LabelBreakdown>,
    pub outcomes: Vec<SampleOutcome>,
}

impl EvaluationResult {
    /// Tally outcomes, which must be in dataset order.
    pub fn from_outcomes(outcomes: Vec<SampleOutcome>) -> Self {
        let total_count = outcomes.len();
        let correct_count = outcomes.iter().filter(|o| o.correct).count();

        let per_label = Label::ALL
            .iter()
            .map(|label| {
                let mut breakdown = LabelBreakdown {
                    label: *label,
                    expected: 0,
                    correct: 0,
                };
                for outcome in outcomes.iter().filter(|o| o.expected == *label)
                {
                    breakdown.expected += 1;
                    if outcome.correct {
                        breakdown.correct += 1;
                    }
                }
                breakdown
            })
            .collect();

        Self {
            correct_count,
            total_count,
            accuracy_percent: accuracy_percent(correct_count, total_count),
            per_label,
            outcomes,
        }
    }
}

/// `100 * correct / total`, or 0.0 when there is nothing to divide by.
pub fn accuracy_percent(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * correct as f64 / total as f64
}
