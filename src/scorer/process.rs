use crate::error::ScoringError;
use crate::scorer::{parse_score, ScorerTrait};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, instrument};

// A scorer that runs an external program once per text
#[derive(Debug, Clone)]
pub struct ProcessScorer {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ProcessScorer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    /// Kill the scorer and fail the sample if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn command(&self, text: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl ScorerTrait for ProcessScorer {
    #[instrument(skip(self), fields(program = %self.program), err)]
    async fn score(&self, text: &str) -> Result<f64, ScoringError> {
        let mut command = self.command(text);
        debug!("Running scorer command: {:?}", command);

        let child = command.spawn().map_err(|source| ScoringError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let output = match self.timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, child.wait_with_output())
                    .await
                {
                    Ok(result) => result,
                    // The child is dropped with the future and killed.
                    Err(_) => {
                        return Err(ScoringError::Timeout(limit.as_secs()))
                    }
                }
            }
            None => child.wait_with_output().await,
        }
        .map_err(|source| ScoringError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.stderr.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!("Scorer wrote to stderr: {}", stderr.trim_end());
            return Err(ScoringError::Stderr(stderr));
        }

        if !output.status.success() {
            return Err(ScoringError::ExitStatus(output.status));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let score = parse_score(&stdout)?;
        debug!("Scorer returned {}", score);
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let scorer =
            ProcessScorer::new("./definitely-not-a-scorer-binary", vec![]);
        let err = scorer.score("great!").await.unwrap_err();
        assert!(matches!(err, ScoringError::Spawn { .. }));
    }

    #[test]
    fn test_text_is_last_positional_argument() {
        let scorer = ProcessScorer::new(
            "node",
            vec!["sentimentAnalyzer.js".to_string()],
        );
        let command = scorer.command("it's \"great\"");
        let args: Vec<_> = command
            .as_std()
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, vec!["sentimentAnalyzer.js", "it's \"great\""]);
    }
}
