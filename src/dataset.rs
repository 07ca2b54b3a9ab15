use crate::error::DatasetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Ground-truth or predicted sentiment of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    pub const ALL: [Label; 3] =
        [Label::Positive, Label::Negative, Label::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
            Label::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Label::Positive),
            "negative" => Ok(Label::Negative),
            "neutral" => Ok(Label::Neutral),
            other => Err(format!(
                "unknown label {:?}, expected positive, negative or neutral",
                other
            )),
        }
    }
}

/// One labeled text example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub text: String,
    pub label: Label,
}

// Records are decoded loosely first so a bad label can be reported with
// its position in the file.
#[derive(Debug, Deserialize)]
struct RawSample {
    text: String,
    label: String,
}

/// On-disk encoding of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DatasetFormat {
    /// Pick from the file extension
    Auto,
    /// A JSON array of `{"text", "label"}` objects
    Json,
    /// A CSV file with `text` and `label` columns
    Csv,
}

impl DatasetFormat {
    fn resolve(self, path: &Path) -> DatasetFormat {
        match self {
            DatasetFormat::Auto => {
                let is_csv = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false);
                if is_csv {
                    DatasetFormat::Csv
                } else {
                    DatasetFormat::Json
                }
            }
            explicit => explicit,
        }
    }
}

/// Load the samples stored at `path`, preserving file order.
#[instrument(err)]
pub fn load_dataset(
    path: &Path,
    format: DatasetFormat,
) -> Result<Vec<Sample>, DatasetError> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let format = format.resolve(path);
    debug!("Decoding {} as {:?}", path.display(), format);

    let raw = match format {
        DatasetFormat::Csv => parse_csv(path, &contents)?,
        _ => parse_json(path, &contents)?,
    };

    let samples = raw
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let label = record.label.parse::<Label>().map_err(|reason| {
                DatasetError::InvalidRecord {
                    path: path.to_path_buf(),
                    index,
                    reason,
                }
            })?;
            Ok(Sample {
                text: record.text,
                label,
            })
        })
        .collect::<Result<Vec<_>, DatasetError>>()?;

    info!("Loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

fn parse_json(
    path: &Path,
    contents: &str,
) -> Result<Vec<RawSample>, DatasetError> {
    serde_json::from_str(contents).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_csv(
    path: &Path,
    contents: &str,
) -> Result<Vec<RawSample>, DatasetError> {
    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    reader
        .deserialize::<RawSample>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

/// Count of samples per ground-truth label, in `Label::ALL` order.
pub fn label_counts(samples: &[Sample]) -> Vec<(Label, usize)> {
    Label::ALL
        .iter()
        .map(|label| {
            (*label, samples.iter().filter(|s| s.label == *label).count())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::write_dataset;

    fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        write_dataset(suffix, body).expect("Failed to write temp dataset")
    }

    #[test]
    fn test_load_json_dataset_preserves_order() {
        let file = write_temp(
            ".json",
            r#"[
                {"text": "great!", "label": "positive"},
                {"text": "bad.", "label": "negative"},
                {"text": "it is a chair", "label": "neutral"}
            ]"#,
        );

        let samples = load_dataset(file.path(), DatasetFormat::Auto).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].text, "great!");
        assert_eq!(samples[0].label, Label::Positive);
        assert_eq!(samples[1].label, Label::Negative);
        assert_eq!(samples[2].label, Label::Neutral);
    }

    #[test]
    fn test_load_csv_dataset() {
        let file = write_temp(
            ".csv",
            "text,label\n\"great, really\",positive\nbad.,negative\n",
        );

        let samples = load_dataset(file.path(), DatasetFormat::Auto).unwrap();
        assert_eq!(
            samples,
            vec![
                Sample {
                    text: "great, really".to_string(),
                    label: Label::Positive,
                },
                Sample {
                    text: "bad.".to_string(),
                    label: Label::Negative,
                },
            ]
        );
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let file = write_temp(".txt", "text,label\nok,neutral\n");
        let samples = load_dataset(file.path(), DatasetFormat::Csv).unwrap();
        assert_eq!(samples[0].label, Label::Neutral);

        let err = load_dataset(file.path(), DatasetFormat::Json).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_dataset(&missing, DatasetFormat::Auto).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        for body in [
            r#"{"text": "great!", "label": "positive"}"#,
            r#"[{"text": "great!"}]"#,
            r#"[{"label": "positive"}]"#,
            r#"["great!"]"#,
            "not json at all",
        ] {
            let file = write_temp(".json", body);
            let err =
                load_dataset(file.path(), DatasetFormat::Auto).unwrap_err();
            assert!(
                matches!(err, DatasetError::Parse { .. }),
                "expected parse error for {}",
                body
            );
        }
    }

    #[test]
    fn test_unknown_label_reports_record_index() {
        let file = write_temp(
            ".json",
            r#"[
                {"text": "great!", "label": "positive"},
                {"text": "meh", "label": "mixed"}
            ]"#,
        );

        let err = load_dataset(file.path(), DatasetFormat::Auto).unwrap_err();
        match err {
            DatasetError::InvalidRecord { index, reason, .. } => {
                assert_eq!(index, 1);
                assert!(reason.contains("mixed"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_list_loads_as_no_samples() {
        let file = write_temp(".json", "[]");
        let samples = load_dataset(file.path(), DatasetFormat::Auto).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_label_counts() {
        let samples = vec![
            Sample {
                text: "a".into(),
                label: Label::Positive,
            },
            Sample {
                text: "b".into(),
                label: Label::Positive,
            },
            Sample {
                text: "c".into(),
                label: Label::Neutral,
            },
        ];
        assert_eq!(
            label_counts(&samples),
            vec![
                (Label::Positive, 2),
                (Label::Negative, 0),
                (Label::Neutral, 1)
            ]
        );
    }
}
