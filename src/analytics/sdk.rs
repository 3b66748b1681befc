//! Learning SDK collaborators.
//!
//! The quiz never reaches the SDK through global state; a `LearningSdk` is
//! passed to whoever executes quiz commands.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EvidenceReport;

/// Evidence and trial-boundary sink.
pub trait LearningSdk {
    fn report_evidence(&mut self, report: &EvidenceReport) -> io::Result<()>;

    /// Open a new trial for the learner.
    fn start_trial(&mut self, learner_id: &str) -> io::Result<()>;
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSdk;

impl LearningSdk for NullSdk {
    fn report_evidence(&mut self, _report: &EvidenceReport) -> io::Result<()> {
        Ok(())
    }

    fn start_trial(&mut self, _learner_id: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps every call in memory. Set `fail` to make calls return an error.
#[derive(Debug, Default, Clone)]
pub struct RecordingSdk {
    pub reports: Vec<EvidenceReport>,
    pub trials: Vec<String>,
    pub fail: bool,
}

impl RecordingSdk {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self) -> io::Result<()> {
        if self.fail {
            Err(io::Error::new(io::ErrorKind::Other, "sdk unavailable"))
        } else {
            Ok(())
        }
    }
}

impl LearningSdk for RecordingSdk {
    fn report_evidence(&mut self, report: &EvidenceReport) -> io::Result<()> {
        self.check()?;
        self.reports.push(report.clone());
        Ok(())
    }

    fn start_trial(&mut self, learner_id: &str) -> io::Result<()> {
        self.check()?;
        self.trials.push(learner_id.to_string());
        Ok(())
    }
}

/// One line of the evidence log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    Evidence {
        timestamp: i64,
        session_id: Uuid,
        report: EvidenceReport,
    },
    TrialStarted {
        timestamp: i64,
        session_id: Uuid,
        learner_id: String,
    },
}

/// Appends evidence and trial boundaries to a JSON-lines file.
#[derive(Debug, Clone)]
pub struct JsonlEvidenceLog {
    path: PathBuf,
    session_id: Uuid,
}

impl JsonlEvidenceLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            session_id: Uuid::new_v4(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn append(&self, record: &LogRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let line = serde_json::to_string(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

impl LearningSdk for JsonlEvidenceLog {
    fn report_evidence(&mut self, report: &EvidenceReport) -> io::Result<()> {
        self.append(&LogRecord::Evidence {
            timestamp: Utc::now().timestamp(),
            session_id: self.session_id,
            report: report.clone(),
        })
    }

    fn start_trial(&mut self, learner_id: &str) -> io::Result<()> {
        self.append(&LogRecord::TrialStarted {
            timestamp: Utc::now().timestamp(),
            session_id: self.session_id,
            learner_id: learner_id.to_string(),
        })
    }
}

/// Read back every record of an evidence log. Blank lines are ignored.
pub fn read_log(path: &Path) -> io::Result<Vec<LogRecord>> {
    let content = fs::read_to_string(path)?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::analytics::Attempt;

    fn temp_log_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("shape-quiz-test-{}", Uuid::new_v4()))
            .join("evidence.jsonl")
    }

    fn sample_report(outcome: bool) -> EvidenceReport {
        EvidenceReport {
            event_name: "shape_quiz_answered".to_string(),
            learner_id: "learner-1".to_string(),
            prompt_uri: "red_circle".to_string(),
            attempts: vec![Attempt {
                item_uri: "red_circle#color".to_string(),
                outcome,
            }],
            prompt_answers: BTreeMap::new(),
        }
    }

    #[test]
    fn test_recording_sdk_records_calls() {
        let mut sdk = RecordingSdk::new();
        sdk.report_evidence(&sample_report(true)).unwrap();
        sdk.start_trial("learner-1").unwrap();
        assert_eq!(sdk.reports.len(), 1);
        assert_eq!(sdk.trials, vec!["learner-1".to_string()]);
    }

    #[test]
    fn test_recording_sdk_failure_mode() {
        let mut sdk = RecordingSdk {
            fail: true,
            ..Default::default()
        };
        assert!(sdk.report_evidence(&sample_report(true)).is_err());
        assert!(sdk.start_trial("learner-1").is_err());
        assert!(sdk.reports.is_empty());
        assert!(sdk.trials.is_empty());
    }

    #[test]
    fn test_null_sdk_accepts_everything() {
        let mut sdk = NullSdk;
        assert!(sdk.report_evidence(&sample_report(false)).is_ok());
        assert!(sdk.start_trial("anyone").is_ok());
    }

    #[test]
    fn test_jsonl_log_appends_records() {
        let path = temp_log_path();
        let mut log = JsonlEvidenceLog::new(&path);

        log.report_evidence(&sample_report(true)).unwrap();
        log.start_trial("learner-1").unwrap();
        log.report_evidence(&sample_report(false)).unwrap();

        let records = read_log(&path).unwrap();
        assert_eq!(records.len(), 3);
        match &records[0] {
            LogRecord::Evidence { report, session_id, .. } => {
                assert_eq!(report, &sample_report(true));
                assert_eq!(*session_id, log.session_id());
            }
            other => panic!("unexpected record {:?}", other),
        }
        assert!(matches!(
            &records[1],
            LogRecord::TrialStarted { learner_id, .. } if learner_id == "learner-1"
        ));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_read_log_rejects_garbage() {
        let path = temp_log_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json}\n").unwrap();

        let err = read_log(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
