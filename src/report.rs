//! Run reporting: the timing file and machine-readable summaries

use crate::driver::BatchReport;
use crate::error::{MatcacheError, MatcacheResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Overwrite `path` with the run's timing line
pub async fn write_timing(path: &Path, report: &BatchReport) -> MatcacheResult<()> {
    let mut line = report.timing_line();
    line.push('\n');

    fs::write(path, line)
        .await
        .map_err(|e| MatcacheError::io(format!("writing report to {}", path.display()), e))?;

    debug!("Timing written to {}", path.display());
    Ok(())
}

/// Serializable view of a [`BatchReport`]
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub finished_at: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub workers: usize,
    pub files: usize,
    pub matrices_parsed: usize,
    pub matrices_cached: usize,
    pub line_errors: usize,
    pub write_failures: usize,
    pub unreadable_files: Vec<String>,
    pub failed_files: Vec<FailedFile>,
    pub abandoned_files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FailedFile {
    pub path: String,
    pub reason: String,
}

impl RunSummary {
    pub fn new(report: &BatchReport, workers: usize) -> Self {
        Self {
            finished_at: Utc::now(),
            elapsed_secs: report.elapsed.as_secs_f64(),
            workers,
            files: report.files_submitted(),
            matrices_parsed: report.matrices_parsed(),
            matrices_cached: report.matrices_cached(),
            line_errors: report.line_errors(),
            write_failures: report.write_failures(),
            unreadable_files: report
                .outcomes
                .iter()
                .filter(|o| o.read_error.is_some())
                .map(|o| o.path.display().to_string())
                .collect(),
            failed_files: report
                .failures
                .iter()
                .map(|f| FailedFile {
                    path: f.path.display().to_string(),
                    reason: f.reason.clone(),
                })
                .collect(),
            abandoned_files: report
                .abandoned
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::TaskFailure;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn sample_report() -> BatchReport {
        BatchReport {
            elapsed: Duration::from_millis(2500),
            outcomes: Vec::new(),
            failures: vec![TaskFailure {
                path: PathBuf::from("in/b.txt"),
                reason: "boom".to_string(),
            }],
            abandoned: vec![PathBuf::from("in/c.txt")],
        }
    }

    #[tokio::test]
    async fn timing_file_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("timing.txt");
        tokio::fs::write(&path, "stale\nstale\n").await.unwrap();

        write_timing(&path, &sample_report()).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "Redis cache processing time: 2.50 seconds\n");
    }

    #[tokio::test]
    async fn timing_to_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no").join("such").join("timing.txt");
        let err = write_timing(&path, &sample_report()).await.unwrap_err();
        assert!(err.to_string().contains("writing report"));
    }

    #[test]
    fn summary_serializes() {
        let summary = RunSummary::new(&sample_report(), 3);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["workers"], 3);
        assert_eq!(json["files"], 2);
        assert_eq!(json["failed_files"][0]["reason"], "boom");
        assert_eq!(json["abandoned_files"][0], "in/c.txt");
        assert!(json["finished_at"].is_string());
    }
}
