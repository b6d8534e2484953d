//! Per-file processing: read, parse, cache
//!
//! Every expected failure stays inside the returned [`FileOutcome`]: an
//! unreadable file yields an empty outcome, bad lines are skipped, and a
//! failed cache write is recorded before moving on to the next matrix.

use crate::matrix::{parse_text, LineError, MatrixRecord};
use crate::store::{write_matrix, CacheKeys, CacheStore};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// A cache write that did not go through
#[derive(Debug, Clone, Serialize)]
pub struct WriteFailure {
    pub index: usize,
    pub key: String,
    pub reason: String,
}

/// What happened to one input file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Parsed matrices in line order; the index of each is its key suffix
    pub matrices: Vec<MatrixRecord>,
    pub line_errors: Vec<LineError>,
    pub write_failures: Vec<WriteFailure>,
    /// Set when the file could not be read at all
    pub read_error: Option<String>,
}

impl FileOutcome {
    fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            matrices: Vec::new(),
            line_errors: Vec::new(),
            write_failures: Vec::new(),
            read_error: None,
        }
    }

    /// Matrices whose data and shape writes both succeeded
    pub fn matrices_cached(&self) -> usize {
        self.matrices.len() - self.write_failures.len()
    }

    /// Whether anything went wrong for this file
    pub fn is_clean(&self) -> bool {
        self.line_errors.is_empty() && self.write_failures.is_empty() && self.read_error.is_none()
    }
}

/// Read `path`, parse each line, and cache every parsed matrix
pub async fn process_file(path: &Path, store: &dyn CacheStore) -> FileOutcome {
    let mut outcome = FileOutcome::empty(path);

    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Cannot read {}: {}", path.display(), e);
            outcome.read_error = Some(e.to_string());
            return outcome;
        }
    };

    let parsed = parse_text(&text);
    for err in &parsed.errors {
        warn!("Skipping {} {}", path.display(), err);
    }
    outcome.line_errors = parsed.errors;

    for (index, record) in parsed.records.iter().enumerate() {
        let keys = CacheKeys::for_matrix(path, index);
        if let Err(e) = write_matrix(store, record, &keys).await {
            warn!("Failed to cache {}: {}", keys.data, e);
            outcome.write_failures.push(WriteFailure {
                index,
                key: keys.data,
                reason: e.to_string(),
            });
        }
    }

    debug!(
        "{}: {} matrices, {} bad lines ({})",
        path.display(),
        parsed.records.len(),
        outcome.line_errors.len(),
        store.backend_name()
    );
    outcome.matrices = parsed.records;
    outcome
}
