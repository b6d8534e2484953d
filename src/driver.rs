//! Parallel driver: fan files out to a bounded worker pool
//!
//! One tokio task is spawned per input file; a semaphore keeps at most
//! `workers` of them running at once. Each task opens its own cache
//! connection. The driver collects results until every task has finished
//! or the deadline passes, at which point the remaining tasks are aborted
//! and reported as abandoned. Writes an aborted task already issued stay
//! in the cache.

use crate::config::schema::WorkersConfig;
use crate::error::{MatcacheError, MatcacheResult};
use crate::processor::{process_file, FileOutcome};
use crate::store::StoreConnector;
use std::any::Any;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::fs;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Worker pool settings resolved for one run
#[derive(Debug, Clone, Copy)]
pub struct DriverOptions {
    pub workers: usize,
    pub timeout: Duration,
}

impl DriverOptions {
    pub fn from_config(config: &WorkersConfig) -> Self {
        Self {
            workers: worker_count(config.max_workers),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Pool size: `cap` bounded by available parallelism, never below one
pub fn worker_count(cap: usize) -> usize {
    let available = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    cap.min(available).max(1)
}

/// A file whose task ended without producing an outcome
#[derive(Debug, Clone)]
pub struct TaskFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything the driver learned during one run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub elapsed: Duration,
    pub outcomes: Vec<FileOutcome>,
    pub failures: Vec<TaskFailure>,
    /// Files still running when the deadline passed
    pub abandoned: Vec<PathBuf>,
}

impl BatchReport {
    /// The line written to the report file and stdout
    pub fn timing_line(&self) -> String {
        format!(
            "Redis cache processing time: {:.2} seconds",
            self.elapsed.as_secs_f64()
        )
    }

    pub fn files_submitted(&self) -> usize {
        self.outcomes.len() + self.failures.len() + self.abandoned.len()
    }

    pub fn matrices_parsed(&self) -> usize {
        self.outcomes.iter().map(|o| o.matrices.len()).sum()
    }

    pub fn matrices_cached(&self) -> usize {
        self.outcomes.iter().map(FileOutcome::matrices_cached).sum()
    }

    pub fn line_errors(&self) -> usize {
        self.outcomes.iter().map(|o| o.line_errors.len()).sum()
    }

    pub fn write_failures(&self) -> usize {
        self.outcomes.iter().map(|o| o.write_failures.len()).sum()
    }

    /// True when every file finished without any kind of error
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
            && self.abandoned.is_empty()
            && self.outcomes.iter().all(FileOutcome::is_clean)
    }
}

/// List regular files directly under `dir`, sorted by name
pub async fn list_input_files(dir: &Path) -> MatcacheResult<Vec<PathBuf>> {
    match fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(MatcacheError::InputDirNotFound(dir.to_path_buf())),
    }

    let read_err = |e| MatcacheError::InputDirRead {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut entries = fs::read_dir(dir).await.map_err(read_err)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
        let path = entry.path();
        // metadata() follows symlinks, so a link to a regular file counts
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => debug!("Skipping non-file {}", path.display()),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    files.sort();
    Ok(files)
}

/// Process `files` concurrently and collect the results
///
/// `on_done` is called once for every file that finishes, successfully or
/// not, in completion order.
pub async fn run_batch<F>(
    files: Vec<PathBuf>,
    connector: Arc<dyn StoreConnector>,
    options: DriverOptions,
    mut on_done: F,
) -> BatchReport
where
    F: FnMut(&Path),
{
    let mut report = BatchReport::default();
    let workers = options.workers.max(1);
    info!(
        "Processing {} file(s) with {} worker(s) against {}",
        files.len(),
        workers,
        connector.describe()
    );

    let started = Instant::now();
    let deadline = tokio::time::Instant::now() + options.timeout;

    let semaphore = Arc::new(Semaphore::new(workers));
    let mut tasks = JoinSet::new();
    let mut pending = HashMap::new();

    for path in files {
        let semaphore = Arc::clone(&semaphore);
        let connector = Arc::clone(&connector);
        let task_path = path.clone();

        let handle = tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| MatcacheError::Internal("worker pool closed".to_string()))?;
            let store = connector.connect().await?;
            Ok::<_, MatcacheError>(process_file(&task_path, store.as_ref()).await)
        });
        pending.insert(handle.id(), path);
    }

    loop {
        match tokio::time::timeout_at(deadline, tasks.join_next_with_id()).await {
            Ok(None) => break,
            Ok(Some(Ok((id, Ok(outcome))))) => {
                pending.remove(&id);
                on_done(&outcome.path);
                report.outcomes.push(outcome);
            }
            Ok(Some(Ok((id, Err(e))))) => {
                let path = pending.remove(&id).unwrap_or_default();
                error!("Error processing file {}: {}", path.display(), e);
                on_done(&path);
                report.failures.push(TaskFailure {
                    path,
                    reason: e.to_string(),
                });
            }
            Ok(Some(Err(join_err))) => {
                let path = pending.remove(&join_err.id()).unwrap_or_default();
                let reason = if join_err.is_panic() {
                    panic_reason(join_err.into_panic())
                } else {
                    "task cancelled".to_string()
                };
                error!("Error processing file {}: {}", path.display(), reason);
                on_done(&path);
                report.failures.push(TaskFailure { path, reason });
            }
            Err(_) => {
                tasks.abort_all();
                let mut abandoned: Vec<PathBuf> = pending.drain().map(|(_, p)| p).collect();
                abandoned.sort();
                for path in &abandoned {
                    warn!(
                        "Abandoned {} after {}s timeout",
                        path.display(),
                        options.timeout.as_secs()
                    );
                }
                report.abandoned = abandoned;
                break;
            }
        }
    }

    report.elapsed = started.elapsed();
    report
}

fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("worker panicked: {}", s)
    } else {
        "worker panicked".to_string()
    }
}
