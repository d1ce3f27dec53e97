//! Parallel batch processing
//!
//! [`BatchProcessor`] takes a list of path patterns and an [`ImageOperation`],
//! expands the patterns, fans the files out over a fixed number of workers
//! and returns one [`Outcome`] per file. It never stops early: every file is
//! attempted exactly once and partial failure is reported, not raised.

use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ProcessingConfig;
use crate::error::{ImgaiError, Result};
use crate::i18n::{Message, Translator};

pub mod expand;
pub mod progress;
pub mod scheduler;

pub use expand::expand_patterns;
pub use progress::{progress_for, BarProgress, NoProgress, ProgressIndicator};
pub use scheduler::WorkerPool;

/// The per-file work a batch runs
///
/// The processor knows nothing about what the operation does; it only
/// records whether it returned an error.
pub trait ImageOperation: Send + Sync {
    fn apply(&self, path: &Path) -> Result<()>;
}

impl<F> ImageOperation for F
where
    F: Fn(&Path) -> Result<()> + Send + Sync,
{
    fn apply(&self, path: &Path) -> Result<()> {
        self(path)
    }
}

/// Result of one file in a batch
#[derive(Debug)]
pub struct Outcome {
    pub path: PathBuf,
    pub succeeded: bool,
    pub error: Option<ImgaiError>,
}

impl Outcome {
    pub fn from_result(path: PathBuf, result: Result<()>) -> Self {
        match result {
            Ok(()) => Self { path, succeeded: true, error: None },
            Err(error) => Self::failed(path, error),
        }
    }

    pub fn failed(path: PathBuf, error: ImgaiError) -> Self {
        Self {
            path,
            succeeded: false,
            error: Some(error),
        }
    }

    /// True for the synthetic outcome of a batch that never reached the workers
    pub fn is_batch_abort(&self) -> bool {
        self.error.as_ref().map_or(false, ImgaiError::is_batch_abort)
    }
}

/// Runs one operation over many files with a fixed worker count
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: ProcessingConfig,
}

impl BatchProcessor {
    /// Create a processor with `workers` workers; zero means the default of four
    pub fn new(workers: usize) -> Self {
        Self::with_config(ProcessingConfig::with_workers(workers))
    }

    pub fn with_config(config: ProcessingConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    /// Enable or disable the progress bar for later `process` calls
    pub fn set_progress(&mut self, enabled: bool) {
        self.config.show_progress = enabled;
    }

    pub fn workers(&self) -> usize {
        self.config.workers
    }

    pub fn config(&self) -> ProcessingConfig {
        self.config
    }

    /// Expand `patterns` and run `op` over every file found
    ///
    /// If expansion fails or finds nothing, the result is a single failed
    /// outcome named after the first pattern and no worker is started.
    pub fn process<S, O>(&self, patterns: &[S], op: &O) -> Vec<Outcome>
    where
        S: AsRef<str>,
        O: ImageOperation + ?Sized,
    {
        let show = self.config.show_progress;
        self.process_with(patterns, op, |total| progress_for(total, show))
    }

    /// [`process`](Self::process) with a caller-supplied progress indicator
    ///
    /// `make_progress` receives the number of files once expansion has
    /// succeeded. It is never called for a batch that does not start.
    pub fn process_with<S, O, F>(&self, patterns: &[S], op: &O, make_progress: F) -> Vec<Outcome>
    where
        S: AsRef<str>,
        O: ImageOperation + ?Sized,
        F: FnOnce(usize) -> Box<dyn ProgressIndicator>,
    {
        let first = patterns
            .first()
            .map(|p| PathBuf::from(p.as_ref()))
            .unwrap_or_default();

        debug!("Batch state: expanding {} patterns", patterns.len());
        let files = match expand_patterns(patterns) {
            Ok(files) => files,
            Err(e) => {
                debug!("Batch state: done (expansion failed)");
                return vec![Outcome::failed(first, e)];
            }
        };

        if files.is_empty() {
            debug!("Batch state: done (no matches)");
            let patterns = patterns.iter().map(|p| p.as_ref().to_string()).collect();
            return vec![Outcome::failed(first, ImgaiError::NoMatches { patterns })];
        }

        self.process_files_with(&files, op, make_progress)
    }

    /// Run `op` over an already expanded file list
    pub fn process_files<O>(&self, files: &[PathBuf], op: &O) -> Vec<Outcome>
    where
        O: ImageOperation + ?Sized,
    {
        let show = self.config.show_progress;
        self.process_files_with(files, op, |total| progress_for(total, show))
    }

    /// [`process_files`](Self::process_files) with a caller-supplied progress indicator
    pub fn process_files_with<O, F>(&self, files: &[PathBuf], op: &O, make_progress: F) -> Vec<Outcome>
    where
        O: ImageOperation + ?Sized,
        F: FnOnce(usize) -> Box<dyn ProgressIndicator>,
    {
        let first = files.first().cloned().unwrap_or_default();
        let pool = match WorkerPool::new(self.config.workers) {
            Ok(pool) => pool,
            Err(e) => return vec![Outcome::failed(first, e)],
        };

        info!("Processing {} files with {} workers", files.len(), pool.workers());
        let progress = make_progress(files.len());

        debug!("Batch state: dispatching");
        let outcomes = pool.run(files, op, progress.as_ref());
        debug!("Batch state: drained {} outcomes", outcomes.len());

        if progress.is_visible() {
            progress.finish();
            println!();
        }

        let failed = outcomes.iter().filter(|o| !o.succeeded).count();
        info!("Batch finished: {} succeeded, {} failed", outcomes.len() - failed, failed);
        outcomes
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::with_config(ProcessingConfig::default())
    }
}

/// A failed file in a [`BatchReport`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureEntry {
    pub path: PathBuf,
    pub error: String,
}

/// Summary of a batch, printable or serializable as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// The batch was rejected before any file was attempted
    pub never_started: bool,
    pub failures: Vec<FailureEntry>,
    /// Ran in single-file mode; the per-file line is the whole report
    #[serde(skip)]
    pub single_file: bool,
}

impl BatchReport {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let failures: Vec<FailureEntry> = outcomes
            .iter()
            .filter(|o| !o.succeeded)
            .map(|o| FailureEntry {
                path: o.path.clone(),
                error: o
                    .error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "unknown error".to_string()),
            })
            .collect();

        Self {
            total: outcomes.len(),
            succeeded: outcomes.len() - failures.len(),
            failed: failures.len(),
            never_started: outcomes.iter().any(Outcome::is_batch_abort),
            failures,
            single_file: false,
        }
    }

    /// Report for a single file handled outside the processor
    pub fn single(path: &Path, result: &Result<()>) -> Self {
        match result {
            Ok(()) => Self { total: 1, succeeded: 1, single_file: true, ..Self::default() },
            Err(e) => Self {
                total: 1,
                failed: 1,
                failures: vec![FailureEntry { path: path.to_path_buf(), error: e.to_string() }],
                single_file: true,
                ..Self::default()
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// One stderr line per failed file
    pub fn print_failures(&self, messages: Translator) {
        for failure in &self.failures {
            eprintln!(
                "{}",
                messages.render(Message::Failed { path: &failure.path, error: &failure.error })
            );
        }
    }

    /// The closing `✓ Successfully processed ok/total images` line
    pub fn print_summary(&self, messages: Translator) {
        println!();
        println!(
            "{}",
            messages.render(Message::SuccessfullyProcessed {
                succeeded: self.succeeded,
                total: self.total,
            })
        );
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ImgaiError::Serde(e.to_string()))
    }
}
