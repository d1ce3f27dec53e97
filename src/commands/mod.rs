//! Subcommand logic
//!
//! Each command receives its options as plain structs plus a shared
//! [`RunContext`], and returns a [`BatchReport`] for `main` to print.

pub mod convert;
pub mod exif;
pub mod resize;
pub mod strip;

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::ProcessingConfig;
use crate::error::Result;
use crate::i18n::{Message, Translator};
use crate::parallel::{BatchProcessor, BatchReport, ImageOperation};
use crate::processing::validation::validate_input_file;

/// Settings shared by every command of one invocation
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    pub processing: ProcessingConfig,
    pub messages: Translator,
    pub dry_run: bool,
    /// Suppress per-file lines on stdout
    pub quiet: bool,
}

impl RunContext {
    pub fn new(processing: ProcessingConfig, messages: Translator) -> Self {
        Self {
            processing,
            messages,
            dry_run: false,
            quiet: false,
        }
    }

    /// Print one per-file line unless quiet
    pub fn say(&self, message: Message<'_>) {
        if !self.quiet {
            println!("{}", self.messages.render(message));
        }
    }

    /// Print one indented dry-run line unless quiet
    pub fn preview(&self, message: Message<'_>) {
        if !self.quiet {
            println!("  {}", self.messages.render(message));
        }
    }
}

/// The lone input when single-file mode applies: one input and an explicit output
pub(crate) fn single_input<'a>(inputs: &'a [String], output: Option<&PathBuf>) -> Option<&'a Path> {
    match (inputs, output) {
        ([input], Some(_)) => Some(Path::new(input)),
        (_, Some(output)) => {
            warn!("Ignoring --output {:?}: it only applies to a single input", output);
            None
        }
        _ => None,
    }
}

/// Run `op` once on `input` without the worker pool
pub(crate) fn run_single<F>(input: &Path, op: F) -> Result<BatchReport>
where
    F: FnOnce(&Path) -> Result<()>,
{
    validate_input_file(input)?;
    debug!("Single-file mode for {:?}", input);
    op(input)?;
    Ok(BatchReport::single(input, &Ok(())))
}

/// Run `op` over every file matched by `inputs`
pub(crate) fn run_batch<O>(inputs: &[String], ctx: &RunContext, op: &O) -> BatchReport
where
    O: ImageOperation + ?Sized,
{
    let processor = BatchProcessor::with_config(ctx.processing);
    let outcomes = processor.process(inputs, op);
    BatchReport::from_outcomes(&outcomes)
}

/// Dry run: print what `preview` would do for each file, touching nothing
pub(crate) fn run_preview<O>(inputs: &[String], ctx: &RunContext, preview: &O) -> BatchReport
where
    O: ImageOperation + ?Sized,
{
    if !ctx.quiet {
        println!("{}\n", ctx.messages.render(Message::DryRunHeader));
    }

    let mut processor = BatchProcessor::with_config(ctx.processing);
    processor.set_progress(false);
    let report = BatchReport::from_outcomes(&processor.process(inputs, preview));

    if !ctx.quiet {
        let count = if report.never_started { 0 } else { report.total };
        println!();
        println!("{}", ctx.messages.render(Message::WouldProcess { count }));
        println!("{}", ctx.messages.render(Message::RunWithoutDryRun));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImgaiError;

    #[test]
    fn test_single_input_detection() {
        let out = PathBuf::from("out.png");
        let one = vec!["a.jpg".to_string()];
        let two = vec!["a.jpg".to_string(), "b.jpg".to_string()];

        assert_eq!(single_input(&one, Some(&out)), Some(Path::new("a.jpg")));
        assert_eq!(single_input(&one, None), None);
        assert_eq!(single_input(&two, Some(&out)), None);
    }

    #[test]
    fn test_single_mode_missing_file() {
        let err = run_single(Path::new("gone.jpg"), |_| Ok(())).unwrap_err();
        assert!(matches!(err, ImgaiError::FileNotFound { .. }));
    }

    #[test]
    fn test_single_mode_rejects_non_images() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"plain text").unwrap();

        let err = run_single(&path, |_| panic!("operation must not run")).unwrap_err();
        assert!(matches!(err, ImgaiError::Validation { .. }));
    }

    #[test]
    fn test_single_mode_report_has_no_summary() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("one.png");
        image::RgbImage::new(2, 2).save(&path).unwrap();

        let report = run_single(&path, |_| Ok(())).unwrap();
        assert!(report.single_file);
        assert_eq!((report.total, report.succeeded), (1, 1));
    }
}
