//! Batch processor behaviour on real files

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use imgai::processing::{convert_image, resize_image, ConvertOptions, ResizeOptions};
use imgai::{BatchProcessor, BatchReport, ImageFormat, ImgaiError, Result};
use tempfile::TempDir;

fn make_images(dir: &TempDir, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.path().join(name);
            image::RgbImage::from_fn(32, 24, |x, y| image::Rgb([x as u8, y as u8, 90]))
                .save(&path)
                .unwrap();
            path
        })
        .collect()
}

fn processor(workers: usize) -> BatchProcessor {
    let mut processor = BatchProcessor::new(workers);
    processor.set_progress(false);
    processor
}

fn glob_in(dir: &TempDir, pattern: &str) -> String {
    dir.path().join(pattern).to_string_lossy().into_owned()
}

#[test]
fn overlapping_patterns_process_each_file_once() {
    let dir = TempDir::new().unwrap();
    make_images(&dir, &["one.png", "two.png", "three.png"]);

    let seen = Mutex::new(Vec::new());
    let op = |path: &Path| -> Result<()> {
        seen.lock().unwrap().push(path.to_path_buf());
        Ok(())
    };

    let patterns = [glob_in(&dir, "*.png"), glob_in(&dir, "t*.png"), glob_in(&dir, "one.png")];
    let outcomes = processor(2).process(&patterns, &op);

    assert_eq!(outcomes.len(), 3);
    assert_eq!(seen.into_inner().unwrap().len(), 3);
}

#[test]
fn convert_batch_end_to_end() {
    let dir = TempDir::new().unwrap();
    let inputs = make_images(&dir, &["a.png", "b.png", "c.png", "d.png", "e.png"]);
    let options = ConvertOptions { quality: 80, ..ConvertOptions::new(ImageFormat::Jpeg) };

    let op = |path: &Path| convert_image(path, &options).map(|_| ());
    let outcomes = processor(3).process(&[glob_in(&dir, "*.png")], &op);
    let report = BatchReport::from_outcomes(&outcomes);

    assert_eq!((report.total, report.succeeded, report.failed), (5, 5, 0));
    for input in inputs {
        assert!(input.with_extension("jpg").exists());
    }
}

#[test]
fn resize_batch_reports_missing_file_without_aborting() {
    let dir = TempDir::new().unwrap();
    let mut inputs: Vec<String> = make_images(&dir, &["a.png", "b.png"])
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    inputs.push(glob_in(&dir, "missing.png"));

    let options = ResizeOptions { width: 16, ..Default::default() };
    let op = |path: &Path| resize_image(path, &options).map(|_| ());
    let outcomes = processor(2).process(&inputs, &op);

    assert_eq!(outcomes.len(), 3);
    let failed: Vec<_> = outcomes.iter().filter(|o| !o.succeeded).collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].path.ends_with("missing.png"));
    assert!(matches!(failed[0].error, Some(ImgaiError::FileNotFound { .. })));
    assert!(dir.path().join("a_resized_16x12.png").exists());
}

#[test]
fn unmatched_pattern_never_starts() {
    let dir = TempDir::new().unwrap();
    let pattern = glob_in(&dir, "*.webp");

    let op = |_: &Path| -> Result<()> { panic!("operation must not run") };
    let outcomes = processor(0).process(&[pattern.as_str()], &op);
    let report = BatchReport::from_outcomes(&outcomes);

    assert_eq!(report.total, 1);
    assert!(report.never_started);
    assert_eq!(report.failures[0].error, "no files found matching patterns");
}
