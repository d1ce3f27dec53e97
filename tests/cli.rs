//! End-to-end tests of the `imgai` binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn imgai() -> Command {
    let mut cmd = Command::cargo_bin("imgai").unwrap();
    cmd.env_remove("IMGAI_LANG").env_remove("RUST_LOG");
    cmd
}

fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::new(width, height).save(path).unwrap();
}

#[test]
fn convert_single_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pic.png");
    write_png(&input, 8, 8);

    imgai()
        .arg("convert")
        .arg(&input)
        .args(["--format", "jpg", "--no-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Converted:"))
        .stdout(predicate::str::contains("✓ Successfully processed 1/1 images"));

    assert!(dir.path().join("pic.jpg").exists());
}

#[test]
fn single_file_mode_prints_only_the_file_line() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pic.png");
    write_png(&input, 8, 8);
    let output = dir.path().join("out.webp");

    imgai()
        .arg("convert")
        .arg(&input)
        .args(["--format", "webp", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Converted:"))
        .stdout(predicate::str::contains("Successfully processed").not());

    assert!(output.exists());
}

#[test]
fn partial_failure_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.png");
    write_png(&good, 10, 10);
    let missing = dir.path().join("missing.png");

    imgai()
        .arg("resize")
        .arg(&good)
        .arg(&missing)
        .args(["--width", "5", "--workers", "2"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("✗ Failed:"))
        .stderr(predicate::str::contains("file not found"))
        .stdout(predicate::str::contains("✓ Successfully processed 1/2 images"));
}

#[test]
fn resize_requires_a_dimension() {
    imgai()
        .args(["resize", "whatever.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "at least one dimension (width or height) must be specified",
        ));
}

#[test]
fn quality_out_of_range() {
    imgai()
        .args(["convert", "a.png", "--format", "jpg", "--quality", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quality must be between 1 and 100"));
}

#[test]
fn unsupported_format_rejected_by_parser() {
    imgai()
        .args(["convert", "a.png", "--format", "gif"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported format"));
}

#[test]
fn dry_run_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("keep.png");
    write_png(&input, 4, 4);

    imgai()
        .arg("strip")
        .arg(&input)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN MODE"))
        .stdout(predicate::str::contains("Would strip metadata:"))
        .stdout(predicate::str::contains("✓ Would process 1 images"));
}

#[test]
fn no_matches_reports_single_failure() {
    let dir = TempDir::new().unwrap();
    let pattern = dir.path().join("*.png");

    imgai()
        .arg("convert")
        .arg(&pattern)
        .args(["--format", "png"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no files found matching patterns"))
        .stdout(predicate::str::contains("0/1 images"));
}

#[test]
fn json_summary() {
    let dir = TempDir::new().unwrap();
    write_png(&dir.path().join("a.png"), 6, 6);
    write_png(&dir.path().join("b.png"), 6, 6);

    let output = imgai()
        .arg("--json")
        .arg("resize")
        .arg(dir.path().join("*.png"))
        .args(["--height", "3", "--workers", "0"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], 2);
    assert_eq!(json["succeeded"], 2);
    assert_eq!(json["never_started"], false);
}

#[test]
fn japanese_messages() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("plain.jpg");
    write_png(&input, 4, 4);

    imgai()
        .env("IMGAI_LANG", "ja")
        .arg("exif")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("EXIFデータ:"))
        .stdout(predicate::str::contains("この画像にはEXIFデータが見つかりませんでした。"));
}

#[test]
fn exif_missing_file() {
    imgai()
        .args(["exif", "nope.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found: nope.jpg"));
}
