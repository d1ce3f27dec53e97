//! Input and parameter validation

use std::path::Path;
use tracing::debug;

use crate::error::{Result, ImgaiError};
use crate::processing::formats::{is_supported_format, ImageFormat};

pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Check that a JPEG quality lies in 1..=100
pub fn validate_quality(quality: u8) -> Result<u8> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(ImgaiError::invalid_parameters(format!(
            "quality must be between {} and {}: got {}",
            MIN_QUALITY, MAX_QUALITY, quality
        )));
    }
    Ok(quality)
}

/// Parse a user-supplied format name
pub fn validate_format(format: &str) -> Result<ImageFormat> {
    format
        .parse()
        .map_err(|_| ImgaiError::unsupported_format(format.trim().to_lowercase(), None))
}

/// At least one of width or height must be requested
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 && height == 0 {
        return Err(ImgaiError::invalid_parameters(
            "at least one dimension (width or height) must be specified",
        ));
    }
    Ok(())
}

/// Check that `path` exists and its content is an image imgai can decode
pub fn validate_input_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    debug!("Validating file: {:?}", path);

    let metadata = std::fs::metadata(path)
        .map_err(|_| ImgaiError::file_not_found(path))?;

    if !metadata.is_file() {
        return Err(ImgaiError::validation(
            "path is not a regular file",
            Some(path.to_path_buf()),
        ));
    }

    match infer::get_from_path(path)? {
        Some(kind) if is_supported_format(kind.extension()) => Ok(()),
        Some(kind) => Err(ImgaiError::unsupported_format(
            kind.extension(),
            Some(path.to_path_buf()),
        )),
        None => Err(ImgaiError::validation(
            "unrecognized file content",
            Some(path.to_path_buf()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_quality_range() {
        assert!(validate_quality(1).is_ok());
        assert!(validate_quality(100).is_ok());
        assert!(validate_quality(0).is_err());
        assert!(validate_quality(101).is_err());
    }

    #[test]
    fn test_format_names() {
        assert_eq!(validate_format("JPEG").unwrap(), ImageFormat::Jpeg);
        let err = validate_format("GIF").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported format: gif (supported: jpg, jpeg, png, webp)"
        );
    }

    #[test]
    fn test_dimensions_required() {
        assert!(validate_dimensions(0, 0).is_err());
        assert!(validate_dimensions(800, 0).is_ok());
        assert!(validate_dimensions(0, 600).is_ok());
    }

    #[test]
    fn test_missing_input_file() {
        let err = validate_input_file("definitely/not/here.jpg").unwrap_err();
        assert!(matches!(err, ImgaiError::FileNotFound { .. }));
    }

    #[test]
    fn test_input_file_content_sniffing() {
        let dir = TempDir::new().unwrap();

        let text = dir.path().join("notes.jpg");
        std::fs::write(&text, b"just some text, not a picture").unwrap();
        assert!(validate_input_file(&text).is_err());

        let png = dir.path().join("pixel.png");
        image::RgbImage::new(2, 2).save(&png).unwrap();
        assert!(validate_input_file(&png).is_ok());

        assert!(validate_input_file(dir.path()).is_err());
    }

    #[test]
    fn test_input_file_outside_supported_formats() {
        let dir = TempDir::new().unwrap();
        let gif = dir.path().join("anim.jpg");
        std::fs::write(&gif, b"GIF89a\x01\x00\x01\x00\x00\x00\x00;").unwrap();

        let err = validate_input_file(&gif).unwrap_err();
        assert!(matches!(
            err,
            ImgaiError::UnsupportedFormat { ref format, file: Some(_) } if format == "gif"
        ));
    }
}
