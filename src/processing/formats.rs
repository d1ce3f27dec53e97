//! Image format detection and handling

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::{Result, ImgaiError};

/// Output formats imgai can write
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
}

impl ImageFormat {
    /// Get file extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }

    /// Upper-case label used in user-facing messages
    pub fn label(self) -> &'static str {
        match self {
            Self::Jpeg => "JPG",
            Self::Png => "PNG",
            Self::WebP => "WEBP",
        }
    }

    /// Whether the encoder honours a quality setting
    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = ImgaiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            other => Err(ImgaiError::unsupported_format(other, None)),
        }
    }
}

/// Convert our ImageFormat to image crate format
impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

/// Detect image format from file extension
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ImageFormat> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| ImgaiError::unsupported_format("unknown", Some(path.to_path_buf())))?;

    extension
        .parse()
        .map_err(|_| ImgaiError::unsupported_format(extension, Some(path.to_path_buf())))
}

/// Formats accepted on the command line
pub fn supported_formats() -> &'static [&'static str] {
    &["jpg", "jpeg", "png", "webp"]
}

/// Check if a file extension is supported
pub fn is_supported_format(extension: &str) -> bool {
    supported_formats()
        .iter()
        .any(|&fmt| fmt.eq_ignore_ascii_case(extension))
}

/// Build `<dir>/<stem><suffix>.<extension>` next to `input`
pub fn sibling_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{}{}.{}", stem, suffix, extension);

    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection_from_path() {
        assert_eq!(detect_format_from_path("test.jpg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(detect_format_from_path("test.JPEG").unwrap(), ImageFormat::Jpeg);
        assert_eq!(detect_format_from_path("test.PNG").unwrap(), ImageFormat::Png);
        assert_eq!(detect_format_from_path("test.webp").unwrap(), ImageFormat::WebP);
        assert!(detect_format_from_path("test.bmp").is_err());
        assert!(detect_format_from_path("noext").is_err());
    }

    #[test]
    fn test_parse_normalizes_jpeg() {
        assert_eq!("jpeg".parse::<ImageFormat>().unwrap().extension(), "jpg");
        assert_eq!(" PNG ".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        let err = "tiff".parse::<ImageFormat>().unwrap_err();
        assert!(err.to_string().contains("unsupported format: tiff"));
    }

    #[test]
    fn test_supported_formats() {
        assert!(is_supported_format("jpg"));
        assert!(is_supported_format("WEBP"));
        assert!(!is_supported_format("gif"));
    }

    #[test]
    fn test_sibling_path() {
        let out = sibling_path(Path::new("photos/cat.jpeg"), "", "png");
        assert_eq!(out, PathBuf::from("photos/cat.png"));

        let out = sibling_path(Path::new("cat.jpg"), "_resized_800x600", "jpg");
        assert_eq!(out, PathBuf::from("cat_resized_800x600.jpg"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(ImageFormat::WebP.label(), "WEBP");
        assert!(ImageFormat::Jpeg.is_lossy());
        assert!(!ImageFormat::Png.is_lossy());
    }
}
