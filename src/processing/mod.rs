//! Core image processing functionality

use std::path::Path;
use image::DynamicImage;
use tracing::debug;

use crate::error::{ErrorContext, ImgaiError, Result};

pub mod convert;
pub mod formats;
pub mod resize;
pub mod validation;

pub use convert::{convert_image, ConvertOptions};
pub use formats::{detect_format_from_path, supported_formats, ImageFormat};
pub use resize::{calculate_dimensions, plan_resize, resize_image, ResizeOptions, Resized};
pub use validation::*;

/// Open and decode an image file
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    debug!("Loading image: {:?}", path);

    if !path.exists() {
        return Err(ImgaiError::file_not_found(path));
    }

    let image = image::open(path).with_file_context(path.to_path_buf())?;

    debug!("Loaded image: {}x{}", image.width(), image.height());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_image() {
        let err = open_image(Path::new("no/such/file.png")).unwrap_err();
        assert!(matches!(err, ImgaiError::FileNotFound { .. }));
    }

    #[test]
    fn test_open_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tiny.png");
        image::RgbImage::new(3, 5).save(&path).unwrap();

        let image = open_image(&path).unwrap();
        assert_eq!((image.width(), image.height()), (3, 5));
    }
}
