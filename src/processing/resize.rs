//! Image resizing

use std::path::{Path, PathBuf};
use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

use crate::error::{ErrorContext, ImgaiError, Result};
use crate::processing::formats::sibling_path;
use crate::processing::open_image;

/// Options for one resize run
#[derive(Debug, Clone, Default)]
pub struct ResizeOptions {
    /// Target width in pixels, 0 = derive from height
    pub width: u32,
    /// Target height in pixels, 0 = derive from width
    pub height: u32,
    /// Explicit output path (single-file mode only)
    pub output: Option<PathBuf>,
}

/// Calculate target dimensions, keeping the aspect ratio when only one side is given
pub fn calculate_dimensions(
    original_width: u32,
    original_height: u32,
    target_width: u32,
    target_height: u32,
) -> (u32, u32) {
    match (target_width, target_height) {
        (0, 0) => (original_width, original_height),
        (width, 0) => {
            let aspect_ratio = original_height as f64 / original_width as f64;
            let height = (width as f64 * aspect_ratio) as u32;
            (width, height.max(1))
        }
        (0, height) => {
            let aspect_ratio = original_width as f64 / original_height as f64;
            let width = (height as f64 * aspect_ratio) as u32;
            (width.max(1), height)
        }
        (width, height) => (width, height),
    }
}

/// Default output name: `<stem>_resized_<W>x<H>.<ext>` beside the input
pub fn resize_output_path(input: &Path, width: u32, height: u32) -> PathBuf {
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    sibling_path(input, &format!("_resized_{}x{}", width, height), &extension)
}

/// Resize with Lanczos3 resampling
pub fn resize(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.width() == width && image.height() == height {
        debug!("No resize needed, dimensions already match target");
        return image.clone();
    }
    image.resize_exact(width, height, FilterType::Lanczos3)
}

/// What a resize wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resized {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Work out the output of a resize from the image header alone
pub fn plan_resize(input: &Path, options: &ResizeOptions) -> Result<Resized> {
    if !input.exists() {
        return Err(ImgaiError::file_not_found(input));
    }
    let (src_width, src_height) = image::image_dimensions(input)?;
    let (width, height) = calculate_dimensions(src_width, src_height, options.width, options.height);
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| resize_output_path(input, width, height));
    Ok(Resized { output, width, height })
}

/// Resize an image file and write the result
pub fn resize_image(input: &Path, options: &ResizeOptions) -> Result<Resized> {
    let source = open_image(input)?;
    let (width, height) = calculate_dimensions(
        source.width(),
        source.height(),
        options.width,
        options.height,
    );

    debug!(
        "Resizing {:?}: {}x{} -> {}x{}",
        input, source.width(), source.height(), width, height
    );

    let resized = resize(&source, width, height);
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| resize_output_path(input, width, height));

    resized.save(&output).with_file_context(output.clone())?;
    Ok(Resized { output, width, height })
}
