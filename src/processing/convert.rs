//! Format conversion

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use tracing::debug;

use crate::config::OutputConfig;
use crate::error::{ErrorContext, Result};
use crate::processing::formats::{sibling_path, ImageFormat};
use crate::processing::open_image;

/// Options for one convert run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub format: ImageFormat,
    /// JPEG quality, ignored for lossless targets
    pub quality: u8,
    /// Explicit output path (single-file mode only)
    pub output: Option<PathBuf>,
}

impl ConvertOptions {
    pub fn new(format: ImageFormat) -> Self {
        Self {
            format,
            quality: OutputConfig::DEFAULT_QUALITY,
            output: None,
        }
    }

    /// Where `input` will be written
    pub fn output_for(&self, input: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| sibling_path(input, "", self.format.extension()))
    }
}

/// Encode `image` to `path` in `format`
pub fn save_image(image: &DynamicImage, path: &Path, format: ImageFormat, quality: u8) -> Result<()> {
    debug!("Output format: {:?}, quality: {}", format, quality);

    match format {
        ImageFormat::Jpeg => {
            let file = File::create(path).with_file_context(path.to_path_buf())?;
            let mut writer = BufWriter::new(file);
            let quality = if quality == 0 { OutputConfig::DEFAULT_QUALITY } else { quality };
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
            // JPEG has no alpha channel
            encoder
                .encode_image(&image.to_rgb8())
                .with_file_context(path.to_path_buf())?;
        }
        ImageFormat::Png | ImageFormat::WebP => {
            image
                .save_with_format(path, format.into())
                .with_file_context(path.to_path_buf())?;
        }
    }

    Ok(())
}

/// Convert an image file to another format; returns the output path
pub fn convert_image(input: &Path, options: &ConvertOptions) -> Result<PathBuf> {
    let source = open_image(input)?;
    let output = options.output_for(input);

    save_image(&source, &output, options.format, options.quality)?;
    Ok(output)
}
