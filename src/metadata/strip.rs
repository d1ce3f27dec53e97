//! Metadata removal

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::OutputConfig;
use crate::error::Result;
use crate::processing::convert::save_image;
use crate::processing::formats::detect_format_from_path;
use crate::processing::open_image;

#[derive(Debug, Clone, Default)]
pub struct StripOptions {
    /// Write here instead of overwriting the input
    pub output: Option<PathBuf>,
}

impl StripOptions {
    pub fn output_for(&self, input: &Path) -> PathBuf {
        self.output.clone().unwrap_or_else(|| input.to_path_buf())
    }
}

/// Re-encode only the pixel data of `input`, dropping every metadata block
pub fn strip_exif(input: &Path, options: &StripOptions) -> Result<PathBuf> {
    let image = open_image(input)?;
    let output = options.output_for(input);
    let format = detect_format_from_path(&output)?;

    debug!("Stripping metadata: {:?} -> {:?} as {}", input, output, format);
    save_image(&image, &output, format, OutputConfig::DEFAULT_QUALITY)?;
    Ok(output)
}
