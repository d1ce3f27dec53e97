//! imgai - batch image conversion, resizing and EXIF tooling
//!
//! The heart of the crate is [`BatchProcessor`]: give it shell-style path
//! patterns and an operation, and it expands the patterns, runs the operation
//! on a fixed number of worker threads and hands back one [`Outcome`] per
//! file. The image operations themselves (convert, resize, EXIF read and
//! strip) live in [`processing`] and [`metadata`]; [`commands`] wires them to
//! the processor the way the `imgai` binary uses them.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use imgai::{BatchProcessor, BatchReport, ImageFormat};
//! use imgai::processing::{convert_image, ConvertOptions};
//!
//! let options = ConvertOptions::new(ImageFormat::WebP);
//! let processor = BatchProcessor::new(4);
//!
//! let outcomes = processor.process(&["photos/*.jpg"], &|path: &Path| {
//!     convert_image(path, &options).map(|_| ())
//! });
//!
//! let report = BatchReport::from_outcomes(&outcomes);
//! println!("{}/{} converted", report.succeeded, report.total);
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod i18n;
pub mod metadata;
pub mod parallel;
pub mod processing;

// Re-export commonly used types
pub use config::{Config, LoggingConfig, ProcessingConfig};
pub use error::{ImgaiError, Result};
pub use i18n::{Language, Message, Translator};
pub use parallel::{BatchProcessor, BatchReport, ImageOperation, Outcome};
pub use processing::ImageFormat;

use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr so they never
/// mix with command output. Calling this more than once is harmless; only the
/// first subscriber is kept.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            ImgaiError::config(format!("invalid log level '{}': {}", config.level, e))
        })?,
    };

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.json_format {
        tracing::subscriber::set_global_default(builder.json().finish()).is_ok()
    } else {
        tracing::subscriber::set_global_default(builder.finish()).is_ok()
    };

    if installed {
        info!("imgai v{} initialized", VERSION);
        report_capabilities();
    }

    Ok(())
}

fn report_capabilities() {
    debug!("Detected {} logical CPUs", num_cpus::get());
    debug!(
        "Image codecs: JPEG {}, PNG {}, WebP {}",
        image::ImageFormat::Jpeg.can_write(),
        image::ImageFormat::Png.can_write(),
        image::ImageFormat::WebP.can_write()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_init_logging_twice() {
        let config = LoggingConfig::default();
        assert!(init_logging(&config).is_ok());
        assert!(init_logging(&config).is_ok());
    }

    #[test]
    fn test_bad_level_rejected() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig {
            level: "imgai=notalevel".to_string(),
            json_format: false,
        };
        assert!(init_logging(&config).is_err());
    }
}
