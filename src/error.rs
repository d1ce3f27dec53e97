//! Error types and handling for imgai

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for imgai operations
pub type Result<T> = std::result::Result<T, ImgaiError>;

/// Main error type for imgai operations
#[derive(Debug, Error)]
pub enum ImgaiError {
    /// A glob pattern could not be parsed; the batch never starts
    #[error("failed to expand patterns: invalid pattern '{pattern}': {source}")]
    PatternExpansion {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Every pattern resolved to zero files; the batch never starts
    #[error("no files found matching patterns")]
    NoMatches { patterns: Vec<String> },

    /// The worker pool could not be started
    #[error("failed to start worker pool: {message}")]
    WorkerPool { message: String },

    /// Input file does not exist
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode/encode errors
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// EXIF parsing errors
    #[error("failed to decode EXIF: {0}")]
    Exif(#[from] exif::Error),

    /// File format not supported
    #[error("unsupported format: {format} (supported: jpg, jpeg, png, webp)")]
    UnsupportedFormat {
        format: String,
        file: Option<PathBuf>,
    },

    /// Invalid command parameters
    #[error("{message}")]
    InvalidParameters { message: String },

    /// File validation errors
    #[error("file validation failed: {message} (file: {file:?})")]
    Validation {
        message: String,
        file: Option<PathBuf>,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serde(String),
}

impl ImgaiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new unsupported format error
    pub fn unsupported_format<S: Into<String>>(format: S, file: Option<PathBuf>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
            file,
        }
    }

    /// Create a new file-not-found error
    pub fn file_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new invalid parameters error
    pub fn invalid_parameters<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S, file: Option<PathBuf>) -> Self {
        Self::Validation {
            message: message.into(),
            file,
        }
    }

    /// Create a new worker pool error
    pub fn worker_pool<S: Into<String>>(message: S) -> Self {
        Self::WorkerPool {
            message: message.into(),
        }
    }

    /// Whether this error means the batch never reached the workers
    pub fn is_batch_abort(&self) -> bool {
        matches!(
            self,
            Self::PatternExpansion { .. } | Self::NoMatches { .. } | Self::WorkerPool { .. }
        )
    }
}

impl From<toml::de::Error> for ImgaiError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serde(format!("TOML parsing error: {}", err))
    }
}

impl From<serde_yaml::Error> for ImgaiError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serde(format!("YAML parsing error: {}", err))
    }
}

/// Error context extension for adding file path information
pub trait ErrorContext<T> {
    /// Add file context to an error
    fn with_file_context(self, file: PathBuf) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<ImgaiError>,
{
    fn with_file_context(self, file: PathBuf) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();

            if matches!(&error, ImgaiError::Io(io) if io.kind() == std::io::ErrorKind::NotFound) {
                return ImgaiError::FileNotFound { path: file };
            }

            if let ImgaiError::UnsupportedFormat { file: f, .. }
            | ImgaiError::Validation { file: f, .. } = &mut error
            {
                if f.is_none() {
                    *f = Some(file);
                }
            }

            error
        })
    }
}
