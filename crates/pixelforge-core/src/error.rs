//! Error types for PixelForge

use thiserror::Error;

/// Result type alias using PixelForge's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Message reported when the service answered but returned no image part
pub const NO_IMAGE_MESSAGE: &str = "Generation failed. Please try again.";

/// Message reported when a transport failure carries no message of its own
pub const GENERIC_FAILURE_MESSAGE: &str = "Transformation failed.";

/// Normalized outcome of a failed transformation attempt
///
/// This is the only failure type the transformation client hands back to its
/// caller. It displays as its bare message so a UI can show it verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationFailure {
    /// The service responded but no content part carried inline image data
    #[error("{}", NO_IMAGE_MESSAGE)]
    NoImage,

    /// The remote call itself failed
    #[error("{0}")]
    Transport(String),
}

impl GenerationFailure {
    /// Human-readable message for this failure
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<TransportError> for GenerationFailure {
    fn from(error: TransportError) -> Self {
        let message = error
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        Self::Transport(message)
    }
}

/// Failure reported by a generation backend
///
/// `message` is `None` when the underlying failure had nothing useful to say
/// (for example a non-success status with an empty body).
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{}", describe_transport(.message))]
pub struct TransportError {
    /// Message from the underlying failure, if any
    pub message: Option<String>,
    /// HTTP status code, when the service answered with one
    pub status: Option<u16>,
}

impl TransportError {
    /// Transport failure with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            status: None,
        }
    }

    /// Transport failure without any message
    pub fn silent() -> Self {
        Self::default()
    }

    /// Attach the HTTP status code
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

fn describe_transport(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("transport failure")
}

/// PixelForge error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Generation errors (E100-E199)
    #[error(transparent)]
    Generation(#[from] GenerationFailure),

    #[error("Network error: {0}. Check your internet connection.")]
    NetworkError(#[from] reqwest::Error),

    #[error("Gemini API key not set. Export GEMINI_API_KEY before running `pixelforge transform`.")]
    ApiKeyMissing,

    // Image errors (E200-E299)
    #[error("Failed to read image: {0}")]
    ImageReadError(String),

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("Failed to save image: {0}")]
    ImageSaveError(String),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::Generation(GenerationFailure::NoImage) => "E100",
            Self::Generation(GenerationFailure::Transport(_)) => "E101",
            Self::NetworkError(_) => "E102",
            Self::ApiKeyMissing => "E103",
            Self::ImageReadError(_) => "E200",
            Self::UnsupportedImage(_) => "E201",
            Self::ImageSaveError(_) => "E202",
            Self::ConfigError(_) => "E600",
            Self::InvalidInput(_) => "E800",
            Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Generation(GenerationFailure::NoImage) => {
                Some("Try again, or pick a different style or depth".to_string())
            }
            Self::NetworkError(_) => Some("Check internet connection".to_string()),
            Self::ApiKeyMissing => Some("export GEMINI_API_KEY=<your key>".to_string()),
            Self::UnsupportedImage(_) => Some("Use a PNG, JPEG or WebP image".to_string()),
            Self::ConfigError(_) => Some("pixelforge config list".to_string()),
            _ => None,
        }
    }
}
