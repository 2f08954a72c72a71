//! Error types for the conversion pipeline and its hosting layer.

use thiserror::Error;

/// Result type alias using ConvertError.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Primary error type for image conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    // === Pipeline Errors ===
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to resize image: {0}")]
    Resize(String),

    #[error("Failed to composite image: {0}")]
    Composite(String),

    #[error("Failed to encode GIF: {0}")]
    Encode(String),

    // === Upload Errors ===
    #[error("No file provided")]
    MissingFile,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Upload too large: {0}")]
    UploadTooLarge(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ConvertError {
    /// Stable name of the error kind, used for metric labels and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::Decode(_) => "DecodeError",
            ConvertError::Resize(_) => "ResizeError",
            ConvertError::Composite(_) => "CompositeError",
            ConvertError::Encode(_) => "EncodeError",
            ConvertError::MissingFile => "MissingFile",
            ConvertError::InvalidUpload(_) => "InvalidUpload",
            ConvertError::UploadTooLarge(_) => "UploadTooLarge",
            ConvertError::Internal(_) => "InternalError",
        }
    }

    /// True for failures raised by the pipeline stages themselves.
    pub fn is_pipeline_error(&self) -> bool {
        matches!(
            self,
            ConvertError::Decode(_)
                | ConvertError::Resize(_)
                | ConvertError::Composite(_)
                | ConvertError::Encode(_)
        )
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ConvertError::MissingFile | ConvertError::InvalidUpload(_) => 400,
            ConvertError::UploadTooLarge(_) => 413,
            _ => 500,
        }
    }
}

