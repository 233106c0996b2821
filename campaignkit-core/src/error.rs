//! Error types for campaignkit.

use thiserror::Error;

use crate::qr::QrMode;

/// Input rejected before any output is produced.
///
/// Every variant maps to a stable [`code`](ValidationError::code) and a
/// notification [`title`](ValidationError::title); `Display` gives the
/// message shown under that title.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingRequiredField,

    #[error("Please enter a base URL")]
    MissingBaseUrl,

    #[error("Please enter a valid URL including http:// or https://")]
    InvalidUrl,

    #[error("Please enter a {}", .mode.label())]
    MissingContent { mode: QrMode },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField => "missing-required-field",
            ValidationError::MissingBaseUrl => "missing-base-url",
            ValidationError::InvalidUrl => "invalid-url",
            ValidationError::MissingContent { .. } => "missing-content",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField => "Missing information",
            ValidationError::MissingBaseUrl => "Missing URL",
            ValidationError::InvalidUrl => "Invalid URL",
            ValidationError::MissingContent { .. } => "Missing content",
        }
    }
}

/// Failure turning the rendered QR image into a downloadable file.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No QR code image has been loaded yet")]
    NotLoaded,

    #[error("Could not decode the loaded image: {0}")]
    Decode(String),

    #[error("Could not encode PNG: {0}")]
    Encode(String),
}

impl ExportError {
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::NotLoaded => "not-loaded",
            ExportError::Decode(_) => "decode-failed",
            ExportError::Encode(_) => "encode-failed",
        }
    }
}

/// Errors outside the formatters themselves (configuration, file I/O).
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration and I/O operations.
pub type ToolkitResult<T> = Result<T, ToolkitError>;
