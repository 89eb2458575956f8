//! Error types for Waveclip
//!
//! All errors in Waveclip use the WaveclipError type, providing
//! consistent error handling with recovery paths.

use thiserror::Error;

/// Result type alias using WaveclipError
pub type Result<T> = std::result::Result<T, WaveclipError>;

/// All possible errors in Waveclip
#[derive(Error, Debug)]
pub enum WaveclipError {
    // Transform errors
    #[error("Invalid sample range {start}..{end} for buffer of {len} frames")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("Channel {channel} holds {actual} frames, expected {expected}")]
    InconsistentChannelLength {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    // Encoder errors
    #[error("Encoding failed: {reason}")]
    EncodingFailure { reason: String },

    // Decode-side errors
    #[error("Unsupported source format: {format}")]
    UnsupportedSourceFormat { format: String },

    #[error("Failed to read audio file: {path}")]
    ReadError {
        path: String,
        #[source]
        source: hound::Error,
    },

    // Generic I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WaveclipError {
    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "Clamp the selection to the buffer before applying",
            Self::InconsistentChannelLength { .. } => {
                "Rebuild the buffer from a single decode; channels must be equal length"
            }
            Self::EncodingFailure { .. } => "Check the buffer contents and retry the export",
            Self::UnsupportedSourceFormat { .. } => "Use a WAV, MP3, or OGG file",
            Self::ReadError { .. } => "Check that the file exists and is a valid WAV file",
            Self::Io(_) => "Check file permissions and available disk space",
        }
    }
}
