use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning an asset range into a label strip.
#[derive(Error, Debug)]
pub enum LabelError {
    /// An asset ID string was not of the form `XXX-YYY`.
    #[error("Invalid asset ID format: {input}. {reason}")]
    Format {
        /// The text that failed to parse.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The range start sorts after its end.
    #[error("Starting asset ID ({start}) cannot be greater than ending asset ID ({end}).")]
    InvertedRange {
        /// Formatted start ID.
        start: String,
        /// Formatted end ID.
        end: String,
    },

    /// An external program could not be spawned or exited unsuccessfully.
    #[error("{program} failed: {reason}")]
    ExternalTool {
        /// Name of the program that was run.
        program: String,
        /// Spawn error or exit status.
        reason: String,
    },

    /// An explicitly requested font file was unusable.
    #[error("Failed to load font {}: {}", .path.display(), .reason)]
    Font {
        /// Path of the font file.
        path: PathBuf,
        /// Why it could not be used.
        reason: String,
    },

    /// The QR payload does not fit any symbol version.
    #[error("QR encode error: {0}")]
    Qr(#[from] qrcode::types::QrError),

    /// Encoding or writing the output image failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A layout file could not be read or deserialized.
    #[error("Layout error: {message}")]
    Layout {
        /// Description including the offending path.
        message: String,
    },
}

impl LabelError {
    pub(crate) fn format(input: &str, reason: impl Into<String>) -> Self {
        LabelError::Format {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn external(program: &str, reason: impl ToString) -> Self {
        LabelError::ExternalTool {
            program: program.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LabelError>;
