//! Types for errors that can occur while detecting and converting encodings.
use std::path::PathBuf;

use thiserror::Error;

/// An error that can occur while re-encoding a text file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input file does not exist.
    #[error("input file not found: '{}'", .0.display())]
    FileNotFound(PathBuf),
    /// An encoding label outside the supported set was requested.
    #[error("unsupported encoding '{0}'. Supported encodings: {}", crate::enums::SUPPORTED_LABELS)]
    UnsupportedEncoding(String),
    /// The detection heuristic could not produce a candidate source encoding.
    #[error("could not detect the encoding of '{}'", .0.display())]
    DetectionFailed(PathBuf),
    /// The input bytes are not valid under the assumed source encoding.
    #[error("decoding error: {0}")]
    Decode(String),
    /// The decoded text cannot be represented in the target encoding.
    #[error("encoding error: {0}")]
    Encode(String),
    /// An I/O error while reading the input or writing the output.
    #[error("IO error: {source:?} while {context}")]
    Io {
        /// The original error.
        #[source]
        source: std::io::Error,
        /// The context in which the error occurred.
        context: String,
    },
}

/// An alias for a `Result` with [`tenc::Error`](crate::Error) as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new file-not-found [`tenc::Error`](crate::Error).
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    /// Creates a new unsupported-encoding [`tenc::Error`](crate::Error).
    pub fn unsupported_encoding(label: impl ToString) -> Self {
        Self::UnsupportedEncoding(label.to_string())
    }

    /// Creates a new detection-failed [`tenc::Error`](crate::Error).
    pub fn detection_failed(path: impl Into<PathBuf>) -> Self {
        Self::DetectionFailed(path.into())
    }

    /// Creates a new decode [`tenc::Error`](crate::Error).
    pub fn decode(msg: impl ToString) -> Self {
        Self::Decode(msg.to_string())
    }

    /// Creates a new encode [`tenc::Error`](crate::Error).
    pub fn encode(msg: impl ToString) -> Self {
        Self::Encode(msg.to_string())
    }

    /// Creates a new I/O [`tenc::Error`](crate::Error).
    pub fn io(error: std::io::Error, context: impl ToString) -> Self {
        Self::Io {
            source: error,
            context: context.to_string(),
        }
    }
}
