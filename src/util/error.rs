//! Error types for the skin library.

use thiserror::Error;

use crate::platform::Platform;

/// Main error type for skin operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Native skin data for a platform the codec cannot handle
    #[error("unsupported native skin platform: {0}")]
    UnsupportedNativePlatform(Platform),

    /// Stream ended before the payload was complete
    #[error("unexpected end of stream at offset {0}")]
    UnexpectedEof(u64),

    /// Header or payload violates the data model
    #[error("invalid skin data: {0}")]
    InvalidStructure(String),

    /// Duplicating a geometry that carries platform-native skin data
    #[error("cannot duplicate geometry with platform-native skin data")]
    UnsupportedDuplicate,

    /// I/O error from the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }
}

/// Result type alias for skin operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::UnsupportedNativePlatform(Platform::Gl3);
        assert!(e.to_string().contains("GL3"));

        let e = Error::UnexpectedEof(37);
        assert!(e.to_string().contains("37"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
