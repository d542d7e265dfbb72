//! Error types for bit vector operations.
//!
//! Read-side out-of-range access is never an error (it reads as `false`) and
//! write-side out-of-range access grows the vector, so the variants below only
//! cover malformed operands, bad ranges and serialization failures. All of them
//! use the `thiserror` crate for ergonomic error handling.

use thiserror::Error;

/// The main error type for wordbits operations.
#[derive(Error, Debug)]
pub enum BitVectorError {
    /// A required operand is structurally unusable (e.g. raw words that do not
    /// match the declared length).
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// A bit range is reversed or reaches past the end of the vector.
    #[error("Invalid range: [{start}, {end}) for length {length}")]
    Range {
        /// Range start (inclusive)
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Length of the vector the range was applied to
        length: usize,
    },

    /// Decoded length field cannot be represented on this platform.
    #[error("Unmarshalling error: type mismatch (length field {length})")]
    TypeMismatch {
        /// The raw length field read from the payload
        length: u64,
    },

    /// Input ended before the declared payload was complete.
    #[error("Unexpected EOF: expected {expected} bytes, got {actual}")]
    UnexpectedEof {
        /// Bytes required by the header
        expected: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Base64 payload could not be decoded
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// JSON wrapper could not be parsed or produced
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for wordbits operations.
pub type Result<T> = std::result::Result<T, BitVectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BitVectorError::Range {
            start: 10,
            end: 4,
            length: 64,
        };
        assert_eq!(err.to_string(), "Invalid range: [10, 4) for length 64");

        let err = BitVectorError::UnexpectedEof {
            expected: 24,
            actual: 16,
        };
        assert_eq!(err.to_string(), "Unexpected EOF: expected 24 bytes, got 16");

        let err = BitVectorError::TypeMismatch { length: u64::MAX };
        assert!(err.to_string().contains("type mismatch"));
    }

    #[test]
    fn test_io_conversion() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk"))?;
            Ok(())
        }

        assert!(matches!(fails(), Err(BitVectorError::Io(_))));
    }
}
