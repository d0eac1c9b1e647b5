//! # Error Types
//!
//! This module defines the error types used throughout the library.
//! All operations return [`Result<T, BlockflowError>`](BlockflowError).

use thiserror::Error;

/// The error type for all streaming-cipher operations.
///
/// Every failure is deterministic and reported synchronously to the caller
/// of the failing operation; a session is never left partially mutated by
/// an operation that returns an error.
#[derive(Error, Debug)]
pub enum BlockflowError {
    /// Malformed configuration or argument.
    ///
    /// Raised for a zero block size, PKCS#7 padding requested on a stream
    /// mode, a missing/forbidden IV, or an operation invoked on an
    /// already-finalized session.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Finalize invoked with a non-alignable amount of buffered input.
    ///
    /// For no-padding block modes this means the buffered remainder is not
    /// empty; for PKCS#7 decryption it means the ciphertext fed so far is
    /// not a whole positive number of blocks.
    #[error("Alignment error: {0}")]
    Alignment(String),

    /// Caller-supplied output slice is smaller than the predicted output
    /// length for this call.
    #[error("Output buffer too small: need {needed} bytes, got {provided}")]
    BufferTooSmall { needed: usize, provided: usize },

    /// Decryption finalize found structurally invalid PKCS#7 padding.
    ///
    /// Either the pad length byte is outside `1..=block_size` or the pad
    /// bytes are not all equal to it (wrong key, corrupt ciphertext, or
    /// ciphertext that was never padded).
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<&'static str> for BlockflowError {
    fn from(msg: &'static str) -> Self {
        BlockflowError::InvalidParameter(msg.to_string())
    }
}
