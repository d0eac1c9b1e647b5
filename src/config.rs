//! Cipher configuration: mode of operation, padding scheme, direction.
//!
//! A configuration is fixed at session creation and never changes over the
//! session's lifetime. Validation lives here so both the arithmetic
//! session and the byte-carrying engine reject the same inputs.

use crate::error::BlockflowError;

/// Block-cipher mode of operation.
///
/// `Ecb` and `Cbc` are block modes (output is produced in whole blocks,
/// partial input buffers). `Ctr` turns the block cipher into a stream
/// cipher: every input byte immediately produces one output byte and
/// nothing ever buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ecb,
    Cbc,
    Ctr,
}

impl Mode {
    /// Stream-like modes emit byte-for-byte and never buffer.
    #[inline]
    pub fn is_stream(self) -> bool {
        matches!(self, Mode::Ctr)
    }

    /// Whether the mode chains blocks and therefore needs an IV (or an
    /// initial counter, for CTR).
    #[inline]
    pub fn needs_iv(self) -> bool {
        !matches!(self, Mode::Ecb)
    }
}

/// Padding scheme applied at finalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// No padding: total input must be block-aligned by finalize time.
    None,
    /// PKCS#7: `k` pad bytes each of value `k`, `k = bs - (len mod bs)`,
    /// forced to a full block when the input is already aligned.
    Pkcs7,
}

/// Direction of the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Validates a `(block_size, mode, padding)` triple.
///
/// Rejects a zero block size and PKCS#7 on a stream mode, the two
/// configurations the streaming model has no meaning for.
pub fn validate(block_size: usize, mode: Mode, padding: Padding) -> Result<(), BlockflowError> {
    if block_size == 0 {
        return Err(BlockflowError::InvalidParameter(
            "block size must be positive".into(),
        ));
    }
    if mode.is_stream() && padding == Padding::Pkcs7 {
        return Err(BlockflowError::InvalidParameter(
            "PKCS#7 padding is meaningless on a stream mode".into(),
        ));
    }
    Ok(())
}
