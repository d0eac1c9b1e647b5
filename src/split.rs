//! src/split.rs
//! The two-phase split policy used by the multi-call regression tests.
//!
//! Historic harnesses fed ciphers in two deliberately-adversarial chunks,
//! the first one byte short of a block boundary, to prove that irregular
//! chunking reproduces single-shot output. The exact formula — including
//! its odd clamping rule — is preserved bit-for-bit here so test traffic
//! generated from it matches the historic suites.

use crate::error::BlockflowError;

/// Splits `total` input bytes into the feed sizes the two-phase policy
/// prescribes.
///
/// The first chunk is `(total / bs) * bs - 1` — one byte short of the
/// highest block boundary — and the second is the rest. Two quirks of the
/// original formula are kept verbatim rather than "fixed":
///
/// - when the first chunk would exceed one block (`p1 > bs`), the whole
///   input is fed in a single call instead;
/// - when the first chunk would be zero or negative (inputs shorter than
///   one block plus a byte), the whole input is fed in a single call.
///
/// So for `total = 17, bs = 16` the result is `[15, 2]`, while both
/// `total = 15` and `total = 33` collapse to a single feed.
pub fn split_feed(total: usize, block_size: usize) -> Result<Vec<usize>, BlockflowError> {
    if block_size == 0 {
        return Err(BlockflowError::InvalidParameter(
            "block size must be positive".into(),
        ));
    }
    let p1 = ((total / block_size) * block_size) as i64 - 1;
    if p1 <= 0 || p1 > block_size as i64 {
        return Ok(vec![total]);
    }
    let p1 = p1 as usize;
    Ok(vec![p1, total - p1])
}
