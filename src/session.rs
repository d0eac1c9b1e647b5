//! src/session.rs
//! The streaming-cipher length accumulator.
//!
//! [`CipherSession`] models the state a block-cipher streaming session
//! must track across an arbitrary sequence of `update` calls so that
//! (a) chunking the input differently never changes the concatenated
//! output, and (b) the output length of any update/finalize call can be
//! computed *before* making it, from the buffered-byte count alone.
//!
//! The session carries no key material and no data bytes. It is pure
//! integer arithmetic over `(buffered, n, block_size)`, which is exactly
//! what makes the prediction contract checkable: the byte-carrying
//! [`Cryptor`](crate::engine::Cryptor) embeds one of these and asserts
//! its own byte counts against it on every call.

use crate::config::{validate, Direction, Mode, Padding};
use crate::error::BlockflowError;

/// Length accumulator for one streaming cipher session.
///
/// Created once with a fixed `(block_size, mode, padding, direction)`
/// configuration; mutated by [`update`](Self::update) and
/// [`finalize`](Self::finalize); reusable after [`reset`](Self::reset).
///
/// Buffering rules:
/// - stream modes (CTR): nothing buffers, every byte passes through;
/// - block modes without padding, and PKCS#7 encryption: full blocks pass
///   through, the sub-block remainder buffers (`buffered < block_size`);
/// - PKCS#7 decryption: additionally holds back one full block whenever
///   the running total is block-aligned, because the last block of the
///   stream carries the pad and must not be emitted early (`buffered`
///   can reach exactly `block_size`).
#[derive(Debug, Clone)]
pub struct CipherSession {
    block_size: usize,
    mode: Mode,
    padding: Padding,
    direction: Direction,
    buffered: usize,
    total_fed: u64,
    finalized: bool,
}

impl CipherSession {
    /// Creates a session. Fails on a zero block size or PKCS#7 combined
    /// with a stream mode.
    pub fn new(
        block_size: usize,
        mode: Mode,
        padding: Padding,
        direction: Direction,
    ) -> Result<Self, BlockflowError> {
        validate(block_size, mode, padding)?;
        Ok(Self {
            block_size,
            mode,
            padding,
            direction,
            buffered: 0,
            total_fed: 0,
            finalized: false,
        })
    }

    /// Output length of a non-final call that feeds `n` bytes, given the
    /// current buffered count. Pure.
    fn update_len(&self, n: usize) -> usize {
        if self.mode.is_stream() {
            return n;
        }
        let bs = self.block_size;
        let total = self.buffered + n;
        if self.padding == Padding::Pkcs7 && self.direction == Direction::Decrypt {
            // Hold back one block when aligned: it may be the pad block.
            if total > 0 && total % bs == 0 {
                return (total / bs - 1) * bs;
            }
        }
        (total / bs) * bs
    }

    /// Output length of the finalize call, given the current buffered
    /// count. Pure. Errors mirror the ones `finalize` itself raises.
    fn final_len(&self) -> Result<usize, BlockflowError> {
        if self.mode.is_stream() {
            return Ok(0);
        }
        let bs = self.block_size;
        match (self.padding, self.direction) {
            (Padding::None, _) => {
                if self.buffered != 0 {
                    Err(BlockflowError::Alignment(format!(
                        "{} buffered bytes cannot be finalized without padding",
                        self.buffered
                    )))
                } else {
                    Ok(0)
                }
            }
            // Remainder plus pad always fills exactly one block, including
            // the full pad block emitted for aligned input.
            (Padding::Pkcs7, Direction::Encrypt) => Ok(bs),
            // Worst case: the held-back block is all data except one pad
            // byte. The engine, which can read the pad byte, returns the
            // exact count; callers sizing buffers use this bound.
            (Padding::Pkcs7, Direction::Decrypt) => {
                if self.buffered != bs {
                    Err(BlockflowError::Alignment(format!(
                        "PKCS#7 decryption requires exactly one buffered block at finalize, have {} bytes",
                        self.buffered
                    )))
                } else {
                    Ok(bs)
                }
            }
        }
    }

    fn check_live(&self) -> Result<(), BlockflowError> {
        if self.finalized {
            Err(BlockflowError::InvalidParameter(
                "session already finalized; call reset() first".into(),
            ))
        } else {
            Ok(())
        }
    }

    /// Feeds `n` more input bytes and returns how many output bytes this
    /// call produces. Never fails for a live session; the buffered count
    /// is the only state that changes.
    pub fn update(&mut self, n: usize) -> Result<usize, BlockflowError> {
        self.check_live()?;
        let out = self.update_len(n);
        self.buffered = self.buffered + n - out;
        self.total_fed += n as u64;
        Ok(out)
    }

    /// Ends the session and returns the length of the final output.
    ///
    /// `Alignment` when a no-padding block session holds a non-empty
    /// remainder, or when a PKCS#7 decrypt session does not hold exactly
    /// one block. The session is left untouched on error.
    pub fn finalize(&mut self) -> Result<usize, BlockflowError> {
        self.check_live()?;
        let out = self.final_len()?;
        self.buffered = 0;
        self.finalized = true;
        Ok(out)
    }

    /// Side-effect-free output length of `update(n)` — plus the finalize
    /// output when `is_final` — from the current session state.
    ///
    /// This is the prediction contract: the value equals what the calls
    /// will actually return, with one documented exception — for PKCS#7
    /// *decryption* with `is_final` the pad length is unknowable without
    /// the ciphertext bytes, so the value is the worst-case upper bound
    /// (the `CCCryptorGetOutputLength` convention).
    pub fn predicted_len(&self, n: usize, is_final: bool) -> Result<usize, BlockflowError> {
        self.check_live()?;
        let update_out = self.update_len(n);
        if !is_final {
            return Ok(update_out);
        }
        // Evaluate the finalize component against the post-update state.
        let mut after = self.clone();
        after.buffered = after.buffered + n - update_out;
        Ok(update_out + after.final_len()?)
    }

    /// Returns the session to its freshly-created state.
    pub fn reset(&mut self) {
        self.buffered = 0;
        self.total_fed = 0;
        self.finalized = false;
    }

    /// Input bytes accepted but not yet emitted as output.
    #[inline]
    pub fn buffered(&self) -> usize {
        self.buffered
    }

    /// Total input bytes fed over the session's lifetime. Diagnostic only.
    #[inline]
    pub fn total_fed(&self) -> u64 {
        self.total_fed
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}
