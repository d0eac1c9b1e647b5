//! src/engine/cryptor.rs
//! AES-256 streaming cryptor: ECB / CBC / CTR with optional PKCS#7.
//!
//! The block permutation is delegated to the `aes` crate; everything
//! around it — chunk buffering, CBC chaining, the CTR keystream, padding
//! at finalize — lives here. An embedded [`CipherSession`] does the
//! length accounting, and every byte count this type produces is checked
//! against it.

use crate::aliases::{Aes256Key32, Block16, Iv16};
use crate::config::{validate, Direction, Mode, Padding};
use crate::consts::AES_BLOCK_SIZE;
use crate::error::BlockflowError;
use crate::session::CipherSession;
use crate::utils::{increment_counter, xor_blocks};
use secure_gate::{RevealSecret, RevealSecretMut};
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes256Dec, Aes256Enc, Block as AesBlock};

/// Incremental AES cryptor.
///
/// Input may be fed in chunks of any size, zero included; the
/// concatenated output across `update` calls plus `finalize` is
/// bit-identical to processing the whole input in one call.
///
/// The caller sizes output slices with [`predicted_len`](Self::predicted_len);
/// an under-sized slice is rejected with `BufferTooSmall` before any
/// state changes.
pub struct Cryptor {
    session: CipherSession,
    enc: Aes256Enc,
    dec: Aes256Dec,
    mode: Mode,
    padding: Padding,
    direction: Direction,
    // CBC chaining value or CTR counter. Ciphertext-derived, not secret.
    chain: [u8; 16],
    // Input accepted but not yet transformed. Holds up to one block; for
    // PKCS#7 decryption it holds exactly one block whenever the running
    // total is aligned (the possibly-padding block).
    pending: Block16,
    pending_len: usize,
    // CTR keystream remainder; `ks_used == 16` means none available.
    keystream: Block16,
    ks_used: usize,
}

impl Cryptor {
    /// Creates a cryptor for the given configuration.
    ///
    /// CBC and CTR require an IV (the initial counter block, for CTR);
    /// ECB forbids one.
    pub fn new(
        key: &Aes256Key32,
        iv: Option<&Iv16>,
        mode: Mode,
        padding: Padding,
        direction: Direction,
    ) -> Result<Self, BlockflowError> {
        validate(AES_BLOCK_SIZE, mode, padding)?;
        let chain = match (mode.needs_iv(), iv) {
            (true, Some(iv)) => *iv.expose_secret(),
            (true, None) => {
                return Err(BlockflowError::InvalidParameter(format!(
                    "{mode:?} mode requires an IV"
                )))
            }
            (false, None) => [0u8; 16],
            (false, Some(_)) => {
                return Err(BlockflowError::InvalidParameter(
                    "ECB mode takes no IV".into(),
                ))
            }
        };
        Ok(Self {
            session: CipherSession::new(AES_BLOCK_SIZE, mode, padding, direction)?,
            enc: Aes256Enc::new(key.expose_secret().into()),
            dec: Aes256Dec::new(key.expose_secret().into()),
            mode,
            padding,
            direction,
            chain,
            pending: Block16::new([0u8; 16]),
            pending_len: 0,
            keystream: Block16::new([0u8; 16]),
            ks_used: AES_BLOCK_SIZE,
        })
    }

    /// Feeds `input` and writes the bytes this call releases into
    /// `output`, returning how many were written.
    ///
    /// The count always equals `predicted_len(input.len(), false)`. No
    /// state changes when an error is returned.
    pub fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, BlockflowError> {
        let needed = self.session.predicted_len(input.len(), false)?;
        if output.len() < needed {
            return Err(BlockflowError::BufferTooSmall {
                needed,
                provided: output.len(),
            });
        }
        if self.mode.is_stream() {
            self.ctr_xor(input, &mut output[..needed]);
        } else {
            self.block_update(input, &mut output[..needed]);
        }
        let accounted = self.session.update(input.len())?;
        debug_assert_eq!(accounted, needed);
        debug_assert_eq!(self.session.buffered(), self.pending_len);
        Ok(needed)
    }

    /// Ends the session: applies PKCS#7 (encrypt), validates and strips
    /// it (decrypt), or checks alignment (no padding). Returns the number
    /// of bytes written to `output`.
    ///
    /// Errors (`Alignment`, `Decode`, `BufferTooSmall`) leave the cryptor
    /// untouched.
    pub fn finalize(&mut self, output: &mut [u8]) -> Result<usize, BlockflowError> {
        // Catches alignment failures and finalize-after-finalize before
        // anything is mutated.
        self.session.predicted_len(0, true)?;
        let written = match (self.padding, self.direction) {
            _ if self.mode.is_stream() => 0,
            (Padding::None, _) => 0,
            (Padding::Pkcs7, Direction::Encrypt) => self.finalize_pad(output)?,
            (Padding::Pkcs7, Direction::Decrypt) => self.finalize_strip(output)?,
        };
        self.session.finalize()?;
        Ok(written)
    }

    /// Output length of the next `update(n)` call — plus `finalize` when
    /// `is_final` — given the bytes currently buffered. Pure.
    ///
    /// For PKCS#7 decryption with `is_final` this is the worst-case upper
    /// bound; `finalize` itself returns the exact count once the pad byte
    /// is readable.
    pub fn predicted_len(&self, n: usize, is_final: bool) -> Result<usize, BlockflowError> {
        self.session.predicted_len(n, is_final)
    }

    /// Replaces the chaining value (CBC) or counter (CTR) with a fresh
    /// IV, leaving buffered input untouched.
    ///
    /// This mirrors the historic `CCCryptorReset` contract: a mid-stream
    /// re-key of the chaining state only. Use [`reset`](Self::reset) to
    /// discard buffered bytes as well.
    pub fn reset_with_iv(&mut self, iv: &Iv16) -> Result<(), BlockflowError> {
        if !self.mode.needs_iv() {
            return Err(BlockflowError::InvalidParameter(
                "ECB mode takes no IV".into(),
            ));
        }
        self.chain = *iv.expose_secret();
        self.ks_used = AES_BLOCK_SIZE;
        Ok(())
    }

    /// Returns the cryptor to its freshly-created state under the same
    /// key and configuration, with `iv` as the new chaining value.
    pub fn reset(&mut self, iv: Option<&Iv16>) -> Result<(), BlockflowError> {
        match (self.mode.needs_iv(), iv) {
            (true, Some(iv)) => self.chain = *iv.expose_secret(),
            (true, None) => {
                return Err(BlockflowError::InvalidParameter(format!(
                    "{:?} mode requires an IV",
                    self.mode
                )))
            }
            (false, None) => self.chain = [0u8; 16],
            (false, Some(_)) => {
                return Err(BlockflowError::InvalidParameter(
                    "ECB mode takes no IV".into(),
                ))
            }
        }
        self.pending_len = 0;
        self.pending.expose_secret_mut().fill(0);
        self.ks_used = AES_BLOCK_SIZE;
        self.session.reset();
        Ok(())
    }

    /// Input bytes accepted but not yet emitted.
    #[inline]
    pub fn buffered(&self) -> usize {
        self.pending_len
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    // ── block-mode path ─────────────────────────────────────────────────

    /// Emits `out.len()` bytes (a whole number of blocks, already bounded
    /// by the session arithmetic) from the pending fragment plus `input`,
    /// then stashes the remainder.
    fn block_update(&mut self, input: &[u8], out: &mut [u8]) {
        let bs = AES_BLOCK_SIZE;
        debug_assert_eq!(out.len() % bs, 0);
        let mut consumed = 0;
        let mut written = 0;
        while written < out.len() {
            // Top the pending fragment up to a full block. The emission
            // budget guarantees the bytes are there.
            if self.pending_len < bs {
                let take = (bs - self.pending_len).min(input.len() - consumed);
                self.pending.expose_secret_mut()[self.pending_len..self.pending_len + take]
                    .copy_from_slice(&input[consumed..consumed + take]);
                self.pending_len += take;
                consumed += take;
            }
            debug_assert_eq!(self.pending_len, bs);
            let mut block = [0u8; 16];
            block.copy_from_slice(self.pending.expose_secret());
            self.pending_len = 0;
            self.transform_block(&mut block);
            out[written..written + bs].copy_from_slice(&block);
            written += bs;
        }
        // Remainder: at most one block, including the held-back possible
        // padding block on the PKCS#7 decrypt path.
        let rest = input.len() - consumed;
        self.pending.expose_secret_mut()[self.pending_len..self.pending_len + rest]
            .copy_from_slice(&input[consumed..]);
        self.pending_len += rest;
    }

    /// Transforms one block in place, advancing the CBC chain.
    fn transform_block(&mut self, block: &mut [u8; 16]) {
        match (self.mode, self.direction) {
            (Mode::Ecb, Direction::Encrypt) => {
                let mut aes_block = AesBlock::from(*block);
                self.enc.encrypt_block(&mut aes_block);
                block.copy_from_slice(aes_block.as_slice());
            }
            (Mode::Ecb, Direction::Decrypt) => {
                let mut aes_block = AesBlock::from(*block);
                self.dec.decrypt_block(&mut aes_block);
                block.copy_from_slice(aes_block.as_slice());
            }
            (Mode::Cbc, Direction::Encrypt) => {
                let mut xored = [0u8; 16];
                xor_blocks(block, &self.chain, &mut xored);
                let mut aes_block = AesBlock::from(xored);
                self.enc.encrypt_block(&mut aes_block);
                block.copy_from_slice(aes_block.as_slice());
                self.chain = *block;
            }
            (Mode::Cbc, Direction::Decrypt) => {
                let ciphertext = *block;
                let mut aes_block = AesBlock::from(ciphertext);
                self.dec.decrypt_block(&mut aes_block);
                xor_blocks(aes_block.as_slice(), &self.chain, block);
                self.chain = ciphertext;
            }
            (Mode::Ctr, _) => unreachable!("CTR uses the keystream path"),
        }
    }

    // ── stream (CTR) path ───────────────────────────────────────────────

    /// XORs `input` against the keystream. The partial keystream block
    /// carries across calls so chunking never shifts the stream.
    fn ctr_xor(&mut self, input: &[u8], out: &mut [u8]) {
        for (i, &byte) in input.iter().enumerate() {
            if self.ks_used == AES_BLOCK_SIZE {
                let mut aes_block = AesBlock::from(self.chain);
                self.enc.encrypt_block(&mut aes_block);
                self.keystream
                    .expose_secret_mut()
                    .copy_from_slice(aes_block.as_slice());
                increment_counter(&mut self.chain);
                self.ks_used = 0;
            }
            out[i] = byte ^ self.keystream.expose_secret()[self.ks_used];
            self.ks_used += 1;
        }
    }

    // ── finalize paths ──────────────────────────────────────────────────

    /// PKCS#7 encrypt finalize: remainder plus pad is always exactly one
    /// block, a full pad block when the input was aligned.
    fn finalize_pad(&mut self, output: &mut [u8]) -> Result<usize, BlockflowError> {
        let bs = AES_BLOCK_SIZE;
        if output.len() < bs {
            return Err(BlockflowError::BufferTooSmall {
                needed: bs,
                provided: output.len(),
            });
        }
        let pad = (bs - self.pending_len) as u8;
        let mut block = [0u8; 16];
        block[..self.pending_len].copy_from_slice(&self.pending.expose_secret()[..self.pending_len]);
        block[self.pending_len..].fill(pad);
        self.pending_len = 0;
        self.pending.expose_secret_mut().fill(0);
        self.transform_block(&mut block);
        output[..bs].copy_from_slice(&block);
        Ok(bs)
    }

    /// PKCS#7 decrypt finalize: decrypts the held-back block, validates
    /// the pad structurally, and emits the data bytes in front of it.
    ///
    /// The block is decrypted into a local copy first so that `Decode`
    /// and `BufferTooSmall` can be reported without disturbing any state.
    fn finalize_strip(&mut self, output: &mut [u8]) -> Result<usize, BlockflowError> {
        let bs = AES_BLOCK_SIZE;
        debug_assert_eq!(self.pending_len, bs);
        let mut ciphertext = [0u8; 16];
        ciphertext.copy_from_slice(self.pending.expose_secret());
        let mut aes_block = AesBlock::from(ciphertext);
        self.dec.decrypt_block(&mut aes_block);
        let mut plaintext = Block16::new([0u8; 16]);
        match self.mode {
            Mode::Cbc => xor_blocks(
                aes_block.as_slice(),
                &self.chain,
                plaintext.expose_secret_mut(),
            ),
            Mode::Ecb => plaintext
                .expose_secret_mut()
                .copy_from_slice(aes_block.as_slice()),
            Mode::Ctr => unreachable!("stream modes carry no padding"),
        }
        let pad = plaintext.expose_secret()[bs - 1] as usize;
        if pad == 0 || pad > bs {
            return Err(BlockflowError::Decode(format!(
                "pad length byte {pad} outside 1..={bs}"
            )));
        }
        if plaintext.expose_secret()[bs - pad..]
            .iter()
            .any(|&b| b as usize != pad)
        {
            return Err(BlockflowError::Decode("inconsistent pad bytes".into()));
        }
        let data_len = bs - pad;
        if output.len() < data_len {
            return Err(BlockflowError::BufferTooSmall {
                needed: data_len,
                provided: output.len(),
            });
        }
        output[..data_len].copy_from_slice(&plaintext.expose_secret()[..data_len]);
        self.pending_len = 0;
        self.pending.expose_secret_mut().fill(0);
        Ok(data_len)
    }
}
