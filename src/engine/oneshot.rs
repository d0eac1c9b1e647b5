//! src/engine/oneshot.rs
//! Single-call encrypt/decrypt over [`Cryptor`].
//!
//! These are the reference implementations the chunking-invariance tests
//! compare streamed output against, and the convenient entry point for
//! callers that hold the whole message in memory.

use crate::aliases::{Aes256Key32, Iv16};
use crate::config::{Direction, Mode, Padding};
use crate::engine::Cryptor;
use crate::error::BlockflowError;

fn one_shot(
    key: &Aes256Key32,
    iv: Option<&Iv16>,
    mode: Mode,
    padding: Padding,
    direction: Direction,
    input: &[u8],
) -> Result<Vec<u8>, BlockflowError> {
    let mut cryptor = Cryptor::new(key, iv, mode, padding, direction)?;
    // Worst-case bound; exact for everything except PKCS#7 decryption,
    // where the pad is stripped below.
    let bound = cryptor.predicted_len(input.len(), true)?;
    let mut out = vec![0u8; bound];
    let n = cryptor.update(input, &mut out)?;
    let m = cryptor.finalize(&mut out[n..])?;
    out.truncate(n + m);
    Ok(out)
}

/// Encrypts `plaintext` in one call.
///
/// Without padding the plaintext must be a whole number of blocks
/// (`Alignment` otherwise); with PKCS#7 the ciphertext is always longer
/// than the plaintext by one to sixteen bytes.
pub fn encrypt(
    key: &Aes256Key32,
    iv: Option<&Iv16>,
    mode: Mode,
    padding: Padding,
    plaintext: &[u8],
) -> Result<Vec<u8>, BlockflowError> {
    one_shot(key, iv, mode, padding, Direction::Encrypt, plaintext)
}

/// Decrypts `ciphertext` in one call, stripping PKCS#7 when configured.
pub fn decrypt(
    key: &Aes256Key32,
    iv: Option<&Iv16>,
    mode: Mode,
    padding: Padding,
    ciphertext: &[u8],
) -> Result<Vec<u8>, BlockflowError> {
    one_shot(key, iv, mode, padding, Direction::Decrypt, ciphertext)
}
