//! # Secure-Gate Type Aliases
//!
//! Fixed-size secret wrappers from [`secure-gate`](https://github.com/Slurp9187/secure-gate)
//! for the key material the engine holds. All types zeroize on drop and
//! require explicit `.expose_secret()` / `.expose_secret_mut()` access.
//!
//! - [`Aes256Key32`] - 32-byte AES-256 key
//! - [`Iv16`] - 16-byte IV (CBC) or initial counter block (CTR)
//! - [`Block16`] - one 16-byte working block (buffered plaintext fragments)

use secure_gate::fixed_alias;

/// Generic secure stack buffer.
pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

/// One AES block of in-flight plaintext.
pub type Block16 = SpanBuffer<16>;

fixed_alias!(pub Aes256Key32, 32); // cipher key
fixed_alias!(pub Iv16, 16); // IV / initial counter
