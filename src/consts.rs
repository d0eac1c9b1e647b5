//! Global constants for the streaming cipher core.
//!
//! Block-size limits and the PKCS#7 pad-value ceiling.

/// AES block size in bytes. The byte-carrying engine operates exclusively
/// at this granularity.
pub const AES_BLOCK_SIZE: usize = 16;

/// Block size of legacy 64-bit ciphers (DES, 3DES, RC2). Supported by the
/// arithmetic session, not by the AES-backed engine.
pub const LEGACY_BLOCK_SIZE: usize = 8;

/// Largest block size the byte-carrying engine will accept.
pub const MAX_BLOCK_SIZE: usize = 16;
