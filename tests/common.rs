//! tests/common.rs
//! Shared fixtures for the integration suites.
//!
//! Key and IVs are the NIST SP 800-38A AES-256 example values so the
//! engine suites can pin output to the published ciphertexts.

use blockflow::aliases::{Aes256Key32, Iv16};

/// AES-256 key from SP 800-38A, appendix F.
pub const NIST_KEY_HEX: &str = "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4";

/// CBC IV from SP 800-38A F.2.5/F.2.6.
#[allow(dead_code)] // Used across multiple test files
pub const CBC_IV_HEX: &str = "000102030405060708090a0b0c0d0e0f";

/// CTR initial counter block from SP 800-38A F.5.5/F.5.6.
#[allow(dead_code)] // Used across multiple test files
pub const CTR_IV_HEX: &str = "f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff";

/// First two plaintext blocks from SP 800-38A.
#[allow(dead_code)] // Used across multiple test files
pub const NIST_PT_HEX: &str = "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51";

#[allow(dead_code)] // Used across multiple test files
pub fn test_key() -> Aes256Key32 {
    let bytes = hex::decode(NIST_KEY_HEX).unwrap();
    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes);
    Aes256Key32::new(key)
}

#[allow(dead_code)] // Used across multiple test files
pub fn iv_from_hex(iv_hex: &str) -> Iv16 {
    let bytes = hex::decode(iv_hex).unwrap();
    let mut iv = [0u8; 16];
    iv.copy_from_slice(&bytes);
    Iv16::new(iv)
}
