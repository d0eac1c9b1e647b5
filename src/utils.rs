// ============================================================================
// FILE: src/utils.rs
// ============================================================================

//! Utility functions used across the library.

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by the CBC chaining and CTR keystream paths.
///
/// # Panics (by contract)
///
/// Panics if any of `block_a`, `block_b`, or `output` is shorter than 16
/// bytes. These conditions are never hit in correct usage because all
/// callers pass exact 16-byte blocks.
///
/// # Performance
///
/// - `const fn` → usable in static contexts
/// - `#[inline(always)]` → fully inlined into the update loops
/// - Auto-vectorized by LLVM into 128-bit XOR instructions on x86-64
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// Increments a 16-byte counter block as a big-endian 128-bit integer,
/// wrapping on overflow. This is the CTR-mode counter step.
#[inline(always)]
pub fn increment_counter(counter: &mut [u8; 16]) {
    for byte in counter.iter_mut().rev() {
        let (next, carry) = byte.overflowing_add(1);
        *byte = next;
        if !carry {
            break;
        }
    }
}
