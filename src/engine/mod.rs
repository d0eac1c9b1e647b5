// src/engine/mod.rs

//! Byte-carrying streaming cryptor.
//!
//! Core API: [`Cryptor`] — create, any number of `update` calls with
//! arbitrary chunk sizes, `finalize`. Output is byte-identical to a
//! single-shot call regardless of chunking.
//! Convenience: [`encrypt`] / [`decrypt`] one-shot wrappers.

pub(crate) mod cryptor;
pub(crate) mod oneshot;

pub use cryptor::Cryptor;
pub use oneshot::{decrypt, encrypt};
