// src/lib.rs

//! Incremental block-cipher streaming: buffering, chaining, PKCS#7
//! padding and exact output-length prediction over the AES-256 block
//! primitive.
//!
//! Two layers:
//! - [`CipherSession`] — the pure length accumulator: predicts, for any
//!   buffered state and chunk size, exactly how many bytes an
//!   update/finalize call produces;
//! - [`Cryptor`] — the byte-carrying engine (AES-256 ECB/CBC/CTR) whose
//!   counts are checked against the accumulator on every call.

pub mod aliases;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod session;
pub mod split;
pub mod utils;

// High-level API — this is what most users import
pub use config::{Direction, Mode, Padding};
pub use engine::{decrypt, encrypt, Cryptor};
pub use error::BlockflowError;
pub use session::CipherSession;
pub use split::split_feed;
