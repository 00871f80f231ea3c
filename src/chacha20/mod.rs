//! ChaCha20 stream cipher (RFC 8439).
//!
//! This module provides a low-level, dependency-free implementation of the
//! ChaCha20 stream cipher. It exposes two operations:
//!
//! - `block`: generate a single 64-byte keystream block for a given
//!   `(key, counter, nonce)` tuple
//! - `xor_stream`: XOR an arbitrary-length keystream over an input buffer,
//!   starting from an explicit initial block counter
//!
//! Encryption and decryption are the same XOR operation.
//!
//! This module **does not** implement authenticated encryption by itself;
//! the AEAD composition lives in [`crate::aead`]. Callers using this module
//! directly are responsible for strict nonce and counter management:
//! reusing a `(key, nonce, counter)` tuple is catastrophic for security.

mod core;

pub use self::core::{block, xor_stream};
