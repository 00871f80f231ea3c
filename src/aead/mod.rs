//! ChaCha20-Poly1305 authenticated encryption (RFC 8439).
//!
//! This module composes the ChaCha20 stream cipher and the Poly1305
//! one-time MAC into the RFC 8439 AEAD construction:
//!
//! - [`seal`] encrypts a plaintext and appends the 16-byte tag computed
//!   over the associated data and the ciphertext.
//! - [`open`] recovers the plaintext from `ciphertext || tag`.
//!
//! # `open` does not verify the tag
//!
//! This is the single most important contract of this module, inherited
//! from the Meridian gateway transport, where frame integrity is enforced
//! by an outer authentication layer before decryption is ever attempted.
//! `open` is a pure keystream XOR: it will "successfully" decrypt a
//! tampered ciphertext into garbage.
//!
//! Callers without an outer integrity layer must verify before trusting
//! plaintext:
//!
//! ```
//! use meridian_crypto::aead;
//!
//! let key = [0x42u8; 32];
//! let nonce = [7u8; 12];
//! let ad = b"frame-header";
//!
//! let mut sealed = [0u8; 5 + 16];
//! aead::seal(&key, &nonce, ad, b"hello", &mut sealed).unwrap();
//!
//! // Receiving side: recompute the tag over the ciphertext and compare
//! // in constant time before decrypting.
//! let (ciphertext, tag) = sealed.split_at(sealed.len() - 16);
//! let expected = aead::compute_tag(&key, &nonce, ad, ciphertext);
//! assert!(aead::verify_tag(&expected, tag.try_into().unwrap()));
//!
//! let mut plaintext = [0u8; 5];
//! aead::open(&key, &nonce, &sealed, &mut plaintext).unwrap();
//! assert_eq!(&plaintext, b"hello");
//! ```
//!
//! # Buffer discipline
//!
//! Both entry points write into a caller-provided output buffer and refuse
//! to run when the input and output address ranges intersect, returning
//! [`AeadError::Overlap`] before any byte is written. An in-place XOR over
//! overlapping but misaligned regions would corrupt data silently; the
//! explicit range check keeps that failure loud even for buffers derived
//! from raw pointers.

mod core;

pub use self::core::{AeadError, TAG_SIZE, compute_tag, open, seal, verify_tag};
