//! Cryptographic primitives for the Meridian gateway stack
//!
//! This crate provides the low-level cryptographic building blocks used by
//! Meridian device gateways: authenticated encryption for telemetry frames
//! and Diffie–Hellman key agreement for session setup.
//!
//! The focus is on **clarity, predictability, and auditability**, rather than
//! on providing a large or high-level cryptographic API. All components are
//! dependency-free, explicit in their semantics, and suitable for
//! security-critical code on constrained targets: no heap allocation in the
//! primitives, no floating point, fixed-size stack buffers throughout.
//!
//! # Module overview
//!
//! - `chacha20`
//!   The ChaCha20 stream cipher (RFC 8439): single-block keystream
//!   generation and arbitrary-length keystream XOR with an explicit initial
//!   block counter. Encryption and decryption are the same operation.
//!
//! - `poly1305`
//!   The Poly1305 one-time message authentication code (RFC 8439) as an
//!   incremental accumulator: a message may be absorbed in chunks of any
//!   size, in any split, and finalized to a 16-byte tag. The produced tag
//!   depends only on the key and the concatenated byte stream, never on how
//!   the stream was chunked.
//!
//! - `aead`
//!   The ChaCha20-Poly1305 AEAD composition (RFC 8439): `seal` produces
//!   `ciphertext || tag`, `open` recovers the plaintext.
//!
//!   **`open` does not verify the tag.** This is a deliberate division of
//!   responsibility inherited from the gateway's transport design, where
//!   integrity is enforced by an outer authentication layer. Callers that do
//!   not have such a layer must recompute the tag with
//!   [`aead::compute_tag`] and compare it with [`aead::verify_tag`] before
//!   trusting any decrypted byte. See the module documentation.
//!
//! - `x25519`
//!   X25519 Diffie–Hellman key agreement over Curve25519 (RFC 7748):
//!   constant-time Montgomery-ladder scalar multiplication, public-key
//!   derivation from the base point, and shared-secret computation.
//!
//! # Design goals
//!
//! - No heap allocations in core primitives
//! - Minimal and explicit APIs over fixed-size byte arrays
//! - Constant-time handling of secret data: conditional swaps and selects
//!   are mask-based, never branches
//! - Output bit-compatible with RFC 8439 and RFC 7748
//!
//! # What this crate does not do
//!
//! It does not select or manage long-term key material, does not track nonce
//! uniqueness (nonce reuse under one key is catastrophic and must be
//! prevented by the caller), does not implement certificates or trust
//! management, and does not frame or transport messages. Those concerns
//! belong to the layers above.
//!
//! This crate is not intended to replace full-featured, externally audited
//! cryptographic libraries, but to serve as a small, controlled foundation
//! for Meridian's internal cryptographic needs.

pub mod aead;
pub mod chacha20;
pub mod poly1305;
pub mod x25519;
