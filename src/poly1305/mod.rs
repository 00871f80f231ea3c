//! Poly1305 one-time message authentication code (RFC 8439).
//!
//! This module implements Poly1305 as an incremental accumulator over
//! 2¹³⁰ − 5 arithmetic. A message may be absorbed through any number of
//! [`Poly1305::update`] calls, with chunks of any size; the resulting tag
//! depends only on the key and the concatenated bytes, never on the split.
//!
//! The key is **one-time**: authenticating two different messages under the
//! same Poly1305 key forfeits all security. In the ChaCha20-Poly1305 AEAD
//! construction ([`crate::aead`]) the key is derived freshly per message
//! from ChaCha20 block 0.
//!
//! `finalize` consumes the accumulator, so the
//! UNINITIALIZED → ACCUMULATING → FINALIZED state machine is enforced by
//! the type system: an update after finalization does not compile.

mod core;

pub use self::core::Poly1305;
