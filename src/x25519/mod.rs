//! X25519 Diffie–Hellman key agreement (RFC 7748).
//!
//! This module implements Curve25519 scalar multiplication using the
//! Montgomery ladder, together with the two conveniences built on it:
//! public-key derivation from the fixed base point and shared-secret
//! computation from a private scalar and a peer public key.
//!
//! ## Structure
//!
//! - `field`
//!   Arithmetic modulo 2²⁵⁵ − 19 on eight 32-bit limbs: lazily reduced
//!   add/sub/mul/square, mask-based conditional swap, fixed-chain
//!   inversion, and constant-time canonical encoding.
//!
//! - `core`
//!   Scalar clamping, the ladder itself, and the public API.
//!
//! The separation mirrors the structure used by the other cryptographic
//! modules of the crate, keeping algorithmic details isolated while
//! exposing a small, explicit interface.
//!
//! ## Security
//!
//! - Constant-time with respect to the private scalar: the ladder
//!   processes every bit position identically and selects points through
//!   arithmetic masks, never branches.
//! - Peer public keys are not validated beyond the RFC 7748 top-bit mask;
//!   low-order inputs produce an all-zero shared secret, reported through
//!   the diagnostic flag of [`scalar_mult`].

mod core;
mod field;

pub use self::core::{BASE_POINT, exchange, public_key, scalar_mult};
