//! Finite field arithmetic for Curve25519.
//!
//! This module implements arithmetic in the prime field
//!
//! ```text
//! 𝔽ₚ where p = 2²⁵⁵ − 19
//! ```
//!
//! used by the X25519 Montgomery ladder.
//!
//! ## Representation
//!
//! Field elements are eight unsigned 32-bit limbs in plain radix 2³²,
//! little-endian limb order. A limb-by-limb product plus two addends fits
//! a `u64`, so every multiply-accumulate step uses one native widening
//! multiplication with explicit carry extraction.
//!
//! Values are kept **lazily reduced** between operations: a result may
//! exceed `p` (it is only guaranteed below 2²⁵⁶ with the top bit folded),
//! but every operation fully propagates carries before returning, so an
//! output is always safe to feed into another multiplication. Full
//! canonicalization against `p` happens exactly once, at serialization.
//!
//! ## Constant-time behavior
//!
//! No operation branches on limb values or indexes memory by them. The
//! conditional swap used by the ladder is the mask-based select
//! [`FieldElement::swap`].

use std::ops::{Add, Mul, Sub};

/// Number of 32-bit limbs per field element.
pub(crate) const NLIMBS: usize = 8;

/// Multiply-accumulate with carry: returns the low word of
/// `mand * mier + acc + carry` and stores the high word back in `carry`.
#[inline(always)]
fn umaal(carry: &mut u32, acc: u32, mand: u32, mier: u32) -> u32 {
    let wide = (mand as u64) * (mier as u64) + (acc as u64) + (*carry as u64);
    *carry = (wide >> 32) as u32;
    wide as u32
}

/// Add with carry: returns the low word of `acc + addend + carry` and
/// stores the carry-out back in `carry`.
#[inline(always)]
fn adc(carry: &mut u32, acc: u32, addend: u32) -> u32 {
    let wide = (*carry as u64) + (acc as u64) + (addend as u64);
    *carry = (wide >> 32) as u32;
    wide as u32
}

/// Add-carry-only variant of [`adc`], with no second addend.
#[inline(always)]
fn adc0(carry: &mut u32, acc: u32) -> u32 {
    let wide = (*carry as u64) + (acc as u64);
    *carry = (wide >> 32) as u32;
    wide as u32
}

/// Field element modulo 2²⁵⁵ − 19, in eight 32-bit little-endian limbs.
///
/// Between operations the value is lazily reduced (below 2²⁵⁶, not
/// necessarily below `p`); [`FieldElement::canonicalize`] produces the
/// unique canonical encoding.
#[derive(Clone, Copy)]
pub(crate) struct FieldElement(pub(crate) [u32; NLIMBS]);

impl FieldElement {
    /// The additive identity (0).
    pub(crate) const ZERO: Self = FieldElement([0; NLIMBS]);

    /// The multiplicative identity (1).
    pub(crate) const ONE: Self = FieldElement([1, 0, 0, 0, 0, 0, 0, 0]);

    /// Decodes a field element from 32 little-endian bytes.
    ///
    /// The top bit of the final byte is masked off, as RFC 7748 requires
    /// for received u-coordinates.
    pub(crate) fn from_bytes(input: &[u8; 32]) -> Self {
        let mut limbs = [0u32; NLIMBS];
        for (limb, chunk) in limbs.iter_mut().zip(input.chunks_exact(4)) {
            *limb = u32::from_le_bytes(chunk.try_into().unwrap());
        }
        limbs[NLIMBS - 1] &= 0x7fff_ffff;
        FieldElement(limbs)
    }

    /// Folds the top bit and an overflow word back into the low limbs.
    ///
    /// Uses `2²⁵⁵ ≡ 19 (mod p)`: the bit above position 254 and the
    /// carry-out `over` are cleared, multiplied by 19, and added back at
    /// the bottom with carry propagation across all limbs. After this the
    /// value fits 256 bits and is safe to use as a multiplicand.
    fn propagate(&mut self, over: u32) {
        let over = (self.0[NLIMBS - 1] >> 31) | (over << 1);
        self.0[NLIMBS - 1] &= 0x7fff_ffff;

        let mut carry = over.wrapping_mul(19);
        for limb in self.0.iter_mut() {
            *limb = adc0(&mut carry, *limb);
        }
    }

    /// Multiplies by an arbitrary little-endian limb slice.
    ///
    /// Schoolbook product into a double-width accumulator, then the high
    /// half is folded into the low half scaled by 38 (= 2·19, accounting
    /// for the high half starting at bit 256 = 2·2²⁵⁵).
    fn mul_limbs(&self, b: &[u32]) -> Self {
        let a = &self.0;
        let mut accum = [0u32; 2 * NLIMBS];

        for (i, &mand) in b.iter().enumerate() {
            let mut carry = 0u32;
            for j in 0..NLIMBS {
                accum[i + j] = umaal(&mut carry, accum[i + j], mand, a[j]);
            }
            accum[i + NLIMBS] = carry;
        }

        let mut out = [0u32; NLIMBS];
        let mut carry = 0u32;
        for j in 0..NLIMBS {
            out[j] = umaal(&mut carry, accum[j], 38, accum[j + NLIMBS]);
        }

        let mut result = FieldElement(out);
        result.propagate(carry);
        result
    }

    /// Squares this field element.
    pub(crate) fn square(self) -> Self {
        self.mul_limbs(&self.0)
    }

    /// Squares this field element `n` consecutive times.
    ///
    /// The iteration count depends only on `n`, never on the value.
    pub(crate) fn n_square(self, n: usize) -> Self {
        (0..n).fold(self, |acc, _| acc.square())
    }

    /// Multiplies by the ladder constant 121665 = (486662 − 2) / 4.
    ///
    /// 486662 is the Montgomery coefficient of Curve25519
    /// (`y² = x³ + 486662·x² + x`).
    pub(crate) fn mul121665(&self) -> Self {
        self.mul_limbs(&[121_665])
    }

    /// Constant-time conditional swap of two field elements.
    ///
    /// `mask` must be all-ones (swap) or all-zeros (keep). The mask is
    /// constructed arithmetically by the caller from a scalar bit; this
    /// function is branch-free.
    pub(crate) fn swap(&mut self, rhs: &mut Self, mask: u32) {
        for (s, r) in self.0.iter_mut().zip(rhs.0.iter_mut()) {
            let tmp = (*s ^ *r) & mask;
            *s ^= tmp;
            *r ^= tmp;
        }
    }

    /// Computes the multiplicative inverse `self^(p−2)` via a fixed
    /// addition chain.
    ///
    /// The chain of squarings and multiplications (the classic ref10
    /// schedule for 2²⁵⁵ − 21) runs the same sequence for every input, so
    /// inversion is constant-time and avoids a general exponentiation
    /// loop. Inverting zero yields zero.
    pub(crate) fn invert(&self) -> Self {
        let mut t0 = self.square();
        let mut t1 = t0.n_square(2);

        t1 = *self * t1;
        t0 = t0 * t1;

        let mut t2 = t0.square();
        t1 = t1 * t2;

        t2 = t1.n_square(5);
        t1 = t2 * t1;

        t2 = t1.n_square(10);
        t2 = t2 * t1;

        let mut t3 = t2.n_square(20);
        t2 = t3 * t2;

        t2 = t2.n_square(10);
        t1 = t2 * t1;

        t2 = t1.n_square(50);
        t2 = t2 * t1;

        t3 = t2.n_square(100);
        t2 = t3 * t2;

        t2 = t2.n_square(50);
        t1 = t2 * t1;

        t1 = t1.n_square(5);

        t1 * t0
    }

    /// Fully reduces against `p` and encodes as 32 little-endian bytes.
    ///
    /// Returns the encoding together with a mask word that is all-ones
    /// when the canonical value is zero and all-zeros otherwise. The
    /// reduction is a constant-time conditional subtraction: add 19, fold
    /// the top bit, subtract 19 again with a borrow chain, so the result
    /// lands in `[0, p)` without a data-dependent branch.
    pub(crate) fn canonicalize(mut self) -> ([u8; 32], u32) {
        let mut carry0 = 19u32;
        for limb in self.0.iter_mut() {
            *limb = adc0(&mut carry0, *limb);
        }
        self.propagate(carry0);

        let mut borrow: i64 = -19;
        let mut nonzero = 0u32;
        for limb in self.0.iter_mut() {
            borrow += *limb as i64;
            *limb = borrow as u32;
            nonzero |= *limb;
            borrow >>= 32;
        }

        let mut bytes = [0u8; 32];
        for (chunk, limb) in bytes.chunks_exact_mut(4).zip(&self.0) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }

        let zero_mask = (((nonzero as u64).wrapping_sub(1)) >> 32) as u32;
        (bytes, zero_mask)
    }
}

/// Field addition: limb-wise add with carry, then a fold of the carry-out
/// through [`FieldElement::propagate`]. The result is lazily reduced.
impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut out = [0u32; NLIMBS];
        let mut carry = 0u32;
        for ((o, a), b) in out.iter_mut().zip(&self.0).zip(&rhs.0) {
            *o = adc(&mut carry, *a, *b);
        }

        let mut result = FieldElement(out);
        result.propagate(carry);
        result
    }
}

/// Field subtraction.
///
/// Computes `a − b` biased by −38 so the borrow chain ends at 0 or −1;
/// the final fold adds the bias back as one wrapped copy of `p`'s
/// complement, keeping the result lazily reduced and non-negative.
impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut out = [0u32; NLIMBS];
        let mut borrow: i64 = -38;
        for ((o, a), b) in out.iter_mut().zip(&self.0).zip(&rhs.0) {
            borrow += (*a as i64) - (*b as i64);
            *o = borrow as u32;
            borrow >>= 32;
        }

        let mut result = FieldElement(out);
        result.propagate((1 + borrow) as u32);
        result
    }
}

/// Field multiplication: schoolbook limb product with the modular fold
/// described at [`FieldElement::mul_limbs`].
impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_limbs(&rhs.0)
    }
}
