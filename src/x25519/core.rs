//! X25519 scalar multiplication: clamping, Montgomery ladder, encoding.

use super::field::FieldElement;

/// The X25519 base point: u-coordinate 9, encoded as 32 little-endian
/// bytes. Fixed and public (RFC 7748 section 4.1).
pub const BASE_POINT: [u8; 32] = {
    let mut point = [0u8; 32];
    point[0] = 9;
    point
};

/// Applies RFC 7748 scalar clamping to one scalar byte.
///
/// Byte 0 loses its three low bits; byte 31 loses its top bit and gains
/// bit 254. Other bytes pass through. Clamping is applied on the fly per
/// ladder step so the caller's scalar is never copied or modified.
#[inline(always)]
fn clamped_byte(scalar: &[u8; 32], index: usize, clamp: bool) -> u8 {
    let mut byte = scalar[index];
    if clamp {
        if index == 0 {
            byte &= 0xf8;
        } else if index == 31 {
            byte &= 0x7f;
            byte |= 0x40;
        }
    }
    byte
}

/// One Montgomery ladder step: differential addition and doubling.
///
/// Takes the two working projective points `(x2:z2)`, `(x3:z3)` and the
/// affine base `x1`, returns the updated points. All arithmetic is the
/// fixed sequence of field additions, subtractions, multiplications and
/// squarings below; nothing depends on scalar data (the bit-driven swap
/// happens outside, before the step).
fn ladder_step(
    x2: FieldElement,
    z2: FieldElement,
    x3: FieldElement,
    z3: FieldElement,
    x1: FieldElement,
) -> (FieldElement, FieldElement, FieldElement, FieldElement) {
    let a = x2 + z2;
    let b = x2 - z2;
    let c = x3 + z3;
    let d = x3 - z3;

    let da = d * a;
    let cb = c * b;

    let aa = a.square();
    let bb = b.square();
    let e = aa - bb;

    let x3_new = (da + cb).square();
    let z3_new = (da - cb).square() * x1;

    let x2_new = aa * bb;
    let z2_new = (e.mul121665() + aa) * e;

    (x2_new, z2_new, x3_new, z3_new)
}

/// Constant-time X25519 scalar multiplication.
///
/// Computes the u-coordinate of `scalar * (point as u-coordinate)` on
/// Curve25519 and returns it as 32 little-endian bytes, together with a
/// diagnostic flag.
///
/// With `clamp = true` the scalar is clamped per RFC 7748 before use —
/// the standard Diffie–Hellman mode. With `clamp = false` the scalar is
/// used raw.
///
/// # Diagnostic flag
///
/// For `clamp = true` the returned `bool` is `true` when the canonical
/// output is zero, which happens when the peer point is in the low-order
/// subgroup. It is a diagnostic signal derived from the canonicalization
/// mask, not a failure: the function has no error path for valid
/// fixed-size inputs, and the (all-zero) output is returned as-is. For
/// `clamp = false` the flag is always `false`.
///
/// # Algorithm
///
/// The ladder walks the 256 scalar bit positions from most to least
/// significant. At each position the two working points are
/// conditionally swapped on the XOR of consecutive scalar bits through a
/// mask-based select — never a branch on the bit — followed by one
/// differential addition-and-doubling step. A final conditional swap
/// settles the last bit, then the affine result is `x2 / z2` with the
/// inverse computed by a fixed addition chain.
pub fn scalar_mult(scalar: &[u8; 32], point: &[u8; 32], clamp: bool) -> ([u8; 32], bool) {
    let x1 = FieldElement::from_bytes(point);

    let mut x2 = FieldElement::ONE;
    let mut z2 = FieldElement::ZERO;
    let mut x3 = x1;
    let mut z3 = FieldElement::ONE;

    let mut swap = 0u32;

    for pos in (0..256).rev() {
        let byte = clamped_byte(scalar, pos >> 3, clamp);
        let bit = u32::from((byte >> (pos & 7)) & 1);
        let doswap = 0u32.wrapping_sub(bit);

        x2.swap(&mut x3, swap ^ doswap);
        z2.swap(&mut z3, swap ^ doswap);
        swap = doswap;

        (x2, z2, x3, z3) = ladder_step(x2, z2, x3, z3, x1);
    }

    x2.swap(&mut x3, swap);
    z2.swap(&mut z3, swap);

    let (out, zero_mask) = (x2 * z2.invert()).canonicalize();

    (out, clamp && zero_mask != 0)
}

/// Derives the public key for a private scalar:
/// `scalar_mult(private, BASE_POINT, clamp = true)`.
pub fn public_key(private: &[u8; 32]) -> [u8; 32] {
    scalar_mult(private, &BASE_POINT, true).0
}

/// Computes the Diffie–Hellman shared secret between a local private
/// scalar and a peer public u-coordinate.
///
/// Per RFC 7748, the output may be all zeros for degenerate peer keys
/// (low-order points); this function returns that value as-is. Callers
/// that want to reject such peers can use [`scalar_mult`] directly and
/// inspect the diagnostic flag.
pub fn exchange(private: &[u8; 32], peer_public: &[u8; 32]) -> [u8; 32] {
    scalar_mult(private, peer_public, true).0
}
