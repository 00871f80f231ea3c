//! RFC 8439 AEAD composition: one-time key derivation, seal, open, tag.

use crate::chacha20;
use crate::poly1305::Poly1305;

/// Size of the Poly1305 authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Fixed all-zero block used for MAC padding. Immutable and non-secret,
/// the only process-wide buffer in the crate.
const ZEROES: [u8; 16] = [0; 16];

/// Errors surfaced by the AEAD entry points.
///
/// The taxonomy is narrow by design: a primitive library with no I/O has
/// nothing else to report. Authentication failure is deliberately absent —
/// [`open`](super::open) performs no verification (see the module
/// documentation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AeadError {
    /// The input and output address ranges intersect. No output was
    /// written.
    Overlap,
    /// The output buffer is too small for the result.
    BufferTooSmall,
    /// The input to `open` is shorter than one tag.
    InputTooShort,
}

/// Returns `true` if the two slices' address ranges intersect.
///
/// Zero-length slices never overlap anything.
fn overlapping(a: &[u8], b: &[u8]) -> bool {
    let a_start = a.as_ptr() as usize;
    let b_start = b.as_ptr() as usize;
    a_start < b_start + b.len() && b_start < a_start + a.len()
}

/// Derives the one-time Poly1305 key for `(key, nonce)`.
///
/// Per RFC 8439 section 2.6: the first 32 bytes of ChaCha20 block 0.
fn one_time_key(key: &[u8; 32], nonce: &[u8; 12]) -> [u8; 32] {
    let block0 = chacha20::block(key, 0, nonce);
    let mut otk = [0u8; 32];
    otk.copy_from_slice(&block0[..32]);
    otk
}

/// Absorbs zero bytes until the MAC input reaches a 16-byte boundary.
fn pad_to_block(mac: &mut Poly1305, len: usize) {
    let rem = len % 16;
    if rem != 0 {
        mac.update(&ZEROES[..16 - rem]);
    }
}

/// Computes the RFC 8439 authentication tag over `ad` and `ciphertext`.
///
/// The MAC input is `ad || pad16 || ciphertext || pad16 ||
/// len(ad) as LE u64 || len(ciphertext) as LE u64`, keyed by the one-time
/// key from ChaCha20 block 0. This is exactly the tag that [`seal`]
/// appends, exposed so that callers of [`open`] can perform the
/// verification the decrypt path omits.
pub fn compute_tag(
    key: &[u8; 32],
    nonce: &[u8; 12],
    ad: &[u8],
    ciphertext: &[u8],
) -> [u8; TAG_SIZE] {
    let mut otk = one_time_key(key, nonce);
    let mut mac = Poly1305::new(&otk);

    if !ad.is_empty() {
        mac.update(ad);
        pad_to_block(&mut mac, ad.len());
    }

    mac.update(ciphertext);
    pad_to_block(&mut mac, ciphertext.len());

    mac.update(&(ad.len() as u64).to_le_bytes());
    mac.update(&(ciphertext.len() as u64).to_le_bytes());

    let tag = mac.finalize();
    otk.fill(0);

    tag
}

/// Compares two tags in constant time.
///
/// Accumulates the XOR of all byte pairs and tests the result once, so
/// the comparison never early-exits on the first differing byte.
pub fn verify_tag(expected: &[u8; TAG_SIZE], actual: &[u8; TAG_SIZE]) -> bool {
    let mut diff = 0u8;
    for (e, a) in expected.iter().zip(actual) {
        diff |= e ^ a;
    }
    diff == 0
}

/// Encrypts `plaintext` and appends the authentication tag.
///
/// Writes `ciphertext || tag` (a total of `plaintext.len() + 16` bytes)
/// into the front of `out` and returns the total size. The payload is
/// encrypted with ChaCha20 starting at block counter 1; counter 0 is
/// reserved for the one-time MAC key.
///
/// # Errors
///
/// - [`AeadError::BufferTooSmall`] if `out` cannot hold the result
/// - [`AeadError::Overlap`] if `plaintext` and the written region of
///   `out` share addresses
///
/// On error, `out` is untouched.
///
/// # Security notes
///
/// - `(key, nonce)` MUST be unique per call; nonce reuse under one key is
///   catastrophic and is not detected here.
pub fn seal(
    key: &[u8; 32],
    nonce: &[u8; 12],
    ad: &[u8],
    plaintext: &[u8],
    out: &mut [u8],
) -> Result<usize, AeadError> {
    let total = plaintext.len() + TAG_SIZE;

    if out.len() < total {
        return Err(AeadError::BufferTooSmall);
    }
    if overlapping(plaintext, &out[..total]) {
        return Err(AeadError::Overlap);
    }

    let (ciphertext, tag_out) = out[..total].split_at_mut(plaintext.len());

    chacha20::xor_stream(key, nonce, 1, plaintext, ciphertext);
    tag_out.copy_from_slice(&compute_tag(key, nonce, ad, ciphertext));

    Ok(total)
}

/// Decrypts `input` (laid out as `ciphertext || tag`) into `out` and
/// returns the plaintext size, `input.len() - 16`.
///
/// # This function does not verify the tag
///
/// It mirrors only the keystream XOR of [`seal`]. A tampered input
/// decrypts "successfully" into garbage. The caller must recompute the
/// tag with [`compute_tag`] and compare it with [`verify_tag`] — or rely
/// on an outer transport-level integrity mechanism — before trusting a
/// single byte of the output. See the module documentation.
///
/// # Errors
///
/// - [`AeadError::InputTooShort`] if `input` is shorter than one tag
/// - [`AeadError::BufferTooSmall`] if `out` cannot hold the plaintext
/// - [`AeadError::Overlap`] if `input` and the written region of `out`
///   share addresses
///
/// On error, `out` is untouched.
pub fn open(
    key: &[u8; 32],
    nonce: &[u8; 12],
    input: &[u8],
    out: &mut [u8],
) -> Result<usize, AeadError> {
    if input.len() < TAG_SIZE {
        return Err(AeadError::InputTooShort);
    }

    let size = input.len() - TAG_SIZE;

    if out.len() < size {
        return Err(AeadError::BufferTooSmall);
    }
    if overlapping(input, &out[..size]) {
        return Err(AeadError::Overlap);
    }

    chacha20::xor_stream(key, nonce, 1, &input[..size], &mut out[..size]);

    Ok(size)
}
