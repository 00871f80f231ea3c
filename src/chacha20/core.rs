//! ChaCha20 core: state setup, permutation, keystream XOR.

/// ChaCha20 constant words.
///
/// The ASCII string `"expand 32-byte k"` encoded as four little-endian
/// `u32` words, as defined in RFC 8439. They are public, fixed, and
/// non-secret, and define the ChaCha20 permutation domain.
const CONSTANTS: [u32; 4] = [
    0x6170_7865, // "expa"
    0x3320_646e, // "nd 3"
    0x7962_2d32, // "2-by"
    0x6b20_6574, // "te k"
];

/// Size of one keystream block in bytes.
const BLOCK_SIZE: usize = 64;

/// Performs one ChaCha20 quarter round on four words of the state.
///
/// Mixes the words using addition modulo 2³², XOR, and fixed left rotations
/// of 16, 12, 8, and 7 bits. Branchless and constant-time.
#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

/// Applies the full ChaCha20 permutation: 10 iterations of 4 column and
/// 4 diagonal quarter rounds, 20 rounds total.
fn permute(state: &mut [u32; 16]) {
    for _ in 0..10 {
        // Column rounds
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);

        // Diagonal rounds
        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    }
}

/// Builds the initial 16-word ChaCha20 state from key, counter and nonce.
///
/// Layout per RFC 8439 section 2.3: four constant words, eight key words
/// (little-endian), the 32-bit block counter, three nonce words
/// (little-endian). Byte order is little-endian on every host; big-endian
/// targets transform on load rather than changing the arithmetic.
fn initialize_state(key: &[u8; 32], counter: u32, nonce: &[u8; 12]) -> [u32; 16] {
    let mut state = [0u32; 16];

    state[0..4].copy_from_slice(&CONSTANTS);

    state[4..12]
        .iter_mut()
        .zip(key.chunks_exact(4))
        .for_each(|(s, k)| {
            *s = u32::from_le_bytes(k.try_into().unwrap());
        });

    state[12] = counter;

    state[13..16]
        .iter_mut()
        .zip(nonce.chunks_exact(4))
        .for_each(|(s, n)| {
            *s = u32::from_le_bytes(n.try_into().unwrap());
        });

    state
}

/// Runs the permutation over a working copy of `state` and serializes the
/// feed-forward sum as 64 little-endian bytes.
fn keystream_block(state: &[u32; 16]) -> [u8; 64] {
    let mut working = *state;
    permute(&mut working);

    let mut out = [0u8; 64];
    out.chunks_exact_mut(4)
        .zip(working.iter().zip(state))
        .for_each(|(chunk, (w, s))| {
            chunk.copy_from_slice(&w.wrapping_add(*s).to_le_bytes());
        });

    out
}

/// Generates a single 64-byte ChaCha20 keystream block.
///
/// # Parameters
///
/// - `key`: 256-bit secret key
/// - `counter`: 32-bit block counter
/// - `nonce`: 96-bit nonce (IETF variant)
///
/// # Security notes
///
/// - This function performs no encryption or authentication by itself.
/// - Reusing the same `(key, nonce, counter)` tuple must be prevented by
///   the caller.
pub fn block(key: &[u8; 32], counter: u32, nonce: &[u8; 12]) -> [u8; 64] {
    keystream_block(&initialize_state(key, counter, nonce))
}

/// XORs the ChaCha20 keystream over `input`, writing the result to `output`.
///
/// Successive 64-byte keystream blocks are generated starting at `counter`,
/// incrementing the counter word once per block. A final partial block XORs
/// only the needed leading keystream bytes. The counter wraps modulo 2³²;
/// messages long enough to wrap (more than 256 GiB) are outside the intended
/// use of this crate.
///
/// Encryption and decryption are the same operation.
///
/// # Panics
///
/// Panics if `input.len() != output.len()`.
pub fn xor_stream(
    key: &[u8; 32],
    nonce: &[u8; 12],
    counter: u32,
    input: &[u8],
    output: &mut [u8],
) {
    assert_eq!(input.len(), output.len());

    let mut state = initialize_state(key, counter, nonce);

    for (inp, outp) in input
        .chunks(BLOCK_SIZE)
        .zip(output.chunks_mut(BLOCK_SIZE))
    {
        let keystream = keystream_block(&state);
        state[12] = state[12].wrapping_add(1);

        for ((o, i), k) in outp.iter_mut().zip(inp).zip(&keystream) {
            *o = i ^ k;
        }
    }
}
