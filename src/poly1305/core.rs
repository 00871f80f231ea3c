//! Poly1305 accumulator: clamping, block absorption, reduction, tag output.

/// Poly1305 processes the message in 16-byte blocks.
const BLOCK_SIZE: usize = 16;

/// Loads 4 bytes as a little-endian `u32`.
#[inline(always)]
fn load_le32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Incremental Poly1305 state.
///
/// The accumulator and the clamped multiplier `r` are held in 26-bit radix:
/// five `u32` limbs covering 130 bits. Limb products fit a `u64`
/// multiply-with-carry, so each block multiplication is schoolbook with the
/// reduction modulo 2¹³⁰ − 5 folded in through the ×5 pre-scaled terms.
///
/// The state is owned exclusively by one authentication operation. It is
/// not reentrant across operations and must not be shared between
/// concurrent MAC computations; it carries no internal locking.
///
/// # Security
///
/// - A fresh instance must be created for each message.
/// - All operations on secret data are constant-time; the final reduction
///   selects through a borrow mask, never a data-dependent branch.
pub struct Poly1305 {
    /// Clamped multiplier `r` in five 26-bit limbs.
    r: [u32; 5],

    /// Accumulator `h` in five 26-bit limbs, kept below 2¹³⁰ + ε between
    /// blocks; fully carried before every reuse as a multiplicand.
    h: [u32; 5],

    /// Additive pad `s` (second key half) as four little-endian words,
    /// added modulo 2¹²⁸ at finalization.
    pad: [u32; 4],

    /// Partial-block carry between `update` calls: `buffer[..leftover]`
    /// holds the unprocessed tail, always shorter than one block.
    buffer: [u8; BLOCK_SIZE],
    leftover: usize,

    /// Set for the zero-padded final partial block: suppresses the high
    /// bit that full blocks carry at position 128.
    finalized: bool,
}

impl Poly1305 {
    /// Creates a new Poly1305 instance from a one-time 32-byte key.
    ///
    /// The first key half becomes the multiplier `r`, clamped per
    /// RFC 8439 section 2.5 so that each 26-bit limb stays within the
    /// bounds the schoolbook multiplication relies on. The second half
    /// becomes the additive pad.
    ///
    /// The caller must guarantee the key is never reused.
    pub fn new(key: &[u8; 32]) -> Self {
        let r = [
            load_le32(&key[0..]) & 0x3ffffff,
            (load_le32(&key[3..]) >> 2) & 0x3ffff03,
            (load_le32(&key[6..]) >> 4) & 0x3ffc0ff,
            (load_le32(&key[9..]) >> 6) & 0x3f03fff,
            (load_le32(&key[12..]) >> 8) & 0x00fffff,
        ];

        let pad = [
            load_le32(&key[16..]),
            load_le32(&key[20..]),
            load_le32(&key[24..]),
            load_le32(&key[28..]),
        ];

        Poly1305 {
            r,
            h: [0; 5],
            pad,
            buffer: [0; BLOCK_SIZE],
            leftover: 0,
            finalized: false,
        }
    }

    /// Absorbs full 16-byte blocks from `m` into the accumulator.
    ///
    /// Each block is loaded as five 26-bit limbs with the high bit at
    /// position 128 (omitted once `finalized` marks the padded last block),
    /// added into `h`, then `h` is multiplied by `r` modulo 2¹³⁰ − 5 with
    /// full carry propagation before the result is stored.
    fn blocks(&mut self, m: &[u8]) {
        let hibit: u32 = if self.finalized { 0 } else { 1 << 24 };

        let [r0, r1, r2, r3, r4] = self.r.map(u64::from);
        let (s1, s2, s3, s4) = (r1 * 5, r2 * 5, r3 * 5, r4 * 5);

        let mut h0 = self.h[0] as u64;
        let mut h1 = self.h[1] as u64;
        let mut h2 = self.h[2] as u64;
        let mut h3 = self.h[3] as u64;
        let mut h4 = self.h[4] as u64;

        for block in m.chunks_exact(BLOCK_SIZE) {
            h0 += (load_le32(&block[0..]) & 0x3ffffff) as u64;
            h1 += ((load_le32(&block[3..]) >> 2) & 0x3ffffff) as u64;
            h2 += ((load_le32(&block[6..]) >> 4) & 0x3ffffff) as u64;
            h3 += ((load_le32(&block[9..]) >> 6) & 0x3ffffff) as u64;
            h4 += ((load_le32(&block[12..]) >> 8) | hibit) as u64;

            let d0 = h0 * r0 + h1 * s4 + h2 * s3 + h3 * s2 + h4 * s1;
            let mut d1 = h0 * r1 + h1 * r0 + h2 * s4 + h3 * s3 + h4 * s2;
            let mut d2 = h0 * r2 + h1 * r1 + h2 * r0 + h3 * s4 + h4 * s3;
            let mut d3 = h0 * r3 + h1 * r2 + h2 * r1 + h3 * r0 + h4 * s4;
            let mut d4 = h0 * r4 + h1 * r3 + h2 * r2 + h3 * r1 + h4 * r0;

            let mut c;

            c = d0 >> 26;
            h0 = d0 & 0x3ffffff;
            d1 += c;

            c = d1 >> 26;
            h1 = d1 & 0x3ffffff;
            d2 += c;

            c = d2 >> 26;
            h2 = d2 & 0x3ffffff;
            d3 += c;

            c = d3 >> 26;
            h3 = d3 & 0x3ffffff;
            d4 += c;

            c = d4 >> 26;
            h4 = d4 & 0x3ffffff;

            // Wrap the top carry back into the bottom limb, scaled by 5.
            h0 += c * 5;
            c = h0 >> 26;
            h0 &= 0x3ffffff;
            h1 += c;
        }

        self.h = [h0 as u32, h1 as u32, h2 as u32, h3 as u32, h4 as u32];
    }

    /// Absorbs `m` into the accumulator.
    ///
    /// May be called any number of times with chunks of any size. A
    /// buffered partial block is topped off to 16 bytes first, then all
    /// full blocks are processed, then the remaining tail is buffered for
    /// the next call.
    pub fn update(&mut self, m: &[u8]) {
        let mut m = m;

        if self.leftover > 0 {
            let want = (BLOCK_SIZE - self.leftover).min(m.len());
            self.buffer[self.leftover..self.leftover + want].copy_from_slice(&m[..want]);
            self.leftover += want;
            m = &m[want..];

            if self.leftover < BLOCK_SIZE {
                return;
            }

            let buffer = self.buffer;
            self.blocks(&buffer);
            self.leftover = 0;
        }

        let full = m.len() & !(BLOCK_SIZE - 1);
        if full > 0 {
            self.blocks(&m[..full]);
            m = &m[full..];
        }

        if !m.is_empty() {
            self.buffer[..m.len()].copy_from_slice(m);
            self.leftover = m.len();
        }
    }

    /// Finalizes the computation and returns the 16-byte authentication tag.
    ///
    /// Any buffered partial block is flushed as the final block: a single
    /// 0x01 byte followed by zero fill, with the block high bit suppressed.
    /// The accumulator is then fully carried, canonicalized against
    /// 2¹³⁰ − 5 by a mask-selected conditional subtraction, packed into
    /// four little-endian words, and the pad is added with carry
    /// propagation across words.
    ///
    /// Consumes the state; the secret limbs are wiped before returning.
    pub fn finalize(mut self) -> [u8; 16] {
        if self.leftover > 0 {
            self.buffer[self.leftover] = 1;
            self.buffer[self.leftover + 1..].fill(0);
            self.finalized = true;

            let buffer = self.buffer;
            self.blocks(&buffer);
        }

        let [mut h0, mut h1, mut h2, mut h3, mut h4] = self.h;
        let mut c;

        c = h1 >> 26;
        h1 &= 0x3ffffff;
        h2 += c;

        c = h2 >> 26;
        h2 &= 0x3ffffff;
        h3 += c;

        c = h3 >> 26;
        h3 &= 0x3ffffff;
        h4 += c;

        c = h4 >> 26;
        h4 &= 0x3ffffff;
        h0 += c * 5;

        c = h0 >> 26;
        h0 &= 0x3ffffff;
        h1 += c;

        // Compute h - p; the borrow out of the top limb decides, via a
        // mask, whether h or h - p is the canonical value.
        let mut g0 = h0.wrapping_add(5);
        c = g0 >> 26;
        g0 &= 0x3ffffff;

        let mut g1 = h1.wrapping_add(c);
        c = g1 >> 26;
        g1 &= 0x3ffffff;

        let mut g2 = h2.wrapping_add(c);
        c = g2 >> 26;
        g2 &= 0x3ffffff;

        let mut g3 = h3.wrapping_add(c);
        c = g3 >> 26;
        g3 &= 0x3ffffff;

        let g4 = h4.wrapping_add(c).wrapping_sub(1 << 26);

        let mask = (g4 >> 31).wrapping_sub(1);

        h0 = (h0 & !mask) | (g0 & mask);
        h1 = (h1 & !mask) | (g1 & mask);
        h2 = (h2 & !mask) | (g2 & mask);
        h3 = (h3 & !mask) | (g3 & mask);
        h4 = (h4 & !mask) | (g4 & mask);

        // Pack the 130-bit canonical value into four 32-bit words.
        let packed = [
            h0 | (h1 << 26),
            (h1 >> 6) | (h2 << 20),
            (h2 >> 12) | (h3 << 14),
            (h3 >> 18) | (h4 << 8),
        ];

        // Add the pad modulo 2^128, carrying across words.
        let mut tag = [0u8; 16];
        let mut f: u64 = 0;
        for ((chunk, word), pad) in tag.chunks_exact_mut(4).zip(&packed).zip(&self.pad) {
            f = (*word as u64) + (*pad as u64) + (f >> 32);
            chunk.copy_from_slice(&(f as u32).to_le_bytes());
        }

        self.h.fill(0);
        self.r.fill(0);
        self.pad.fill(0);
        self.buffer.fill(0);

        tag
    }
}
