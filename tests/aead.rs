use meridian_crypto::aead::{AeadError, TAG_SIZE, compute_tag, open, seal, verify_tag};

const KEY: [u8; 32] = [
    0x80, 0x81, 0x82, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8a, 0x8b, 0x8c, 0x8d, 0x8e,
    0x8f, 0x90, 0x91, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9a, 0x9b, 0x9c, 0x9d,
    0x9e, 0x9f,
];

const NONCE: [u8; 12] = [
    0x07, 0x00, 0x00, 0x00, 0x40, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47,
];

const AD: [u8; 12] = [
    0x50, 0x51, 0x52, 0x53, 0xc0, 0xc1, 0xc2, 0xc3, 0xc4, 0xc5, 0xc6, 0xc7,
];

const PLAINTEXT: &[u8] = b"Ladies and Gentlemen of the class of '99: \
If I could offer you only one tip for the future, sunscreen would be it.";

const CIPHERTEXT: [u8; 114] = [
    0xd3, 0x1a, 0x8d, 0x34, 0x64, 0x8e, 0x60, 0xdb, 0x7b, 0x86, 0xaf, 0xbc, 0x53, 0xef, 0x7e,
    0xc2, 0xa4, 0xad, 0xed, 0x51, 0x29, 0x6e, 0x08, 0xfe, 0xa9, 0xe2, 0xb5, 0xa7, 0x36, 0xee,
    0x62, 0xd6, 0x3d, 0xbe, 0xa4, 0x5e, 0x8c, 0xa9, 0x67, 0x12, 0x82, 0xfa, 0xfb, 0x69, 0xda,
    0x92, 0x72, 0x8b, 0x1a, 0x71, 0xde, 0x0a, 0x9e, 0x06, 0x0b, 0x29, 0x05, 0xd6, 0xa5, 0xb6,
    0x7e, 0xcd, 0x3b, 0x36, 0x92, 0xdd, 0xbd, 0x7f, 0x2d, 0x77, 0x8b, 0x8c, 0x98, 0x03, 0xae,
    0xe3, 0x28, 0x09, 0x1b, 0x58, 0xfa, 0xb3, 0x24, 0xe4, 0xfa, 0xd6, 0x75, 0x94, 0x55, 0x85,
    0x80, 0x8b, 0x48, 0x31, 0xd7, 0xbc, 0x3f, 0xf4, 0xde, 0xf0, 0x8e, 0x4b, 0x7a, 0x9d, 0xe5,
    0x76, 0xd2, 0x65, 0x86, 0xce, 0xc6, 0x4b, 0x61, 0x16,
];

const TAG: [u8; 16] = [
    0x1a, 0xe1, 0x0b, 0x59, 0x4f, 0x09, 0xe2, 0x6a, 0x7e, 0x90, 0x2e, 0xcb, 0xd0, 0x60, 0x06,
    0x91,
];

#[test]
fn test_rfc8439_aead_vector() {
    // RFC 8439 section 2.8.2
    let mut sealed = vec![0u8; PLAINTEXT.len() + TAG_SIZE];
    let written = seal(&KEY, &NONCE, &AD, PLAINTEXT, &mut sealed).unwrap();

    assert_eq!(written, PLAINTEXT.len() + TAG_SIZE);
    assert_eq!(&sealed[..PLAINTEXT.len()], &CIPHERTEXT[..]);
    assert_eq!(&sealed[PLAINTEXT.len()..], &TAG[..]);
}

#[test]
fn test_round_trip_lengths() {
    let key = [0x42u8; 32];
    let nonce = [0x24u8; 12];
    let ad = b"meridian/v1";

    // Zero length, cipher-block multiples +/- 1, MAC-block multiples +/- 1.
    for len in [0usize, 1, 15, 16, 17, 63, 64, 65, 128, 1000] {
        let plaintext: Vec<u8> = (0..len).map(|i| i as u8).collect();

        let mut sealed = vec![0u8; len + TAG_SIZE];
        let written = seal(&key, &nonce, ad, &plaintext, &mut sealed).unwrap();
        assert_eq!(written, len + TAG_SIZE);

        let mut recovered = vec![0u8; len];
        let size = open(&key, &nonce, &sealed, &mut recovered).unwrap();
        assert_eq!(size, len);
        assert_eq!(recovered, plaintext, "length {len} must round-trip");
    }
}

#[test]
fn test_caller_side_verification() {
    let mut sealed = vec![0u8; PLAINTEXT.len() + TAG_SIZE];
    seal(&KEY, &NONCE, &AD, PLAINTEXT, &mut sealed).unwrap();

    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_SIZE);
    let tag: &[u8; 16] = tag.try_into().unwrap();

    let expected = compute_tag(&KEY, &NONCE, &AD, ciphertext);
    assert!(verify_tag(&expected, tag));

    // Any bit flip in ciphertext, AD, key, or nonce changes the tag.
    let mut tampered = ciphertext.to_vec();
    tampered[0] ^= 1;
    assert!(!verify_tag(&compute_tag(&KEY, &NONCE, &AD, &tampered), tag));
    assert!(!verify_tag(&compute_tag(&KEY, &NONCE, b"", ciphertext), tag));
}

#[test]
fn test_open_does_not_verify_the_tag() {
    // Pinned contract: open is a pure keystream XOR. A flipped tag byte
    // still "succeeds" and returns the plaintext; a flipped ciphertext
    // byte still "succeeds" and returns garbage of the right length.
    // Integrity is the caller's obligation (see the aead module docs).
    let mut sealed = vec![0u8; PLAINTEXT.len() + TAG_SIZE];
    seal(&KEY, &NONCE, &AD, PLAINTEXT, &mut sealed).unwrap();

    let mut flipped_tag = sealed.clone();
    let last = flipped_tag.len() - 1;
    flipped_tag[last] ^= 0xff;

    let mut plaintext = vec![0u8; PLAINTEXT.len()];
    let size = open(&KEY, &NONCE, &flipped_tag, &mut plaintext).unwrap();
    assert_eq!(size, PLAINTEXT.len());
    assert_eq!(&plaintext[..], PLAINTEXT);

    let mut flipped_ct = sealed.clone();
    flipped_ct[0] ^= 0x80;

    let size = open(&KEY, &NONCE, &flipped_ct, &mut plaintext).unwrap();
    assert_eq!(size, PLAINTEXT.len());
    assert_ne!(&plaintext[..], PLAINTEXT);
    assert_eq!(&plaintext[1..], &PLAINTEXT[1..]);
}

#[test]
fn test_overlap_is_rejected() {
    let key = [1u8; 32];
    let nonce = [2u8; 12];

    // Overlapping views of one allocation only exist through raw
    // pointers; build them explicitly to exercise the range check.
    let mut backing = vec![0u8; 64];
    let ptr = backing.as_mut_ptr();

    unsafe {
        let input = std::slice::from_raw_parts(ptr, 20);
        let output = std::slice::from_raw_parts_mut(ptr.add(10), 54);
        assert_eq!(
            seal(&key, &nonce, b"", input, output),
            Err(AeadError::Overlap)
        );

        let input = std::slice::from_raw_parts(ptr, 36);
        let output = std::slice::from_raw_parts_mut(ptr.add(30), 20);
        assert_eq!(
            open(&key, &nonce, input, output),
            Err(AeadError::Overlap)
        );
    }

    // Disjoint halves of the same allocation are fine.
    let (front, back) = backing.split_at_mut(32);
    assert!(seal(&key, &nonce, b"", &front[..16], back).is_ok());
}

#[test]
fn test_size_errors() {
    let key = [3u8; 32];
    let nonce = [4u8; 12];

    let mut small = [0u8; 17];
    assert_eq!(
        seal(&key, &nonce, b"", &[0u8; 2], &mut small),
        Err(AeadError::BufferTooSmall)
    );

    let mut out = [0u8; 4];
    assert_eq!(
        open(&key, &nonce, &[0u8; 15], &mut out),
        Err(AeadError::InputTooShort)
    );
    assert_eq!(
        open(&key, &nonce, &[0u8; 21], &mut out),
        Err(AeadError::BufferTooSmall)
    );
}

#[test]
fn test_distinct_nonces_distinct_output() {
    let key = [9u8; 32];
    let message = b"telemetry frame 0042";

    let mut first = vec![0u8; message.len() + TAG_SIZE];
    let mut second = vec![0u8; message.len() + TAG_SIZE];

    seal(&key, &[0u8; 12], b"", message, &mut first).unwrap();
    seal(&key, &[1u8; 12], b"", message, &mut second).unwrap();

    assert_ne!(first, second);
}
