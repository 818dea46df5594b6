#![cfg(test)]

use crate::artifact::read_artifact_header;
use crate::common::{HEADER_SIZE, MAX_CODE_LENGTH};
use crate::huffman::code_table::kraft_sum;
use crate::huffman::{CodeTable, SymbolLength};
use crate::{decode, encode, encode_with_stats, DecodeError, DecodeErrorKind};
use alloc::vec;
use alloc::vec::Vec;
use rand::{Rng, SeedableRng};

fn round_trip(data: &[u8]) {
    let artifact = encode(data);
    let decoded = decode(&artifact).unwrap();
    assert_eq!(decoded, data, "round trip failed for input of {} bytes", data.len());
}

#[test]
fn round_trip_edge_cases() {
    round_trip(&[]);
    round_trip(&[0]);
    round_trip(&[255]);
    round_trip(&[42; 1000]);
    round_trip(b"ab");
    round_trip(b"abracadabra");
    round_trip(&(0..=255u8).collect::<Vec<_>>());
    round_trip(&(0..=255u8).cycle().take(256 * 40).collect::<Vec<_>>());
}

#[test]
fn round_trip_random() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    for len in [1, 2, 3, 7, 8, 9, 100, 1000, 4096, 65537] {
        let mut data = vec![0u8; len];
        rng.fill(&mut data[..]);
        round_trip(&data);

        // skewed towards a few symbols, like text
        let skewed = (0..len)
            .map(|_| {
                let r: u32 = rng.gen_range(0..1000);
                (r * r / 10_000) as u8
            })
            .collect::<Vec<_>>();
        round_trip(&skewed);
    }
}

#[test]
fn round_trip_deep_tree() {
    // fibonacci counts give the deepest possible tree for their symbol count
    let mut data = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0..25u8 {
        data.extend(core::iter::repeat(symbol).take(a));
        let next = a + b;
        a = b;
        b = next;
    }
    let artifact = encode(&data);
    let (header, _) = read_artifact_header(&artifact).unwrap();
    assert_eq!(header.symbols.last().unwrap().length, 24);
    assert_eq!(decode(&artifact).unwrap(), data);
}

#[test]
fn encoding_is_deterministic() {
    let data = b"It was the best of times, it was the worst of times".repeat(20);
    let first = encode(&data);
    let second = encode(&data);
    assert_eq!(first, second);

    // the artifact only depends on content, not on how it was produced
    let copied = data.iter().copied().collect::<Vec<_>>();
    assert_eq!(encode(&copied), first);
}

#[test]
fn headers_satisfy_kraft_and_are_canonical() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
    for _ in 0..50 {
        let len = rng.gen_range(1..3000);
        let alphabet = rng.gen_range(1..=256u32);
        let data = (0..len)
            .map(|_| rng.gen_range(0..alphabet) as u8)
            .collect::<Vec<_>>();
        let artifact = encode(&data);
        let (header, _) = read_artifact_header(&artifact).unwrap();
        assert!(kraft_sum(&header.symbols) <= 1 << MAX_CODE_LENGTH);
        assert!(header
            .symbols
            .windows(2)
            .all(|w| (w[0].length, w[0].symbol) < (w[1].length, w[1].symbol)));
        // the decoder side accepts exactly what the encoder wrote
        CodeTable::from_lengths(header.symbols).unwrap();
    }
}

#[test]
fn payload_is_minimal() {
    let data = b"mississippi";
    let (artifact, stats) = encode_with_stats(data);
    let (header, header_len) = read_artifact_header(&artifact).unwrap();
    assert_eq!(header_len, header.serialized_len());
    assert_eq!(
        (artifact.len() - header_len) as u64,
        stats.payload_bits.div_ceil(8)
    );
    assert_eq!(stats.artifact_length, artifact.len());
}

#[test]
fn empty_input_boundary() {
    let artifact = encode(&[]);
    let (header, header_len) = read_artifact_header(&artifact).unwrap();
    assert_eq!(header.original_length, 0);
    assert!(header.symbols.is_empty());
    assert_eq!(header_len, HEADER_SIZE);
    assert_eq!(artifact.len(), HEADER_SIZE);
    assert_eq!(decode(&artifact).unwrap(), b"");
}

#[test]
fn scenario_repeated_single_byte() {
    let artifact = encode(b"aaaa");
    let (header, _) = read_artifact_header(&artifact).unwrap();
    assert_eq!(
        header.symbols,
        &[SymbolLength {
            symbol: b'a',
            length: 1
        }]
    );
    assert_eq!(decode(&artifact).unwrap(), b"aaaa");
}

#[test]
fn scenario_abracadabra() {
    let (artifact, stats) = encode_with_stats(b"abracadabra");
    let (header, _) = read_artifact_header(&artifact).unwrap();
    assert_eq!(header.symbols.len(), 5);
    let length_of = |symbol: u8| {
        header
            .symbols
            .iter()
            .find(|entry| entry.symbol == symbol)
            .unwrap()
            .length
    };
    assert!(length_of(b'a') <= 2);
    for symbol in [b'b', b'r', b'c', b'd'] {
        assert!(length_of(symbol) <= 4);
    }
    assert!(stats.payload_bits < 11 * 8);
    assert_eq!(decode(&artifact).unwrap(), b"abracadabra");
}

#[test]
fn scenario_corrupt_magic() {
    let mut artifact = encode(b"abracadabra");
    artifact[0] = b'X';
    let err = decode(&artifact).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::InvalidHeader);
}

#[test]
fn scenario_truncated_payload() {
    let mut artifact = encode(b"abracadabra");
    artifact.pop();
    assert_eq!(
        decode(&artifact),
        Err(DecodeError::TruncatedPayload {
            decoded: 8,
            expected: 11
        })
    );

    let mut artifact = encode(&(0..=255u8).collect::<Vec<_>>());
    artifact.pop();
    assert_eq!(
        decode(&artifact).unwrap_err().kind(),
        DecodeErrorKind::TruncatedPayload
    );
}

#[test]
fn tampered_lengths_are_rejected() {
    let mut artifact = encode(b"abracadabra");
    // give 'b' a one bit code as well, two one bit codes plus three more is too many
    let b_length = HEADER_SIZE + 3;
    assert_eq!(artifact[b_length], 3);
    artifact[b_length] = 1;
    assert_eq!(
        decode(&artifact).unwrap_err().kind(),
        DecodeErrorKind::InconsistentCodeLengths
    );
}

#[test]
fn truncated_header_is_invalid() {
    let artifact = encode(b"abracadabra");
    for len in 0..HEADER_SIZE + 10 {
        assert_eq!(
            decode(&artifact[..len]).unwrap_err().kind(),
            DecodeErrorKind::InvalidHeader,
            "header cut to {len} bytes"
        );
    }
}

#[test]
fn unused_code_is_reported() {
    // a lone symbol only owns the code `0`, a set bit can't be decoded
    let mut artifact = encode(b"aaaa");
    *artifact.last_mut().unwrap() = 0b0010_0000;
    assert_eq!(
        decode(&artifact),
        Err(DecodeError::InvalidCode { bit_offset: 2 })
    );
}

#[test]
fn garbage_never_panics() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(1234);
    let valid = encode(b"the quick brown fox jumps over the lazy dog");
    for _ in 0..2000 {
        let mut artifact = valid.clone();
        let flips = rng.gen_range(1..4);
        for _ in 0..flips {
            let idx = rng.gen_range(0..artifact.len());
            artifact[idx] ^= 1 << rng.gen_range(0..8u32);
        }
        // only check that decoding terminates without panicking
        let _ = decode(&artifact);
    }
}
