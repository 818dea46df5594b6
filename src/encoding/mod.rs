//! Turning raw bytes into an artifact.

pub mod bit_writer;

use crate::artifact::ArtifactHeader;
use crate::frequency::FrequencyTable;
use crate::huffman::{CodeTable, HuffmanTree};
use alloc::vec::Vec;
use bit_writer::BitWriter;

/// Numbers describing one [`encode_with_stats`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStats {
    /// Length of the input in bytes
    pub original_length: usize,
    pub distinct_symbols: usize,
    /// Bits of payload before padding to a whole byte
    pub payload_bits: u64,
    /// Length of the whole artifact, header included
    pub artifact_length: usize,
}

impl EncodeStats {
    /// Artifact size relative to the input size. Zero for empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_length == 0 {
            return 0.0;
        }
        self.artifact_length as f64 / self.original_length as f64
    }
}

/// Compress `data` into a self-describing artifact.
///
/// Equal inputs always produce byte-identical artifacts. The empty input is
/// valid and produces a bare header.
///
/// # Panics
/// Will panic if `data` is longer than `u32::MAX` bytes, which the header can't describe.
pub fn encode(data: &[u8]) -> Vec<u8> {
    encode_with_stats(data).0
}

/// Same as [`encode`], also returning statistics about the result.
pub fn encode_with_stats(data: &[u8]) -> (Vec<u8>, EncodeStats) {
    assert!(
        data.len() <= u32::MAX as usize,
        "Input of {} bytes is too long for a single artifact",
        data.len()
    );

    let frequencies = FrequencyTable::of(data);
    vlog!(
        "Encoding {} bytes with {} distinct symbols",
        data.len(),
        frequencies.distinct()
    );

    let tree = HuffmanTree::build(&frequencies);
    let table = CodeTable::from_tree(tree.as_ref());
    let payload_bits = table.encoded_bits(&frequencies);

    let mut writer = BitWriter::with_capacity(payload_bits.div_ceil(8) as usize);
    for byte in data {
        let (code, num_bits) = table.codes[*byte as usize];
        writer.write_bits(code, num_bits);
    }
    debug_assert_eq!(writer.bits_written() as u64, payload_bits);
    let payload = writer.dump();

    let header = ArtifactHeader {
        original_length: data.len() as u32,
        symbols: table.into_lengths(),
    };
    let mut output = Vec::with_capacity(header.serialized_len() + payload.len());
    header.serialize(&mut output);
    output.extend_from_slice(&payload);

    let stats = EncodeStats {
        original_length: data.len(),
        distinct_symbols: frequencies.distinct(),
        payload_bits,
        artifact_length: output.len(),
    };
    vlog!("Encoded artifact: {:?}", stats);

    (output, stats)
}

#[cfg(test)]
mod tests {
    use super::{encode, encode_with_stats};
    use crate::common::HEADER_SIZE;

    #[test]
    fn empty_input_is_a_bare_header() {
        let (artifact, stats) = encode_with_stats(&[]);
        assert_eq!(artifact, b"HUF1\0\0\0\0\0\0");
        assert_eq!(artifact.len(), HEADER_SIZE);
        assert_eq!(stats.payload_bits, 0);
        assert_eq!(stats.ratio(), 0.0);
    }

    #[test]
    fn lone_symbol_packs_eight_per_byte() {
        assert_eq!(encode(b"aaaa"), b"HUF1\x04\0\0\0\x01\0a\x01\x00");

        let data = [7u8; 17];
        let (artifact, stats) = encode_with_stats(&data);
        assert_eq!(stats.payload_bits, 17);
        // header, one table entry, three zero bytes of payload
        assert_eq!(artifact.len(), HEADER_SIZE + 2 + 3);
        assert!(artifact[HEADER_SIZE + 2..].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn abracadabra_exact_bytes() {
        let (artifact, stats) = encode_with_stats(b"abracadabra");
        assert_eq!(
            artifact,
            &[
                b'H', b'U', b'F', b'1', 11, 0, 0, 0, 5, 0, // fixed header
                b'a', 1, b'b', 3, b'c', 3, b'd', 3, b'r', 3, // symbol table
                0x4E, 0xAC, 0x9C, // 0 100 111 0 101 0 110 0 100 111 0 + one pad bit
            ]
        );
        assert_eq!(stats.payload_bits, 23);
        assert_eq!(stats.distinct_symbols, 5);
        assert!(stats.payload_bits < 11 * 8);
    }
}
