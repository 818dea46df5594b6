use crate::decoding::bit_reader::{BitReader, GetBitsError};
use crate::huffman::CodeTable;
use alloc::vec;
use alloc::vec::Vec;

/// Walks canonical codes bit by bit without materializing the tree.
///
/// Canonical codes of one length are consecutive integers, so after reading
/// `n` bits it is enough to check whether they fall into the range of codes
/// with length `n`. That is the same walk as going down the canonical tree,
/// one level per bit.
#[derive(Debug)]
pub struct HuffmanDecoder {
    /// Symbols in canonical order
    symbols: Vec<u8>,
    /// Index is the code length, value is how many codes have that length
    counts: Vec<u32>,
    /// Index is the code length, value is the smallest code of that length
    first_codes: Vec<u128>,
    /// Index is the code length, value is where the symbols of that length start in `symbols`
    first_indexes: Vec<usize>,
    pub max_num_bits: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum HuffmanDecoderError {
    #[error(transparent)]
    GetBitsError(#[from] GetBitsError),
    #[error("No code matches the {max_num_bits} bits starting at bit {bit_offset}")]
    InvalidCode { bit_offset: usize, max_num_bits: u8 },
}

impl HuffmanDecoder {
    pub fn new(table: &CodeTable) -> HuffmanDecoder {
        let max_num_bits = table.max_length();
        let slots = max_num_bits as usize + 1;

        let mut counts = vec![0u32; slots];
        for entry in table.lengths() {
            counts[entry.length as usize] += 1;
        }

        let mut first_codes = vec![0u128; slots];
        let mut first_indexes = vec![0usize; slots];
        let mut code = 0u128;
        let mut index = 0usize;
        for num_bits in 1..slots {
            first_codes[num_bits] = code;
            first_indexes[num_bits] = index;
            code = (code + u128::from(counts[num_bits])) << 1;
            index += counts[num_bits] as usize;
        }

        HuffmanDecoder {
            symbols: table.lengths().iter().map(|entry| entry.symbol).collect(),
            counts,
            first_codes,
            first_indexes,
            max_num_bits,
        }
    }

    /// Read one code from `br` and return its symbol.
    ///
    /// Fails if the reader runs dry in the middle of a code, or if the bits
    /// don't match any code, which can only happen for incomplete codes.
    pub fn decode_symbol(&self, br: &mut BitReader<'_>) -> Result<u8, HuffmanDecoderError> {
        let bit_offset = br.bits_read();
        let mut code = 0u128;
        for num_bits in 1..=self.max_num_bits as usize {
            code = (code << 1) | u128::from(br.get_bit()?);
            if let Some(offset) = code.checked_sub(self.first_codes[num_bits]) {
                if offset < u128::from(self.counts[num_bits]) {
                    return Ok(self.symbols[self.first_indexes[num_bits] + offset as usize]);
                }
            }
        }
        Err(HuffmanDecoderError::InvalidCode {
            bit_offset,
            max_num_bits: self.max_num_bits,
        })
    }
}
