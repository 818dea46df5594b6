use crate::common::{MAX_CODE_LENGTH, MAX_SYMBOLS};
use crate::frequency::FrequencyTable;
use crate::huffman::HuffmanTree;
use alloc::vec;
use alloc::vec::Vec;

/// The code length assigned to one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolLength {
    pub symbol: u8,
    pub length: u8,
}

impl SymbolLength {
    fn canonical_key(&self) -> (u8, u8) {
        (self.length, self.symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CodeLengthError {
    #[error("Code length of symbol {symbol} is {got}, should be between 1 and {MAX_CODE_LENGTH}")]
    LengthOutOfRange { symbol: u8, got: u8 },
    #[error("Symbol {symbol} is listed more than once")]
    DuplicateSymbol { symbol: u8 },
    #[error("Entry {index} (symbol {symbol}) breaks the (length, symbol) ordering of the table")]
    NotCanonicalOrder { index: usize, symbol: u8 },
    #[error("Code lengths violate the Kraft inequality: they use {used} of {available} units of code space")]
    KraftInequalityViolated { used: u128, available: u128 },
}

/// Canonical prefix codes for a set of symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    /// Index is the symbol, values are the code in the lower bits of the u64 and the amount of bits in the u8.
    /// Absent symbols have zero bits.
    pub(crate) codes: Vec<(u64, u8)>,
    /// Sorted by length, then symbol
    lengths: Vec<SymbolLength>,
}

impl CodeTable {
    /// Derive the canonical table for the leaf depths of `tree`. No tree means
    /// an empty table.
    pub fn from_tree(tree: Option<&HuffmanTree>) -> Self {
        let mut lengths = tree.map(HuffmanTree::code_lengths).unwrap_or_default();
        lengths.sort_unstable_by_key(SymbolLength::canonical_key);
        Self::assign_canonical(lengths)
    }

    /// Rebuild a table from a (symbol, length) list as it is stored in an artifact header.
    ///
    /// The list must already be in canonical order and its lengths must satisfy
    /// the Kraft inequality, otherwise no prefix code exists for it.
    pub fn from_lengths(lengths: Vec<SymbolLength>) -> Result<Self, CodeLengthError> {
        validate_lengths(&lengths)?;
        Ok(Self::assign_canonical(lengths))
    }

    /// The first symbol gets all zeros, each following code is the previous
    /// one plus one, shifted left to the new length.
    fn assign_canonical(lengths: Vec<SymbolLength>) -> Self {
        let mut codes = vec![(0, 0); MAX_SYMBOLS];
        // wide enough that the shift after a full 64 bit code can't overflow
        let mut code: u128 = 0;
        let mut prev_length = 0;
        for (idx, entry) in lengths.iter().enumerate() {
            if idx > 0 {
                code = (code + 1) << (entry.length - prev_length);
            }
            prev_length = entry.length;
            codes[entry.symbol as usize] = (code as u64, entry.length);
        }

        CodeTable { codes, lengths }
    }

    /// The code and its length in bits for `symbol`, if the symbol is part of the table.
    pub fn code(&self, symbol: u8) -> Option<(u64, u8)> {
        let (code, num_bits) = self.codes[symbol as usize];
        (num_bits > 0).then_some((code, num_bits))
    }

    /// The (symbol, length) pairs in canonical order.
    pub fn lengths(&self) -> &[SymbolLength] {
        &self.lengths
    }

    pub fn into_lengths(self) -> Vec<SymbolLength> {
        self.lengths
    }

    pub fn max_length(&self) -> u8 {
        self.lengths.last().map_or(0, |entry| entry.length)
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Number of bits needed to encode an input with these frequencies.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .map(|(symbol, count)| count * u64::from(self.codes[symbol as usize].1))
            .sum()
    }
}

/// Sum of `2^(MAX_CODE_LENGTH - length)` over all entries.
///
/// A prefix code for the lengths exists iff this is at most `2^MAX_CODE_LENGTH`.
pub fn kraft_sum(lengths: &[SymbolLength]) -> u128 {
    lengths
        .iter()
        .map(|entry| 1u128 << (MAX_CODE_LENGTH - entry.length))
        .sum()
}

fn validate_lengths(lengths: &[SymbolLength]) -> Result<(), CodeLengthError> {
    use CodeLengthError as err;

    let mut seen = [false; MAX_SYMBOLS];
    for (index, entry) in lengths.iter().enumerate() {
        if entry.length == 0 || entry.length > MAX_CODE_LENGTH {
            return Err(err::LengthOutOfRange {
                symbol: entry.symbol,
                got: entry.length,
            });
        }
        if seen[entry.symbol as usize] {
            return Err(err::DuplicateSymbol {
                symbol: entry.symbol,
            });
        }
        seen[entry.symbol as usize] = true;
        if index > 0 && lengths[index - 1].canonical_key() > entry.canonical_key() {
            return Err(err::NotCanonicalOrder {
                index,
                symbol: entry.symbol,
            });
        }
    }

    let used = kraft_sum(lengths);
    let available = 1u128 << MAX_CODE_LENGTH;
    if used > available {
        return Err(err::KraftInequalityViolated { used, available });
    }
    Ok(())
}
