//! The artifact header: magic, original length and the canonical (symbol, length) list.
//!
//! ```text
//! | magic "HUF1" | original length u32 LE | symbol count u16 LE | (symbol u8, length u8) * count | payload |
//! ```
//!
//! The payload has no length field, it is the rest of the artifact.

use crate::common::{HEADER_SIZE, MAGIC_NUM, MAX_SYMBOLS, SYMBOL_ENTRY_SIZE};
use crate::huffman::SymbolLength;
use alloc::vec::Vec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHeader {
    /// Number of bytes in the uncompressed input
    pub original_length: u32,
    /// Code lengths sorted by length, then symbol
    pub symbols: Vec<SymbolLength>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ReadHeaderError {
    #[error("Artifact is {got} bytes long, the fixed header alone needs {HEADER_SIZE} bytes")]
    HeaderTooShort { got: usize },
    #[error("Read wrong magic number: {0:02X?}")]
    BadMagicNumber([u8; 4]),
    #[error("Header declares {got} distinct symbols, there can't be more than {MAX_SYMBOLS}")]
    SymbolCountTooLarge { got: u16 },
    #[error("Symbol table needs {need} bytes but only {got} bytes are left")]
    SymbolTableTruncated { got: usize, need: usize },
    #[error("Header declares an input of {original_length} bytes but an empty symbol table")]
    MissingSymbolTable { original_length: u32 },
}

impl ArtifactHeader {
    pub fn serialize(&self, output: &mut Vec<u8>) {
        vlog!("Serializing header: {:?}", self);
        output.extend_from_slice(&MAGIC_NUM);
        output.extend_from_slice(&self.original_length.to_le_bytes());
        // at most 256 entries, always fits
        output.extend_from_slice(&(self.symbols.len() as u16).to_le_bytes());
        for entry in &self.symbols {
            output.push(entry.symbol);
            output.push(entry.length);
        }
    }

    /// Size of this header once serialized
    pub fn serialized_len(&self) -> usize {
        HEADER_SIZE + self.symbols.len() * SYMBOL_ENTRY_SIZE
    }
}

/// Parse the header at the start of `source`, returning it along with the
/// number of bytes it occupied.
///
/// Only the layout is checked here. Whether the lengths describe a valid prefix
/// code is up to [`crate::huffman::CodeTable::from_lengths`].
pub fn read_artifact_header(source: &[u8]) -> Result<(ArtifactHeader, usize), ReadHeaderError> {
    use ReadHeaderError as err;

    if source.len() < HEADER_SIZE {
        return Err(err::HeaderTooShort { got: source.len() });
    }

    let magic_num = [source[0], source[1], source[2], source[3]];
    if magic_num != MAGIC_NUM {
        return Err(err::BadMagicNumber(magic_num));
    }

    let original_length = u32::from_le_bytes([source[4], source[5], source[6], source[7]]);
    let symbol_count = u16::from_le_bytes([source[8], source[9]]);
    if symbol_count as usize > MAX_SYMBOLS {
        return Err(err::SymbolCountTooLarge { got: symbol_count });
    }
    if symbol_count == 0 && original_length > 0 {
        return Err(err::MissingSymbolTable { original_length });
    }

    let table_len = symbol_count as usize * SYMBOL_ENTRY_SIZE;
    let table_raw = &source[HEADER_SIZE..];
    if table_raw.len() < table_len {
        return Err(err::SymbolTableTruncated {
            got: table_raw.len(),
            need: table_len,
        });
    }

    let symbols = table_raw[..table_len]
        .chunks_exact(SYMBOL_ENTRY_SIZE)
        .map(|entry| SymbolLength {
            symbol: entry[0],
            length: entry[1],
        })
        .collect();

    Ok((
        ArtifactHeader {
            original_length,
            symbols,
        },
        HEADER_SIZE + table_len,
    ))
}
