/// Huffman coding is a method of encoding where symbols are assigned a code,
/// and more commonly used symbols get shorter codes, and less commonly
/// used symbols get longer codes. Codes are prefix free, meaning no two codes
/// will start with the same sequence of bits.
///
/// Only code lengths are ever stored. The actual bit patterns are the canonical
/// codes for those lengths, so encoder and decoder derive identical tables from
/// the same (symbol, length) list.
pub mod code_table;
pub mod huffman_decoder;
pub mod tree;

pub use code_table::{CodeLengthError, CodeTable, SymbolLength};
pub use huffman_decoder::{HuffmanDecoder, HuffmanDecoderError};
pub use tree::{HuffmanTree, TreeNode};
