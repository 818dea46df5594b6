//! Values shared between the encoding side
//! and the decoding side.

/// Every artifact starts with these four bytes.
pub const MAGIC_NUM: [u8; 4] = *b"HUF1";

/// Size of the fixed part of the header: magic, original length and symbol count.
pub const HEADER_SIZE: usize = 4 + 4 + 2;

/// Each symbol table entry is one byte of symbol and one byte of code length.
pub const SYMBOL_ENTRY_SIZE: usize = 2;

/// Symbols are bytes, so there can never be more distinct ones than this.
pub const MAX_SYMBOLS: usize = 256;

/// Longest code length accepted in a header.
///
/// An input of at most `u32::MAX` bytes can't produce a deeper tree: the
/// frequencies along the deepest path grow at least like the Fibonacci numbers.
pub const MAX_CODE_LENGTH: u8 = 64;
