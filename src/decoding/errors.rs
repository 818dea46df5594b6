//! Errors that might occur while decoding an artifact

use crate::artifact::ReadHeaderError;
use crate::huffman::CodeLengthError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error(transparent)]
    InvalidHeader(#[from] ReadHeaderError),
    #[error(transparent)]
    InconsistentCodeLengths(#[from] CodeLengthError),
    #[error("Payload ended after {decoded} of {expected} symbols")]
    TruncatedPayload { decoded: u32, expected: u32 },
    #[error("No code matches the payload bits starting at bit {bit_offset}")]
    InvalidCode { bit_offset: usize },
    #[error("Payload has {extra_bytes} bytes left over after the last symbol")]
    TrailingPayload { extra_bytes: usize },
}

/// The category of a [`DecodeError`], without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    /// Magic mismatch, truncated header, or a symbol count that doesn't fit the header bytes
    InvalidHeader,
    /// The declared lengths can't form a canonical prefix code
    InconsistentCodeLengths,
    /// The payload ran out before all symbols were decoded
    TruncatedPayload,
    InvalidCode,
    TrailingPayload,
}

impl DecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::InvalidHeader(_) => DecodeErrorKind::InvalidHeader,
            DecodeError::InconsistentCodeLengths(_) => DecodeErrorKind::InconsistentCodeLengths,
            DecodeError::TruncatedPayload { .. } => DecodeErrorKind::TruncatedPayload,
            DecodeError::InvalidCode { .. } => DecodeErrorKind::InvalidCode,
            DecodeError::TrailingPayload { .. } => DecodeErrorKind::TrailingPayload,
        }
    }
}
