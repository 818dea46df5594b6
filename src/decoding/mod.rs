//! Structures and utilities used for decoding artifacts

pub mod artifact_decoder;
pub mod bit_reader;
pub mod errors;

pub use artifact_decoder::{ArtifactDecoder, DecoderState};

use alloc::vec::Vec;
use errors::DecodeError;

/// Restore the original bytes from an artifact produced by [`crate::encode`].
///
/// Either the complete input is returned or an error, never a partial result.
pub fn decode(artifact: &[u8]) -> Result<Vec<u8>, DecodeError> {
    ArtifactDecoder::new(artifact).run()
}
