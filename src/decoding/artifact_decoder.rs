use super::bit_reader::BitReader;
use super::errors::DecodeError;
use crate::artifact::{read_artifact_header, ArtifactHeader};
use crate::huffman::{CodeTable, HuffmanDecoder, HuffmanDecoderError};
use alloc::vec::Vec;
use core::mem;

/// Drives the decoding of one artifact through its phases.
///
/// Use [`ArtifactDecoder::run`] to go straight to the result, or
/// [`ArtifactDecoder::step`] to advance one phase at a time.
///
/// # Examples
/// ```
/// use huffpack::decoding::{ArtifactDecoder, DecoderState};
///
/// let artifact = huffpack::encode(b"hello");
/// let mut decoder = ArtifactDecoder::new(&artifact);
/// decoder.step().unwrap();
/// assert!(matches!(decoder.state(), DecoderState::ValidatingLengths { .. }));
/// assert_eq!(decoder.run().unwrap(), b"hello");
/// ```
pub struct ArtifactDecoder<'a> {
    source: &'a [u8],
    state: DecoderState<'a>,
}

#[derive(Debug)]
pub enum DecoderState<'a> {
    ParsingHeader,
    ValidatingLengths {
        header: ArtifactHeader,
        payload: &'a [u8],
    },
    DecodingPayload {
        original_length: u32,
        table: CodeTable,
        payload: &'a [u8],
    },
    /// Holds the complete output, nothing is kept for a decoder that failed
    Done(Vec<u8>),
    Failed(DecodeError),
}

impl<'a> ArtifactDecoder<'a> {
    pub fn new(source: &'a [u8]) -> ArtifactDecoder<'a> {
        ArtifactDecoder {
            source,
            state: DecoderState::ParsingHeader,
        }
    }

    pub fn state(&self) -> &DecoderState<'a> {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, DecoderState::Done(_) | DecoderState::Failed(_))
    }

    /// Advance to the next phase. Does nothing once the decoder is finished.
    ///
    /// An error moves the decoder into [`DecoderState::Failed`] for good.
    pub fn step(&mut self) -> Result<(), DecodeError> {
        let state = mem::replace(&mut self.state, DecoderState::ParsingHeader);
        match self.advance(state) {
            Ok(next) => {
                self.state = next;
                Ok(())
            }
            Err(e) => {
                vlog!("Decoding failed: {}", e);
                self.state = DecoderState::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Step until finished and hand out the decoded bytes.
    pub fn run(mut self) -> Result<Vec<u8>, DecodeError> {
        loop {
            match self.state {
                DecoderState::Done(output) => return Ok(output),
                DecoderState::Failed(e) => return Err(e),
                _ => self.step()?,
            }
        }
    }

    fn advance(&self, state: DecoderState<'a>) -> Result<DecoderState<'a>, DecodeError> {
        match state {
            DecoderState::ParsingHeader => {
                let source = self.source;
                let (header, header_len) = read_artifact_header(source)?;
                vlog!(
                    "Read header of {} bytes: original length {}, {} symbols",
                    header_len,
                    header.original_length,
                    header.symbols.len()
                );
                Ok(DecoderState::ValidatingLengths {
                    header,
                    payload: &source[header_len..],
                })
            }
            DecoderState::ValidatingLengths { header, payload } => {
                if header.symbols.is_empty() {
                    // the header reader already made sure the original length is zero
                    if !payload.is_empty() {
                        return Err(DecodeError::TrailingPayload {
                            extra_bytes: payload.len(),
                        });
                    }
                    return Ok(DecoderState::Done(Vec::new()));
                }
                let table = CodeTable::from_lengths(header.symbols)?;
                vlog!("Code lengths valid, longest code has {} bits", table.max_length());
                Ok(DecoderState::DecodingPayload {
                    original_length: header.original_length,
                    table,
                    payload,
                })
            }
            DecoderState::DecodingPayload {
                original_length,
                table,
                payload,
            } => {
                let output = decode_payload(original_length, &table, payload)?;
                vlog!("Decoded {} bytes from {} payload bytes", output.len(), payload.len());
                Ok(DecoderState::Done(output))
            }
            finished @ (DecoderState::Done(_) | DecoderState::Failed(_)) => Ok(finished),
        }
    }
}

/// Decode exactly `original_length` symbols. The pad bits of the last byte
/// are never looked at.
fn decode_payload(
    original_length: u32,
    table: &CodeTable,
    payload: &[u8],
) -> Result<Vec<u8>, DecodeError> {
    let decoder = HuffmanDecoder::new(table);
    let mut br = BitReader::new(payload);

    // every symbol takes at least one bit, don't trust the header beyond that
    let capacity = usize::min(original_length as usize, payload.len().saturating_mul(8));
    let mut output = Vec::with_capacity(capacity);

    for decoded in 0..original_length {
        match decoder.decode_symbol(&mut br) {
            Ok(symbol) => output.push(symbol),
            Err(HuffmanDecoderError::GetBitsError(_)) => {
                return Err(DecodeError::TruncatedPayload {
                    decoded,
                    expected: original_length,
                })
            }
            Err(HuffmanDecoderError::InvalidCode { bit_offset, .. }) => {
                return Err(DecodeError::InvalidCode { bit_offset })
            }
        }
    }

    let used_bytes = br.bits_read().div_ceil(8);
    if used_bytes < payload.len() {
        return Err(DecodeError::TrailingPayload {
            extra_bytes: payload.len() - used_bytes,
        });
    }

    Ok(output)
}
