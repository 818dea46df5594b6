//! A canonical Huffman codec.
//!
//! [`encode`] turns any byte sequence into a self-describing artifact: a small
//! header listing the code length of every symbol that occurs in the input,
//! followed by the bit-packed canonical codes. [`decode`] reverses that.
//!
//! ```
//! let artifact = huffpack::encode(b"abracadabra");
//! let restored = huffpack::decode(&artifact).unwrap();
//! assert_eq!(restored, b"abracadabra");
//! ```
#![no_std]
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

macro_rules! vlog {
    ($($x:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($x)*);
    }
}

pub mod artifact;
pub mod common;
pub mod decoding;
pub mod encoding;
pub mod frequency;
pub mod huffman;
mod tests;

pub use decoding::errors::{DecodeError, DecodeErrorKind};
pub use decoding::{decode, ArtifactDecoder};
pub use encoding::{encode, encode_with_stats, EncodeStats};
