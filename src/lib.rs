//! # 12-bit LZW encoder and decoder
//!
//! This crate provides an [`encode::Encoder`] and a [`decode::Decoder`] for an
//! adaptive-dictionary LZW codec with a fixed code width of 12 bits. Codes are
//! written in pairs, two big-endian 12-bit codes packed into three bytes, so a
//! packed stream carries no padding bits except for a final partial group.
//!
//! There is no clear code and no end code on the wire. The dictionary holds at
//! most 4096 entries; when the code space is exhausted both sides rebuild the
//! 256 single-byte base entries at the same position in the stream, so reset
//! timing is recovered purely by counting codes.
//!
//! Exemplary use of the encoder:
//!
//! ```
//! use lzw12::encode::Encoder;
//! let data = b"TOBEORNOTTOBEORTOBEORNOT";
//! let mut compressed = vec![];
//!
//! let mut enc = Encoder::new();
//! enc.encode(&data[..], &mut compressed).status.unwrap();
//! ```

/// The fixed width of every code on the wire.
pub(crate) const MAX_CODE_BITS: u8 = 12;
/// Total size of the code space, `1 << MAX_CODE_BITS`.
pub(crate) const MAX_ENTRIES: usize = 1 << MAX_CODE_BITS as usize;
/// Number of single-byte base entries present after every dictionary reset.
pub(crate) const BASE_ENTRIES: usize = 256;

/// Alias for a LZW code point.
pub(crate) type Code = u16;

pub mod decode;
pub mod dict;
pub mod encode;
pub mod pack;
pub mod seq;
pub mod stream;
