//! Packing between 12-bit codes and the byte stream.
//!
//! Two big-endian 12-bit codes A and B occupy exactly three bytes:
//!
//! ```text
//! b0 = A >> 4
//! b1 = (A & 0xf) << 4 | B >> 8
//! b2 = B & 0xff
//! ```
//!
//! The packer buffers the first code of each pair; the second completes the
//! group and flushes it. A stream carrying an odd number of codes ends in a
//! two-byte partial group holding the unpaired code in its upper 12 bits.
use crate::{seq::CodeSeq, Code};

/// Stateful half of the codec: accumulates codes pairwise into 3-byte groups.
#[derive(Default)]
pub struct Packer {
    /// Scratch for the group under construction.
    buffer: [u8; 3],
    /// Whether the first code of the pair has been buffered.
    pending: bool,
}

impl Packer {
    pub fn new() -> Self {
        Packer::default()
    }

    /// Buffer `code`, returning the finished 3-byte group when it completes a
    /// pair. Only the low 12 bits of `code` are representable.
    pub fn push(&mut self, code: Code) -> Option<[u8; 3]> {
        debug_assert!(code < 1 << 12);
        if !self.pending {
            self.buffer[0] = (code >> 4) as u8;
            self.buffer[1] = ((code & 0xf) << 4) as u8;
            self.pending = true;
            None
        } else {
            self.buffer[1] |= (code >> 8) as u8;
            self.buffer[2] = (code & 0xff) as u8;
            self.pending = false;
            let group = self.buffer;
            self.buffer = [0; 3];
            Some(group)
        }
    }

    /// Flush a trailing unpaired code as a 2-byte partial group. Returns
    /// `None` when the code count was even and nothing is buffered.
    pub fn finish(&mut self) -> Option<[u8; 2]> {
        if !self.pending {
            return None;
        }
        let tail = [self.buffer[0], self.buffer[1]];
        self.buffer = [0; 3];
        self.pending = false;
        Some(tail)
    }
}

/// Split a packed byte stream into codes, appending them to `seq`.
///
/// Every full 3-byte group yields two codes. A trailing 2-byte group yields
/// the single code it carries; a trailing single byte holds no complete code
/// and is dropped.
pub fn unpack_into(bytes: &[u8], seq: &mut CodeSeq) {
    let mut groups = bytes.chunks_exact(3);
    for group in &mut groups {
        seq.push(Code::from(group[0]) << 4 | Code::from(group[1] >> 4));
        seq.push(Code::from(group[1] & 0xf) << 8 | Code::from(group[2]));
    }
    if let [b0, b1] = *groups.remainder() {
        seq.push(Code::from(b0) << 4 | Code::from(b1 >> 4));
    }
}
