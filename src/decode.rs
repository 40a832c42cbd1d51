//! A module for all decoding needs.
use std::io::{self, BufRead, Write};

use crate::dict::BucketTable;
use crate::pack;
use crate::seq::CodeSeq;
use crate::stream::{AllResult, ByteSink, ByteSource, CountingSink, CountingSource};
use crate::{Code, BASE_ENTRIES, MAX_ENTRIES};

/// The decompressor engine.
///
/// Owns the code→string half of the adaptive dictionary and regrows it in the
/// exact order the encoder did, deriving reset timing purely from counting
/// codes. Every call to [`Decoder::decode`] starts from a fresh dictionary.
pub struct Decoder {
    state: DecodeState,
}

struct DecodeState {
    /// The code→string half of the adaptive dictionary.
    dict: BucketTable<Code, Box<[u8]>>,
    /// The next free code, in `BASE_ENTRIES..=MAX_ENTRIES`.
    next_code: usize,
    /// All codes of the current stream, unpacked up front.
    seq: CodeSeq,
    #[cfg(test)]
    assignments: Vec<(Code, Vec<u8>)>,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder {
            state: DecodeState::new(),
        }
    }

    /// Decompress `read` in full, writing the reconstructed bytes to `write`.
    ///
    /// The packed input is read to exhaustion before any byte is produced. A
    /// trailing group of fewer than three bytes carries at most one code; a
    /// lone trailing byte is dropped rather than reported as an error.
    pub fn decode(&mut self, read: impl BufRead, write: impl Write) -> AllResult {
        let mut source = CountingSource::new(read);
        let mut sink = CountingSink::new(write);
        self.state.restart();
        let status = self.state.drive(&mut source, &mut sink);
        AllResult {
            bytes_read: source.count(),
            bytes_written: sink.count(),
            status,
        }
    }

    #[cfg(test)]
    pub(crate) fn assignments(&self) -> &[(Code, Vec<u8>)] {
        &self.state.assignments
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new()
    }
}

impl DecodeState {
    fn new() -> Self {
        DecodeState {
            dict: base_dict(),
            next_code: BASE_ENTRIES,
            seq: CodeSeq::new(),
            #[cfg(test)]
            assignments: Vec::new(),
        }
    }

    fn restart(&mut self) {
        self.reset_dict();
        self.seq.clear();
        #[cfg(test)]
        self.assignments.clear();
    }

    /// Discard the dictionary and rebuild the 256 single-byte base entries.
    fn reset_dict(&mut self) {
        self.dict = base_dict();
        self.next_code = BASE_ENTRIES;
    }

    fn drive(
        &mut self,
        source: &mut impl ByteSource,
        sink: &mut impl ByteSink,
    ) -> io::Result<()> {
        // The whole input is unpacked into the code sequence up front.
        let mut packed = Vec::new();
        while let Some(byte) = source.read_byte()? {
            packed.push(byte);
        }
        pack::unpack_into(&packed, &mut self.seq);
        self.seq.reset();

        let first = match self.seq.next() {
            Some(code) => code,
            None => return Ok(()),
        };
        let mut prev = first;
        if let Some(entry) = self.dict.get(&first).cloned() {
            write_entry(sink, &entry)?;
        }

        while let Some(code) = self.seq.next() {
            // Same cadence as the encoder: the reset is checked once per
            // code, before the code is processed.
            if self.next_code == MAX_ENTRIES {
                self.reset_dict();
            }

            let prev_entry = match self.dict.get(&prev).cloned() {
                Some(entry) => entry,
                // Unexpected; drop the code without writing or growing.
                None => continue,
            };

            match self.dict.get(&code).cloned() {
                Some(entry) => {
                    let mut grown = prev_entry.into_vec();
                    grown.push(entry[0]);
                    self.assign(grown.into_boxed_slice());
                    write_entry(sink, &entry)?;
                }
                None => {
                    // The code the encoder assigned one step ahead of us: its
                    // string is the previous one extended by its own first
                    // byte.
                    let mut grown = prev_entry.into_vec();
                    let head = grown[0];
                    grown.push(head);
                    let grown = grown.into_boxed_slice();
                    self.assign(grown.clone());
                    write_entry(sink, &grown)?;
                }
            }
            prev = code;
        }
        Ok(())
    }

    /// Hand the next free code to `entry`.
    fn assign(&mut self, entry: Box<[u8]>) {
        #[cfg(test)]
        self.assignments.push((self.next_code as Code, entry.to_vec()));
        self.dict.put(self.next_code as Code, entry);
        self.next_code += 1;
    }
}

fn write_entry(sink: &mut impl ByteSink, entry: &[u8]) -> io::Result<()> {
    for &byte in entry {
        sink.write_byte(byte)?;
    }
    Ok(())
}

fn base_dict() -> BucketTable<Code, Box<[u8]>> {
    let mut dict = BucketTable::new(BASE_ENTRIES);
    for byte in 0..BASE_ENTRIES {
        dict.put(byte as Code, vec![byte as u8].into_boxed_slice());
    }
    dict
}

#[cfg(test)]
mod tests {
    use super::Decoder;
    use crate::encode::Encoder;

    fn xorshift_bytes(len: usize) -> Vec<u8> {
        let mut state = 0x2545_f491_4f6c_dd1du64;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 32) as u8
            })
            .collect()
    }

    #[test]
    fn empty_stream_decodes_to_nothing() {
        let mut out = vec![];
        let result = Decoder::new().decode(&b""[..], &mut out);
        result.status.unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn truncated_input_degrades_gracefully() {
        let data: Vec<u8> = b"abcabcabcabc".to_vec();
        let mut packed = vec![];
        Encoder::new().encode(&data[..], &mut packed).status.unwrap();

        // Chop the stream mid-group; the dangling bytes are dropped and the
        // decodable head still comes out.
        let mut out = vec![];
        let result = Decoder::new().decode(&packed[..packed.len() - 1], &mut out);
        result.status.unwrap();
        assert!(data.starts_with(&out));
    }

    #[test]
    fn unknown_first_code_writes_nothing() {
        // 0x123 as the very first code has no entry in a fresh dictionary.
        let mut out = vec![];
        let result = Decoder::new().decode(&[0x12u8, 0x30][..], &mut out);
        result.status.unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn growth_is_deterministic_across_engines() {
        // Long enough for several dictionary resets on incompressible data.
        let data = xorshift_bytes(60_000);

        let mut packed = vec![];
        let mut enc = Encoder::new();
        enc.encode(&data[..], &mut packed).status.unwrap();

        let mut out = vec![];
        let mut dec = Decoder::new();
        dec.decode(&packed[..], &mut out).status.unwrap();
        assert_eq!(out, data);

        // Both engines must assign the same string to the same code in the
        // same order, across every reset.
        assert_eq!(enc.assignments().len(), dec.assignments().len());
        for (enc_entry, dec_entry) in enc.assignments().iter().zip(dec.assignments()) {
            assert_eq!(enc_entry, dec_entry);
        }
    }

    #[test]
    fn decoder_is_reusable_between_streams() {
        let mut packed = vec![];
        Encoder::new().encode(&b"ananas"[..], &mut packed).status.unwrap();

        let mut dec = Decoder::new();
        let mut first = vec![];
        dec.decode(&packed[..], &mut first).status.unwrap();
        let mut second = vec![];
        dec.decode(&packed[..], &mut second).status.unwrap();
        assert_eq!(first, b"ananas");
        assert_eq!(second, b"ananas");
    }
}
