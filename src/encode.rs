//! A module for all encoding needs.
use std::io::{self, BufRead, Write};

use crate::dict::BucketTable;
use crate::pack::Packer;
use crate::stream::{AllResult, ByteSink, ByteSource, CountingSink, CountingSource};
use crate::{Code, BASE_ENTRIES, MAX_ENTRIES};

/// The compressor engine.
///
/// Owns the string→code half of the adaptive dictionary and drives the
/// longest-match search over the input. Every call to [`Encoder::encode`]
/// starts from a fresh dictionary; one encoder may be reused for several
/// streams in sequence, never concurrently.
pub struct Encoder {
    state: EncodeState,
}

struct EncodeState {
    /// The string→code half of the adaptive dictionary.
    dict: BucketTable<Box<[u8]>, Code>,
    /// The next free code, in `BASE_ENTRIES..=MAX_ENTRIES`.
    next_code: usize,
    /// The longest dictionary string matching the input consumed so far.
    prefix: Vec<u8>,
    /// Pairs emitted codes into 3-byte groups.
    packer: Packer,
    #[cfg(test)]
    assignments: Vec<(Code, Vec<u8>)>,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            state: EncodeState::new(),
        }
    }

    /// Compress `read` in full, writing the packed stream to `write`.
    ///
    /// Reads until end of input, then flushes the final prefix and any
    /// half-filled group. An empty input produces an empty output.
    pub fn encode(&mut self, read: impl BufRead, write: impl Write) -> AllResult {
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

impl Default for Encoder {
    fn default() -> Self {
        Encoder::new()
    }
}

impl EncodeState {
    fn new() -> Self {
        EncodeState {
            dict: base_dict(),
            next_code: BASE_ENTRIES,
            prefix: Vec::new(),
            packer: Packer::new(),
            #[cfg(test)]
            assignments: Vec::new(),
        }
    }

    fn restart(&mut self) {
        self.reset_dict();
        self.prefix.clear();
        self.packer = Packer::new();
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
        let first = match source.read_byte()? {
            Some(byte) => byte,
            None => return Ok(()),
        };
        self.prefix.push(first);

        while let Some(byte) = source.read_byte()? {
            // The reset is checked once per byte, before the byte is
            // processed. At this point the prefix is a single base entry
            // again, so it survives the rebuild.
            if self.next_code == MAX_ENTRIES {
                self.reset_dict();
            }

            self.prefix.push(byte);
            if !self.dict.contains(&self.prefix[..]) {
                let extended = self.prefix.clone().into_boxed_slice();
                self.prefix.pop();
                self.emit_prefix(sink)?;
                self.assign(extended);
                self.prefix.clear();
                self.prefix.push(byte);
            }
        }

        // Drain. The trailing prefix is never empty once a byte was read.
        self.emit_prefix(sink)?;
        if let Some(tail) = self.packer.finish() {
            for &byte in tail.iter() {
                sink.write_byte(byte)?;
            }
        }
        Ok(())
    }

    /// Emit the code of the current prefix through the packer.
    fn emit_prefix(&mut self, sink: &mut impl ByteSink) -> io::Result<()> {
        let code = match self.dict.get(&self.prefix[..]) {
            Some(&code) => code,
            // The prefix only ever grows through the dictionary, so it is
            // always present; there is nothing sensible to emit otherwise.
            None => return Ok(()),
        };
        if let Some(group) = self.packer.push(code) {
            for &byte in group.iter() {
                sink.write_byte(byte)?;
            }
        }
        Ok(())
    }

    /// Hand the next free code to `entry`.
    fn assign(&mut self, entry: Box<[u8]>) {
        #[cfg(test)]
        self.assignments.push((self.next_code as Code, entry.to_vec()));
        self.dict.put(entry, self.next_code as Code);
        self.next_code += 1;
    }
}

fn base_dict() -> BucketTable<Box<[u8]>, Code> {
    let mut dict = BucketTable::new(BASE_ENTRIES);
    for byte in 0..BASE_ENTRIES {
        dict.put(vec![byte as u8].into_boxed_slice(), byte as Code);
    }
    dict
}
