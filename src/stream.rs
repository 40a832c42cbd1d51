//! The byte-stream boundary of the codec.
//!
//! Both engines see their input and output only through [`ByteSource`] and
//! [`ByteSink`], which any `std::io` reader or writer satisfies. End of input
//! is a normal condition (`Ok(None)`), never an error; a failing sink aborts
//! the whole operation.
use std::io::{self, Read, Write};

pub trait ByteSource {
    /// Read the next byte, or `None` at end of stream.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

pub trait ByteSink {
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;
}

impl<R: Read> ByteSource for R {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

impl<W: Write> ByteSink for W {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.write_all(&[byte])
    }
}

/// The result of a whole-stream operation.
pub struct AllResult {
    /// The total number of bytes consumed from the reader.
    pub bytes_read: usize,
    /// The total number of bytes written into the writer.
    pub bytes_written: usize,
    pub status: io::Result<()>,
}

/// Tallies bytes passing out of a reader.
pub(crate) struct CountingSource<R> {
    inner: R,
    count: usize,
}

impl<R: Read> CountingSource<R> {
    pub(crate) fn new(inner: R) -> Self {
        CountingSource { inner, count: 0 }
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }
}

impl<R: Read> Read for CountingSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.count += read;
        Ok(read)
    }
}

/// Tallies bytes passing into a writer.
pub(crate) struct CountingSink<W> {
    inner: W,
    count: usize,
}

impl<W: Write> CountingSink<W> {
    pub(crate) fn new(inner: W) -> Self {
        CountingSink { inner, count: 0 }
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }
}

impl<W: Write> Write for CountingSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.count += written;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteSink, ByteSource, CountingSink, CountingSource};

    #[test]
    fn slice_reads_bytewise_to_exhaustion() {
        let mut source = &b"ab"[..];
        assert_eq!(source.read_byte().unwrap(), Some(b'a'));
        assert_eq!(source.read_byte().unwrap(), Some(b'b'));
        assert_eq!(source.read_byte().unwrap(), None);
        // End of stream is sticky, not an error.
        assert_eq!(source.read_byte().unwrap(), None);
    }

    #[test]
    fn counters_tally_traffic() {
        let mut source = CountingSource::new(&b"abc"[..]);
        while source.read_byte().unwrap().is_some() {}
        assert_eq!(source.count(), 3);

        let mut out = vec![];
        let mut sink = CountingSink::new(&mut out);
        sink.write_byte(1).unwrap();
        sink.write_byte(2).unwrap();
        assert_eq!(sink.count(), 2);
        assert_eq!(out, vec![1, 2]);
    }
}
