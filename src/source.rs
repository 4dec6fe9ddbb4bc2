//! Character sources feeding the tokenizer
//!
//! The tokenizer never sees bytes. A [ChunkSource] hands out decoded
//! characters into a caller-supplied buffer:
//! - [StrSource] for text already in memory
//! - [ReaderSource] for any `io::Read`, decoded with a named [Encoding]

use crate::config::Encoding;
use crate::error::{CsvError, Result};
use std::io::{ErrorKind, Read};
use std::str::Chars;

/// Bytes requested from the reader per read call
const READ_CAPACITY: usize = 8 * 1024;

/// Supplier of decoded characters in bounded chunks
pub trait ChunkSource {
    /// Write up to `buf.len()` characters into `buf`, returning how many
    /// were written. Fewer than requested means the stream is at its end.
    fn fill(&mut self, buf: &mut [char]) -> Result<usize>;

    /// `true` once every character has been handed out
    fn at_end(&self) -> bool;
}

impl<S: ChunkSource + ?Sized> ChunkSource for &mut S {
    fn fill(&mut self, buf: &mut [char]) -> Result<usize> {
        (**self).fill(buf)
    }

    fn at_end(&self) -> bool {
        (**self).at_end()
    }
}

/// In-memory text source
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl ChunkSource for StrSource<'_> {
    fn fill(&mut self, buf: &mut [char]) -> Result<usize> {
        let mut written = 0;
        for slot in buf.iter_mut() {
            match self.chars.next() {
                Some(ch) => {
                    *slot = ch;
                    written += 1;
                }
                None => break,
            }
        }
        Ok(written)
    }

    fn at_end(&self) -> bool {
        self.chars.as_str().is_empty()
    }
}

/// Byte reader decoded into characters
///
/// UTF-8 sequences split across reads are carried over to the next read.
/// A leading byte-order mark is dropped.
pub struct ReaderSource<R> {
    reader: R,
    encoding: Encoding,

    // Undecoded tail of the last read (incomplete UTF-8 sequence)
    pending: Vec<u8>,
    decoded: Vec<char>,
    decoded_pos: usize,

    bytes_decoded: u64,
    bom_checked: bool,
    reader_done: bool,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R, encoding: Encoding) -> Self {
        Self {
            reader,
            encoding,
            pending: Vec::with_capacity(4),
            decoded: Vec::with_capacity(READ_CAPACITY),
            decoded_pos: 0,
            bytes_decoded: 0,
            bom_checked: false,
            reader_done: false,
        }
    }

    /// Give back the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_chunk(&mut self, chunk: &mut [u8]) -> Result<usize> {
        loop {
            match self.reader.read(chunk) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(CsvError::Io(e)),
            }
        }
    }

    /// Replace the decoded buffer with the next read's characters
    fn decode_next(&mut self) -> Result<()> {
        self.decoded.clear();
        self.decoded_pos = 0;

        let mut chunk = [0u8; READ_CAPACITY];
        let n = self.read_chunk(&mut chunk)?;
        if n == 0 {
            self.reader_done = true;
            if !self.pending.is_empty() {
                return Err(CsvError::Encoding(format!(
                    "Truncated {} sequence at byte {}",
                    self.encoding, self.bytes_decoded
                )));
            }
            return Ok(());
        }

        match self.encoding {
            Encoding::Latin1 => {
                self.decoded.extend(chunk[..n].iter().map(|&b| b as char));
                self.bytes_decoded += n as u64;
            }
            Encoding::Utf8 => {
                self.pending.extend_from_slice(&chunk[..n]);
                let valid = match std::str::from_utf8(&self.pending) {
                    Ok(text) => text.len(),
                    Err(e) if e.error_len().is_none() => e.valid_up_to(),
                    Err(e) => {
                        return Err(CsvError::Encoding(format!(
                            "Invalid {} sequence at byte {}",
                            self.encoding,
                            self.bytes_decoded + e.valid_up_to() as u64
                        )))
                    }
                };
                let text = std::str::from_utf8(&self.pending[..valid])
                    .map_err(|e| CsvError::Encoding(e.to_string()))?;
                self.decoded.extend(text.chars());
                self.pending.drain(..valid);
                self.bytes_decoded += valid as u64;
            }
        }

        if !self.bom_checked && !self.decoded.is_empty() {
            self.bom_checked = true;
            if self.encoding == Encoding::Utf8 && self.decoded[0] == '\u{feff}' {
                self.decoded_pos = 1;
            }
        }
        Ok(())
    }
}

impl<R: Read> ChunkSource for ReaderSource<R> {
    fn fill(&mut self, buf: &mut [char]) -> Result<usize> {
        let mut written = 0;
        while written < buf.len() {
            let available = self.decoded.len() - self.decoded_pos;
            if available == 0 {
                if self.reader_done {
                    break;
                }
                self.decode_next()?;
                continue;
            }
            let n = available.min(buf.len() - written);
            buf[written..written + n]
                .copy_from_slice(&self.decoded[self.decoded_pos..self.decoded_pos + n]);
            self.decoded_pos += n;
            written += n;
        }
        Ok(written)
    }

    fn at_end(&self) -> bool {
        self.reader_done && self.decoded_pos == self.decoded.len()
    }
}
