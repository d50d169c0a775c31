//! Buffered Document Loading
//!
//! Reads a whole document from any `Read` source in fixed-size chunks. The
//! event reader works on one contiguous UTF-8 buffer, so streams are drained
//! up front and converted with `core::encoding`.

use std::io::{ErrorKind as IoErrorKind, Read};

use crate::error::Result;

/// Buffer size for reading chunks
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Chunked reader that drains a `Read` source into memory
pub struct BufferedReader<R: Read> {
    reader: R,
    chunk: Vec<u8>,
}

impl<R: Read> BufferedReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_BUFFER_SIZE)
    }

    /// Create a reader that pulls `capacity` bytes per read call
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        BufferedReader {
            reader,
            chunk: vec![0u8; capacity.max(1)],
        }
    }

    /// Read everything that remains, retrying interrupted reads
    pub fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut document = Vec::new();
        loop {
            match self.reader.read(&mut self.chunk) {
                Ok(0) => return Ok(document),
                Ok(read) => document.extend_from_slice(&self.chunk[..read]),
                Err(err) if err.kind() == IoErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Read an entire XML document from a Read source
pub fn read_document<R: Read>(reader: R) -> Result<Vec<u8>> {
    BufferedReader::new(reader).read_to_end()
}
