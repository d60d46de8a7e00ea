// reader.rs
//
// Copyright (c) 2026  gifkit developers
//
//! Sub-block reader
use crate::error::Result;
use std::io::{ErrorKind, Read};

/// Maximum sub-block length
const BLOCK_SZ: usize = 255;

/// Reader for fixed-size fields and length-prefixed sub-blocks.
///
/// A sub-block chain is a sequence of `[length][payload]` chunks, ended by
/// a zero length.  Short reads are reported as
/// [UnexpectedEndOfFile](enum.Error.html#variant.UnexpectedEndOfFile).
pub struct BlockReader<R: Read> {
    /// Reader for input data
    reader: R,
    /// Buffer for one sub-block
    buffer: [u8; BLOCK_SZ],
}

impl<R: Read> BlockReader<R> {
    /// Create a new block reader
    pub fn new(reader: R) -> Self {
        BlockReader {
            reader,
            buffer: [0; BLOCK_SZ],
        }
    }

    /// Read exactly enough bytes to fill a buffer
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        Ok(self.reader.read_exact(buf)?)
    }

    /// Read a fixed-size array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array()?;
        Ok(b)
    }

    /// Read one byte, or `None` at end of stream
    pub fn read_label(&mut self) -> Result<Option<u8>> {
        let mut buf = [0; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read a little-endian `u16`
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read one sub-block.
    ///
    /// Returns `None` for the zero-length terminator.
    pub fn read_block(&mut self) -> Result<Option<&[u8]>> {
        let len = self.read_u8()? as usize;
        if len == 0 {
            return Ok(None);
        }
        self.reader.read_exact(&mut self.buffer[..len])?;
        Ok(Some(&self.buffer[..len]))
    }

    /// Skip a fixed number of bytes
    pub fn skip(&mut self, n_bytes: usize) -> Result<()> {
        let mut rem = n_bytes;
        while rem > 0 {
            let n = rem.min(BLOCK_SZ);
            self.reader.read_exact(&mut self.buffer[..n])?;
            rem -= n;
        }
        Ok(())
    }

    /// Skip sub-blocks through the terminator.
    ///
    /// Returns the number of payload bytes skipped.
    pub fn skip_chain(&mut self) -> Result<usize> {
        let mut n_bytes = 0;
        while let Some(block) = self.read_block()? {
            n_bytes += block.len();
        }
        Ok(n_bytes)
    }

    /// Read sub-blocks through the terminator, collecting all payloads
    pub fn read_chain(&mut self) -> Result<Vec<Vec<u8>>> {
        let mut blocks = vec![];
        while let Some(block) = self.read_block()? {
            blocks.push(block.to_vec());
        }
        Ok(blocks)
    }
}
