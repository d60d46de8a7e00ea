// lzw.rs
//
// Copyright (c) 2026  gifkit developers
//
//! Lempel-Ziv-Welch decompression for GIF
use crate::error::{Error, Result};
use crate::reader::BlockReader;
use log::{debug, warn};
use std::io::Read;
use std::ops::AddAssign;

/// Code Bits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bits(u8);

impl From<u8> for Bits {
    fn from(bits: u8) -> Self {
        Bits(bits.min(Self::MAX.0))
    }
}

impl From<Bits> for u8 {
    fn from(bits: Bits) -> Self {
        bits.0
    }
}

impl AddAssign<u8> for Bits {
    fn add_assign(&mut self, rhs: u8) {
        self.0 = (self.0 + rhs).min(Self::MAX.0)
    }
}

impl Bits {
    /// Maximum code bits allowed for GIF
    const MAX: Self = Bits(12);

    /// Get the number of entries
    fn entries(self) -> u16 {
        1 << (self.0 as u16)
    }

    /// Get the bit mask
    fn mask(self) -> u32 {
        (1 << (self.0 as u32)) - 1
    }
}

/// Code type
type Code = u16;

/// Maximum LZW minimum code size accepted
pub const MAX_MIN_CODE_BITS: u8 = 11;

/// Node for code dictionary
#[derive(Clone, Copy, Debug, Default)]
struct Node {
    /// Prefix code (for codes above the clear code)
    prefix: Code,
    /// Suffix byte value
    suffix: u8,
}

/// Code dictionary
#[derive(Debug)]
struct Dictionary {
    /// Table of codes
    table: Vec<Node>,
    /// Minimum code bits
    min_code_bits: u8,
}

impl Dictionary {
    /// Create a new code dictionary
    fn new(min_code_bits: u8) -> Self {
        let mut dict = Dictionary {
            table: Vec::with_capacity(Bits::MAX.entries().into()),
            min_code_bits,
        };
        dict.reset();
        dict
    }

    /// Get the clear code
    fn clear_code(&self) -> Code {
        1 << self.min_code_bits
    }

    /// Get the end code
    fn end_code(&self) -> Code {
        self.clear_code() + 1
    }

    /// Get the next available code
    fn next_code(&self) -> Code {
        self.table.len() as Code
    }

    /// Reset the dictionary to literal codes only
    fn reset(&mut self) {
        self.table.clear();
        for byte in 0..self.clear_code() {
            self.table.push(Node {
                prefix: 0,
                suffix: byte as u8,
            });
        }
        self.table.push(Node::default()); // clear code
        self.table.push(Node::default()); // end code
    }

    /// Push a new entry
    fn push(&mut self, prefix: Code, suffix: u8) -> Result<()> {
        if self.next_code() >= Bits::MAX.entries() {
            return Err(Error::DictionaryOverflow);
        }
        self.table.push(Node { prefix, suffix });
        Ok(())
    }

    /// Expand a code onto the pixel stack (reversed).
    ///
    /// Returns the first byte of the expansion.
    fn expand_reversed(&self, code: Code, stack: &mut Vec<u8>) -> u8 {
        let clear_code = self.clear_code();
        let mut code = code;
        while code > clear_code {
            let node = self.table[code as usize];
            stack.push(node.suffix);
            code = node.prefix;
        }
        let first = self.table[code as usize].suffix;
        stack.push(first);
        first
    }
}

/// Result of decompressing one code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    /// Dictionary was reset by a clear code
    Cleared,
    /// Pixels were produced
    Produced,
    /// End code reached
    Finished,
    /// Code was above the next available code
    Invalid(Code),
}

/// LZW Data Decompressor
#[derive(Debug)]
pub struct Decompressor {
    /// Code dictionary
    dict: Dictionary,
    /// Minimum code bits
    min_code_bits: u8,
    /// Current code bits
    code_bits: Bits,
    /// Previous code
    last: Option<Code>,
    /// First byte of previous expansion
    first: u8,
    /// Pixel stack (expansions are built in reverse)
    stack: Vec<u8>,
    /// Bit accumulator
    code: u32,
    /// Number of bits in accumulator
    n_bits: u8,
    /// Sub-block terminator was consumed
    exhausted: bool,
}

impl Decompressor {
    /// Create a new decompressor
    pub fn new(min_code_bits: u8) -> Result<Self> {
        if min_code_bits > MAX_MIN_CODE_BITS {
            return Err(Error::InvalidCodeSize(min_code_bits));
        }
        Ok(Decompressor {
            dict: Dictionary::new(min_code_bits),
            min_code_bits,
            code_bits: Bits::from(min_code_bits + 1),
            last: None,
            first: 0,
            stack: Vec::with_capacity(Bits::MAX.entries().into()),
            code: 0,
            n_bits: 0,
            exhausted: false,
        })
    }

    /// Get the current code size in bits
    pub fn code_bits(&self) -> u8 {
        self.code_bits.into()
    }

    /// Get the next code which would be added to the dictionary
    pub fn next_code(&self) -> u16 {
        self.dict.next_code()
    }

    /// Check if the sub-block terminator has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Decompress a sub-block chain into at most `n_pixels` indices.
    ///
    /// Stops at the end code, at the end of the chain, after an invalid
    /// code, or once `n_pixels` indices have been produced.  The result may
    /// be shorter than `n_pixels`; the rest of the chain is left unread.
    pub fn decompress<R: Read>(
        &mut self,
        reader: &mut BlockReader<R>,
        n_pixels: usize,
    ) -> Result<Vec<u8>> {
        let mut pixels = Vec::with_capacity(n_pixels);
        'chain: while pixels.len() < n_pixels {
            let block = match reader.read_block()? {
                Some(block) => block,
                None => {
                    self.exhausted = true;
                    break;
                }
            };
            for byte in block {
                self.code |= (*byte as u32) << self.n_bits;
                self.n_bits += 8;
                while let Some(code) = self.take_code() {
                    match self.decompress_code(code, &mut pixels)? {
                        Status::Finished => break 'chain,
                        Status::Invalid(code) => {
                            warn!("invalid LZW code: {}", code);
                            break 'chain;
                        }
                        _ => (),
                    }
                    if pixels.len() >= n_pixels {
                        break 'chain;
                    }
                }
            }
        }
        pixels.truncate(n_pixels);
        debug!("decompressed {} of {} pixels", pixels.len(), n_pixels);
        Ok(pixels)
    }

    /// Take one code from the accumulator
    fn take_code(&mut self) -> Option<Code> {
        let b = u8::from(self.code_bits);
        if self.n_bits >= b {
            let code = (self.code & self.code_bits.mask()) as Code;
            self.code >>= b;
            self.n_bits -= b;
            Some(code)
        } else {
            None
        }
    }

    /// Decompress one code, appending any pixels
    pub(crate) fn decompress_code(
        &mut self,
        code: Code,
        pixels: &mut Vec<u8>,
    ) -> Result<Status> {
        let next_code = self.dict.next_code();
        if code == self.dict.clear_code() {
            self.dict.reset();
            self.code_bits = Bits::from(self.min_code_bits + 1);
            self.last = None;
            return Ok(Status::Cleared);
        }
        if code == self.dict.end_code() {
            return Ok(Status::Finished);
        }
        if code > next_code {
            return Ok(Status::Invalid(code));
        }
        let last = match self.last {
            Some(last) => last,
            None => {
                if code >= self.dict.clear_code() {
                    return Ok(Status::Invalid(code));
                }
                self.first = self.dict.table[code as usize].suffix;
                self.last = Some(code);
                pixels.push(self.first);
                return Ok(Status::Produced);
            }
        };
        self.stack.clear();
        let first = if code == next_code {
            // code not yet in dictionary: previous expansion + its first byte
            self.stack.push(self.first);
            self.dict.expand_reversed(last, &mut self.stack)
        } else {
            self.dict.expand_reversed(code, &mut self.stack)
        };
        self.dict.push(last, first)?;
        self.first = first;
        self.last = Some(code);
        let next_code = self.dict.next_code();
        if next_code == self.code_bits.entries() && next_code < Bits::MAX.entries()
        {
            self.code_bits += 1;
        }
        pixels.extend(self.stack.iter().rev());
        Ok(Status::Produced)
    }
}
