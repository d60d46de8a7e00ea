// testgif.rs
//
// Copyright (c) 2026  gifkit developers
//
//! GIF stream builders for unit tests.
//!
//! The LZW builder emits codes with the same code-size schedule the
//! decompressor follows, so literal-only streams are valid GIF data.

/// Builder for an LZW sub-block chain
pub struct LzwBuilder {
    min_code_bits: u8,
    code_bits: u8,
    next_code: u16,
    has_last: bool,
    bytes: Vec<u8>,
    acc: u32,
    n_bits: u8,
}

impl LzwBuilder {
    /// Create a builder; a clear code is emitted first
    pub fn new(min_code_bits: u8) -> Self {
        let mut b = LzwBuilder {
            min_code_bits,
            code_bits: min_code_bits + 1,
            next_code: (1 << min_code_bits) + 2,
            has_last: false,
            bytes: vec![],
            acc: 0,
            n_bits: 0,
        };
        b.clear();
        b
    }

    fn clear_code(&self) -> u16 {
        1 << self.min_code_bits
    }

    /// Emit one raw code, tracking the decoder's dictionary growth
    pub fn code(&mut self, code: u16) -> &mut Self {
        self.acc |= (code as u32) << self.n_bits;
        self.n_bits += self.code_bits;
        while self.n_bits >= 8 {
            self.bytes.push(self.acc as u8);
            self.acc >>= 8;
            self.n_bits -= 8;
        }
        let clear_code = self.clear_code();
        if code == clear_code {
            self.code_bits = self.min_code_bits + 1;
            self.next_code = clear_code + 2;
            self.has_last = false;
        } else if code == clear_code + 1 {
            // end code
        } else if !self.has_last {
            self.has_last = true;
        } else {
            self.next_code += 1;
            if self.next_code == 1 << self.code_bits && self.next_code < 4096 {
                self.code_bits += 1;
            }
        }
        self
    }

    /// Emit a clear code
    pub fn clear(&mut self) -> &mut Self {
        self.code(self.clear_code())
    }

    /// Emit a literal index
    pub fn literal(&mut self, index: u8) -> &mut Self {
        if self.has_last && self.next_code >= 4096 {
            self.clear();
        }
        self.code(index.into())
    }

    /// Emit literal indices
    pub fn literals(&mut self, indices: &[u8]) -> &mut Self {
        for index in indices {
            self.literal(*index);
        }
        self
    }

    /// Finish with an end code and terminator
    pub fn finish(&mut self) -> Vec<u8> {
        self.code(self.clear_code() + 1);
        self.finish_without_end()
    }

    /// Finish with only the terminator
    pub fn finish_without_end(&mut self) -> Vec<u8> {
        if self.n_bits > 0 {
            self.bytes.push(self.acc as u8);
            self.acc = 0;
            self.n_bits = 0;
        }
        let mut chain = vec![];
        for block in self.bytes.chunks(255) {
            chain.push(block.len() as u8);
            chain.extend_from_slice(block);
        }
        chain.push(0);
        chain
    }
}

/// Builder for a complete GIF stream
pub struct GifBuilder {
    bytes: Vec<u8>,
}

impl GifBuilder {
    /// Start a stream with header and logical screen descriptor.
    ///
    /// `colors` is the global color table (RGB triplets); its entry count
    /// must be a power of two from 2 to 256, or zero for no table.
    pub fn new(width: u16, height: u16, colors: &[u8]) -> Self {
        let mut bytes = b"GIF89a".to_vec();
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        let flags = if colors.is_empty() {
            0
        } else {
            0x80 | table_exponent(colors.len() / 3)
        };
        bytes.extend_from_slice(&[flags, 0, 0]);
        bytes.extend_from_slice(colors);
        GifBuilder { bytes }
    }

    /// Append raw bytes
    pub fn raw(mut self, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(data);
        self
    }

    /// Append a graphic control extension
    pub fn graphic_control(
        self,
        disposal: u8,
        transparent: Option<u8>,
        delay_cs: u16,
    ) -> Self {
        let mut flags = disposal << 2;
        if transparent.is_some() {
            flags |= 1;
        }
        let delay = delay_cs.to_le_bytes();
        self.raw(&[
            0x21,
            0xF9,
            4,
            flags,
            delay[0],
            delay[1],
            transparent.unwrap_or(0),
            0,
        ])
    }

    /// Append an image with literal-coded indices
    #[allow(clippy::too_many_arguments)]
    pub fn image(
        self,
        left: u16,
        top: u16,
        width: u16,
        height: u16,
        interlaced: bool,
        local_colors: &[u8],
        indices: &[u8],
    ) -> Self {
        let mut desc = vec![0x2C];
        desc.extend_from_slice(&left.to_le_bytes());
        desc.extend_from_slice(&top.to_le_bytes());
        desc.extend_from_slice(&width.to_le_bytes());
        desc.extend_from_slice(&height.to_le_bytes());
        let mut flags = if interlaced { 0x40 } else { 0 };
        if !local_colors.is_empty() {
            flags |= 0x80 | table_exponent(local_colors.len() / 3);
        }
        desc.push(flags);
        desc.extend_from_slice(local_colors);
        let min_code_bits = 8;
        desc.push(min_code_bits);
        desc.extend(LzwBuilder::new(min_code_bits).literals(indices).finish());
        self.raw(&desc)
    }

    /// Append a trailer and get the stream
    pub fn trailer(self) -> Vec<u8> {
        self.raw(&[0x3B]).bytes
    }

    /// Get the stream without a trailer
    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Get the 3-bit table size exponent for an entry count
fn table_exponent(len: usize) -> u8 {
    let mut e = 0;
    while (2 << e) < len {
        e += 1;
    }
    e
}
