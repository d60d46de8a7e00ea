// block.rs
//
// Copyright (c) 2026  gifkit developers
//
//! Fixed-layout GIF structures
use crate::error::{Error, Result};

/// Bytes per color table entry
const CHANNELS: usize = 3;

/// Top-level block label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockCode {
    /// Image separator (0x2C)
    ImageDesc_,
    /// Extension introducer (0x21)
    Extension_,
    /// GIF trailer (0x3B)
    Trailer_,
    /// Zero label, treated as end of stream
    End_,
    /// Anything else
    Unknown_(u8),
}

impl From<u8> for BlockCode {
    fn from(t: u8) -> Self {
        use self::BlockCode::*;
        match t {
            b',' => ImageDesc_,
            b'!' => Extension_,
            b';' => Trailer_,
            0 => End_,
            _ => Unknown_(t),
        }
    }
}

/// Extension label (after the introducer)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ExtensionCode {
    PlainText_,
    GraphicControl_,
    Comment_,
    Application_,
    Unknown_(u8),
}

impl From<u8> for ExtensionCode {
    fn from(n: u8) -> Self {
        use self::ExtensionCode::*;
        match n {
            0x01 => PlainText_,
            0xF9 => GraphicControl_,
            0xFE => Comment_,
            0xFF => Application_,
            _ => Unknown_(n),
        }
    }
}

impl ExtensionCode {
    /// Size of fixed header bytes preceding the sub-block chain
    pub fn header_size(self) -> usize {
        use self::ExtensionCode::*;
        match self {
            PlainText_ => 13,
            Application_ => 12,
            GraphicControl_ => 6,
            _ => 0,
        }
    }
}

/// Get the number of color table entries for a 3-bit size exponent
pub fn color_table_len(exponent: u8) -> usize {
    2 << (exponent & 0b0111)
}

/// Disposal method for a frame
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum DisposalMethod {
    /// No disposal specified
    #[default]
    Unspecified,
    /// Leave the graphic in place
    NotDispose,
    /// Restore frame area to background
    RestoreToBackground,
    /// Restore frame area to the previous contents
    RestoreToPrevious,
    /// Undefined method (4-7), handled like `Unspecified`
    Reserved(u8),
}

impl From<u8> for DisposalMethod {
    fn from(n: u8) -> Self {
        use self::DisposalMethod::*;
        match n & 0b0111 {
            0 => Unspecified,
            1 => NotDispose,
            2 => RestoreToBackground,
            3 => RestoreToPrevious,
            n => Reserved(n),
        }
    }
}

/// Logical screen descriptor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicalScreenDesc {
    screen_width: u16,
    screen_height: u16,
    flags: u8,
    background_color_idx: u8,
}

impl LogicalScreenDesc {
    /// Size of descriptor in bytes
    pub(crate) const SIZE: usize = 7;

    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    /// Decode a descriptor from a buffer
    pub(crate) fn from_buf(buf: &[u8; Self::SIZE]) -> Self {
        LogicalScreenDesc {
            screen_width: u16::from_le_bytes([buf[0], buf[1]]),
            screen_height: u16::from_le_bytes([buf[2], buf[3]]),
            flags: buf[4],
            background_color_idx: buf[5],
            // buf[6] is pixel aspect ratio (ignored)
        }
    }

    /// Get the screen width
    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }

    /// Get the screen height
    pub fn screen_height(&self) -> u16 {
        self.screen_height
    }

    /// Get the background color index
    pub fn background_color_idx(&self) -> u8 {
        self.background_color_idx
    }

    /// Check if a global color table follows
    pub fn has_color_table(&self) -> bool {
        self.flags & Self::COLOR_TABLE_PRESENT != 0
    }

    /// Get the number of entries in the global color table
    pub fn color_table_len(&self) -> usize {
        color_table_len(self.flags & Self::COLOR_TABLE_SIZE)
    }
}

/// Graphic control extension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphicControl {
    flags: u8,
    delay_time_cs: u16,
    transparent_color_idx: u8,
}

impl GraphicControl {
    /// Size of the fixed part in bytes (including terminator)
    pub(crate) const SIZE: usize = 6;

    const DISPOSAL_METHOD: u8 = 0b0001_1100;
    const TRANSPARENT_COLOR: u8 = 0b0000_0001;

    /// Decode a graphic control from a buffer.
    ///
    /// Block size (first byte) and terminator (last byte) are not checked.
    pub(crate) fn from_buf(buf: &[u8; Self::SIZE]) -> Self {
        GraphicControl {
            flags: buf[1],
            delay_time_cs: u16::from_le_bytes([buf[2], buf[3]]),
            transparent_color_idx: buf[4],
        }
    }

    /// Create a graphic control with explicit values
    pub fn new(
        disposal_method: u8,
        transparent_color: Option<u8>,
        delay_time_cs: u16,
    ) -> Self {
        let mut flags = (disposal_method << 2) & Self::DISPOSAL_METHOD;
        if transparent_color.is_some() {
            flags |= Self::TRANSPARENT_COLOR;
        }
        GraphicControl {
            flags,
            delay_time_cs,
            transparent_color_idx: transparent_color.unwrap_or_default(),
        }
    }

    /// Get the disposal method
    pub fn disposal_method(&self) -> DisposalMethod {
        ((self.flags & Self::DISPOSAL_METHOD) >> 2).into()
    }

    /// Get the delay time in centiseconds (hundredths of a second)
    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }

    /// Get the transparent color index, if the flag is set
    pub fn transparent_color(&self) -> Option<u8> {
        if self.flags & Self::TRANSPARENT_COLOR != 0 {
            Some(self.transparent_color_idx)
        } else {
            None
        }
    }
}

/// Image descriptor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageDesc {
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    flags: u8,
}

impl ImageDesc {
    /// Size of descriptor in bytes (after the separator)
    pub(crate) const SIZE: usize = 9;

    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const INTERLACED: u8 = 0b0100_0000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    /// Decode a descriptor from a buffer
    pub(crate) fn from_buf(buf: &[u8; Self::SIZE]) -> Self {
        ImageDesc {
            left: u16::from_le_bytes([buf[0], buf[1]]),
            top: u16::from_le_bytes([buf[2], buf[3]]),
            width: u16::from_le_bytes([buf[4], buf[5]]),
            height: u16::from_le_bytes([buf[6], buf[7]]),
            flags: buf[8],
        }
    }

    /// Create a descriptor for a rectangle without a local color table
    pub fn new(left: u16, top: u16, width: u16, height: u16) -> Self {
        ImageDesc {
            left,
            top,
            width,
            height,
            flags: 0,
        }
    }

    /// Adjust the interlaced flag
    pub fn with_interlaced(mut self, interlaced: bool) -> Self {
        if interlaced {
            self.flags |= Self::INTERLACED;
        } else {
            self.flags &= !Self::INTERLACED;
        }
        self
    }

    /// Get the left edge
    pub fn left(&self) -> u16 {
        self.left
    }

    /// Get the top edge
    pub fn top(&self) -> u16 {
        self.top
    }

    /// Get the width
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get the height
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Check if rows are stored interlaced
    pub fn interlaced(&self) -> bool {
        self.flags & Self::INTERLACED != 0
    }

    /// Check if a local color table follows
    pub fn has_color_table(&self) -> bool {
        self.flags & Self::COLOR_TABLE_PRESENT != 0
    }

    /// Get the number of entries in the local color table
    pub fn color_table_len(&self) -> usize {
        color_table_len(self.flags & Self::COLOR_TABLE_SIZE)
    }

    /// Get the number of pixels in the image
    pub fn image_sz(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check that the frame rectangle fits within a screen
    pub(crate) fn check_bounds(&self, width: u16, height: u16) -> Result<()> {
        let right = self.left as u32 + self.width as u32;
        let bottom = self.top as u32 + self.height as u32;
        if right <= width.into() && bottom <= height.into() {
            Ok(())
        } else {
            Err(Error::InvalidFrameDimensions)
        }
    }
}

/// Color table (global or local)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    colors: Vec<u8>,
}

impl ColorTable {
    /// Create a color table from packed RGB triplets
    pub fn with_colors(colors: &[u8]) -> Self {
        debug_assert_eq!(colors.len() % CHANNELS, 0);
        ColorTable {
            colors: colors.to_vec(),
        }
    }

    /// Size of a table in bytes
    pub(crate) fn size_bytes(len: usize) -> usize {
        len * CHANNELS
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.colors.len() / CHANNELS
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get an entry as `(red, green, blue)`
    pub fn entry(&self, idx: u8) -> Option<(u8, u8, u8)> {
        let i = idx as usize * CHANNELS;
        self.colors
            .get(i..i + CHANNELS)
            .map(|c| (c[0], c[1], c[2]))
    }

    /// Get the packed RGB triplets
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }
}
