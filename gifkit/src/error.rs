// error.rs
//
// Copyright (c) 2026  gifkit developers
//
use std::fmt;
use std::io;

/// Errors encountered while decoding or running a codec worker
#[derive(Debug)]
pub enum Error {
    /// A wrapped I/O error.
    Io(io::Error),
    /// Stream ended in the middle of a block (truncated file).
    UnexpectedEndOfFile,
    /// Header signature is not `GIF` (strict mode only).
    MalformedHeader,
    /// GIF version not supported, 87a or 89a only (strict mode only).
    UnsupportedVersion([u8; 3]),
    /// Unrecognized top-level block label (strict mode only).
    MalformedBlockLabel(u8),
    /// LZW minimum code size out of range.
    InvalidCodeSize(u8),
    /// LZW dictionary would grow past 4096 entries.
    DictionaryOverflow,
    /// Image larger than specified by
    /// [max_image_sz](struct.Decoder.html#method.max_image_sz).
    TooLargeImage,
    /// Compressed data ended before every pixel was decoded (strict mode
    /// only).
    IncompleteImageData,
    /// Frame location / size larger than the logical screen.
    InvalidFrameDimensions,
    /// Frame has neither a local nor a global color table.
    MissingColorTable,
    /// Color index outside of the active color table.
    InvalidColorIndex(u8),
    /// Work was cancelled through a [CancelToken](struct.CancelToken.html).
    Cancelled,
    /// Worker pool has shut down and no longer accepts tasks.
    PoolClosed,
    /// Encode queue was stopped or cancelled and no longer accepts frames.
    QueueClosed,
}

/// Gifkit result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(fmt),
            _ => fmt::Debug::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::UnexpectedEndOfFile,
            _ => Error::Io(err),
        }
    }
}
