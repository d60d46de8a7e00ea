// decode.rs
//
// Copyright (c) 2026  gifkit developers
//
//! GIF container decoding
use crate::animation::Animation;
use crate::block::{
    BlockCode, ColorTable, ExtensionCode, GraphicControl, ImageDesc,
    LogicalScreenDesc,
};
use crate::compose::Compositor;
use crate::error::{Error, Result};
use crate::lzw::Decompressor;
use crate::reader::BlockReader;
use crate::task::CancelToken;
use log::{debug, warn};
use std::io::{BufReader, Read};

/// Default maximum image size, in pixels
pub(crate) const MAX_IMAGE_SZ: usize = 1 << 25;

/// Application identifiers which carry a loop count sub-block
const LOOPING_APPS: [&[u8; 11]; 2] = [b"NETSCAPE2.0", b"ANIMEXTS1.0"];

/// GIF file decoder
///
/// Decodes a whole stream into an [Animation] of composited frames.
///
/// ## Example: Decode a GIF
/// ```
/// use gifkit::Decoder;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let gif = &[
/// #   0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00,
/// #   0x02, 0x00, 0x80, 0x01, 0x00, 0x00, 0x00, 0x00,
/// #   0xff, 0xff, 0xff, 0x2c, 0x00, 0x00, 0x00, 0x00,
/// #   0x02, 0x00, 0x02, 0x00, 0x00, 0x02, 0x03, 0x0c,
/// #   0x10, 0x05, 0x00, 0x3b,
/// # ][..];
/// // ... open a `File` as "gif"
/// let animation = Decoder::new(gif).decode()?;
/// for frame in animation.frames() {
///     let raster = frame.raster();
///     // ... work with raster
/// }
/// # Ok(())
/// # }
/// ```
///
/// [Animation]: struct.Animation.html
pub struct Decoder<R: Read> {
    /// Reader for input data
    reader: R,
    /// Maximum image size, in pixels
    max_image_sz: Option<usize>,
    /// Reject malformed streams instead of tolerating them
    strict: bool,
}

impl<R: Read> Decoder<R> {
    /// Create a new GIF decoder.
    pub fn new(reader: R) -> Self {
        Decoder {
            reader,
            max_image_sz: Some(MAX_IMAGE_SZ),
            strict: false,
        }
    }

    /// Set the maximum image size (in pixels) to allow for decoding.
    pub fn max_image_sz(mut self, max_image_sz: Option<usize>) -> Self {
        self.max_image_sz = max_image_sz;
        self
    }

    /// Enable or disable strict mode.
    ///
    /// In strict mode, a bad header, an unknown block label or a short
    /// image data stream is an error.  Otherwise these are logged and
    /// decoding continues.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Decode the whole stream
    pub fn decode(self) -> Result<Animation> {
        self.into_parser().run(None)
    }

    /// Decode the whole stream, checking for cancellation between blocks
    pub fn decode_with(self, cancel: &CancelToken) -> Result<Animation> {
        self.into_parser().run(Some(cancel))
    }

    /// Convert into a parser
    fn into_parser(self) -> Parser<BufReader<R>> {
        Parser::new(
            BufReader::new(self.reader),
            self.max_image_sz,
            self.strict,
        )
    }
}

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Expecting the header
    Start,
    /// Expecting the logical screen descriptor
    ScreenRead,
    /// Expecting a global color table with a number of entries
    GlobalTable(usize),
    /// Expecting a labelled block
    BlockLoop,
    /// Trailer or end of stream reached
    Terminated,
}

/// Container parser
struct Parser<R: Read> {
    /// Block reader
    reader: BlockReader<R>,
    /// Maximum image size, in pixels
    max_image_sz: Option<usize>,
    /// Strict mode
    strict: bool,
    /// Current state
    state: State,
    /// Global color table
    global_table: Option<ColorTable>,
    /// Graphic control for the next image
    control: Option<GraphicControl>,
    /// Compositor (after screen descriptor)
    compositor: Option<Compositor>,
    /// Animation being built (after screen descriptor)
    animation: Option<Animation>,
}

impl<R: Read> Parser<R> {
    /// Create a new parser
    fn new(reader: R, max_image_sz: Option<usize>, strict: bool) -> Self {
        Parser {
            reader: BlockReader::new(reader),
            max_image_sz,
            strict,
            state: State::Start,
            global_table: None,
            control: None,
            compositor: None,
            animation: None,
        }
    }

    /// Run the parser until terminated
    fn run(mut self, cancel: Option<&CancelToken>) -> Result<Animation> {
        while self.state != State::Terminated {
            if cancel.is_some_and(|c| c.is_cancelled()) {
                debug!("decode cancelled");
                return Err(Error::Cancelled);
            }
            self.step()?;
        }
        self.animation.take().ok_or(Error::UnexpectedEndOfFile)
    }

    /// Advance by one state transition
    fn step(&mut self) -> Result<()> {
        self.state = match self.state {
            State::Start => self.read_header()?,
            State::ScreenRead => self.read_screen_desc()?,
            State::GlobalTable(len) => {
                self.global_table = Some(self.read_color_table(len)?);
                State::BlockLoop
            }
            State::BlockLoop => self.read_labelled_block()?,
            State::Terminated => State::Terminated,
        };
        Ok(())
    }

    /// Read the signature and version
    fn read_header(&mut self) -> Result<State> {
        let buf: [u8; 6] = self.reader.read_array()?;
        if self.strict {
            if &buf[..3] != b"GIF" {
                return Err(Error::MalformedHeader);
            }
            let version = [buf[3], buf[4], buf[5]];
            if &version != b"87a" && &version != b"89a" {
                return Err(Error::UnsupportedVersion(version));
            }
        }
        debug!("header: {:?}", String::from_utf8_lossy(&buf));
        Ok(State::ScreenRead)
    }

    /// Read the logical screen descriptor
    fn read_screen_desc(&mut self) -> Result<State> {
        let desc = LogicalScreenDesc::from_buf(&self.reader.read_array()?);
        debug!("{:?}", desc);
        let (width, height) = (desc.screen_width(), desc.screen_height());
        self.check_size(usize::from(width) * usize::from(height))?;
        self.compositor = Some(Compositor::new(width, height));
        self.animation = Some(Animation::new(width, height));
        if desc.has_color_table() {
            Ok(State::GlobalTable(desc.color_table_len()))
        } else {
            Ok(State::BlockLoop)
        }
    }

    /// Check a pixel count against the size limit
    fn check_size(&self, n_pixels: usize) -> Result<()> {
        match self.max_image_sz {
            Some(sz) if n_pixels > sz => Err(Error::TooLargeImage),
            _ => Ok(()),
        }
    }

    /// Read a color table
    fn read_color_table(&mut self, len: usize) -> Result<ColorTable> {
        let mut buf = vec![0; ColorTable::size_bytes(len)];
        self.reader.read_exact(&mut buf)?;
        debug!("color table: {} entries", len);
        Ok(ColorTable::with_colors(&buf))
    }

    /// Read one labelled block
    fn read_labelled_block(&mut self) -> Result<State> {
        let label = match self.reader.read_label()? {
            Some(label) => label,
            None => {
                debug!("end of stream without trailer");
                return Ok(State::Terminated);
            }
        };
        match BlockCode::from(label) {
            BlockCode::ImageDesc_ => self.read_image()?,
            BlockCode::Extension_ => self.read_extension()?,
            BlockCode::Trailer_ => {
                debug!("trailer");
                return Ok(State::Terminated);
            }
            BlockCode::End_ => {
                debug!("zero label, end of stream");
                return Ok(State::Terminated);
            }
            BlockCode::Unknown_(label) => {
                if self.strict {
                    return Err(Error::MalformedBlockLabel(label));
                }
                warn!("unknown block label: {:#04X}", label);
            }
        }
        Ok(State::BlockLoop)
    }

    /// Read an extension block
    fn read_extension(&mut self) -> Result<()> {
        let code = ExtensionCode::from(self.reader.read_u8()?);
        match code {
            ExtensionCode::GraphicControl_ => {
                let control =
                    GraphicControl::from_buf(&self.reader.read_array()?);
                debug!("{:?}", control);
                self.control = Some(control);
            }
            ExtensionCode::Comment_ => {
                let n_bytes = self.reader.skip_chain()?;
                debug!("comment: {} bytes", n_bytes);
            }
            ExtensionCode::Application_ => self.read_application()?,
            ExtensionCode::PlainText_ => {
                self.reader.skip(code.header_size())?;
                self.reader.skip_chain()?;
                debug!("plain text skipped");
            }
            ExtensionCode::Unknown_(label) => {
                warn!("unknown extension label: {:#04X}", label);
                self.reader.skip_chain()?;
            }
        }
        Ok(())
    }

    /// Read an application extension
    fn read_application(&mut self) -> Result<()> {
        let header: [u8; 12] = self.reader.read_array()?;
        let app_id = &header[1..];
        if !LOOPING_APPS.iter().any(|id| &id[..] == app_id) {
            debug!("application: {:?}", String::from_utf8_lossy(app_id));
            self.reader.skip_chain()?;
            return Ok(());
        }
        for block in self.reader.read_chain()? {
            if block.len() >= 3 && block[0] == 1 {
                let loop_count = u16::from_le_bytes([block[1], block[2]]);
                debug!("loop count: {}", loop_count);
                if let Some(animation) = &mut self.animation {
                    animation.set_loop_count(loop_count);
                }
            }
        }
        Ok(())
    }

    /// Read an image descriptor, its data, and composite one frame
    fn read_image(&mut self) -> Result<()> {
        let desc = ImageDesc::from_buf(&self.reader.read_array()?);
        debug!("{:?}", desc);
        let image_sz = desc.image_sz();
        self.check_size(image_sz)?;
        let local_table = if desc.has_color_table() {
            Some(self.read_color_table(desc.color_table_len())?)
        } else {
            None
        };
        let min_code_bits = self.reader.read_u8()?;
        let mut decompressor = Decompressor::new(min_code_bits)?;
        let mut indices = decompressor.decompress(&mut self.reader, image_sz)?;
        if !decompressor.is_exhausted() {
            let n_bytes = self.reader.skip_chain()?;
            if n_bytes > 0 {
                debug!("skipped {} trailing image data bytes", n_bytes);
            }
        }
        if indices.len() < image_sz {
            if self.strict {
                return Err(Error::IncompleteImageData);
            }
            warn!("image data short: {} of {} pixels", indices.len(), image_sz);
            indices.resize(image_sz, 0);
        }
        let table = local_table
            .as_ref()
            .or(self.global_table.as_ref())
            .ok_or(Error::MissingColorTable)?;
        let control = self.control.take();
        match (&mut self.compositor, &mut self.animation) {
            (Some(compositor), Some(animation)) => {
                compositor.composite(desc, control, table, &indices, animation)
            }
            _ => Err(Error::UnexpectedEndOfFile),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::block::DisposalMethod;
    use crate::testgif::GifBuilder;
    use pix::rgb::SRgba8;
    use std::time::Duration;

    const SIMPLE_1: &[u8] = &[
        0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x0A, 0x00, 0x0A, 0x00, 0x91, 0x00,
        0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00,
        0x00, 0x21, 0xF9, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00,
        0x00, 0x00, 0x0A, 0x00, 0x0A, 0x00, 0x00, 0x02, 0x16, 0x8C, 0x2D, 0x99,
        0x87, 0x2A, 0x1C, 0xDC, 0x33, 0xA0, 0x02, 0x75, 0xEC, 0x95, 0xFA, 0xA8,
        0xDE, 0x60, 0x8C, 0x04, 0x91, 0x4C, 0x01, 0x00, 0x3B,
    ];

    const TABLE: &[u8] = &[10, 20, 30, 0, 0, 0];

    fn color(rgb: u32) -> SRgba8 {
        SRgba8::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
    }

    #[test]
    fn simple_1() -> Result<()> {
        #[rustfmt::skip]
        let image = [
            1, 1, 1, 1, 1, 2, 2, 2, 2, 2,
            1, 1, 1, 1, 1, 2, 2, 2, 2, 2,
            1, 1, 1, 1, 1, 2, 2, 2, 2, 2,
            1, 1, 1, 0, 0, 0, 0, 2, 2, 2,
            1, 1, 1, 0, 0, 0, 0, 2, 2, 2,
            2, 2, 2, 0, 0, 0, 0, 1, 1, 1,
            2, 2, 2, 0, 0, 0, 0, 1, 1, 1,
            2, 2, 2, 2, 2, 1, 1, 1, 1, 1,
            2, 2, 2, 2, 2, 1, 1, 1, 1, 1,
            2, 2, 2, 2, 2, 1, 1, 1, 1, 1,
        ];
        let palette = [color(0xFFFFFF), color(0xFF0000), color(0x0000FF)];
        let animation = Decoder::new(SIMPLE_1).strict(true).decode()?;
        assert_eq!((animation.width(), animation.height()), (10, 10));
        assert_eq!(animation.len(), 1);
        let frame = &animation.frames()[0];
        for (i, idx) in image.iter().enumerate() {
            let (x, y) = (i as u32 % 10, i as u32 / 10);
            assert_eq!(frame.pixel(x, y), palette[*idx]);
        }
        assert_eq!(frame.disposal_method(), DisposalMethod::Unspecified);
        assert_eq!(animation.delay_time_cs(), 0);
        Ok(())
    }

    #[test]
    fn single_pixel() -> Result<()> {
        let gif = GifBuilder::new(1, 1, TABLE)
            .image(0, 0, 1, 1, false, &[], &[0])
            .trailer();
        let animation = Decoder::new(&gif[..]).decode()?;
        assert_eq!(animation.len(), 1);
        assert_eq!(
            animation.frames()[0].pixel(0, 0),
            SRgba8::new(10, 20, 30, 255)
        );
        Ok(())
    }

    #[test]
    fn no_frames() -> Result<()> {
        let gif = GifBuilder::new(3, 2, TABLE).trailer();
        let animation = Decoder::new(&gif[..]).decode()?;
        assert!(animation.is_empty());
        assert_eq!((animation.width(), animation.height()), (3, 2));
        Ok(())
    }

    #[test]
    fn unknown_extension_skipped() -> Result<()> {
        let gif = GifBuilder::new(1, 1, TABLE)
            .raw(&[0x21, 0x11, 2, 9, 9, 1, 7, 0])
            .image(0, 0, 1, 1, false, &[], &[1])
            .trailer();
        let animation = Decoder::new(&gif[..]).strict(true).decode()?;
        assert_eq!(animation.len(), 1);
        assert_eq!(animation.frames()[0].pixel(0, 0), SRgba8::new(0, 0, 0, 255));
        Ok(())
    }

    #[test]
    fn comment_and_plain_text_skipped() -> Result<()> {
        let mut plain_text = vec![0x21, 0x01, 12];
        plain_text.extend_from_slice(&[0; 12]);
        plain_text.extend_from_slice(&[2, b'h', b'i', 0]);
        let gif = GifBuilder::new(1, 1, TABLE)
            .raw(&[0x21, 0xFE, 3, b'a', b'b', b'c', 0])
            .raw(&plain_text)
            .image(0, 0, 1, 1, false, &[], &[0])
            .trailer();
        let animation = Decoder::new(&gif[..]).decode()?;
        assert_eq!(animation.len(), 1);
        Ok(())
    }

    #[test]
    fn unknown_label() -> Result<()> {
        let gif = GifBuilder::new(1, 1, TABLE)
            .raw(&[0x99])
            .image(0, 0, 1, 1, false, &[], &[0])
            .trailer();
        let animation = Decoder::new(&gif[..]).decode()?;
        assert_eq!(animation.len(), 1);
        let res = Decoder::new(&gif[..]).strict(true).decode();
        assert!(matches!(res, Err(Error::MalformedBlockLabel(0x99))));
        Ok(())
    }

    #[test]
    fn header_checked_when_strict() -> Result<()> {
        let mut gif = GifBuilder::new(1, 1, TABLE).trailer();
        gif[0] = b'X';
        assert!(Decoder::new(&gif[..]).decode().is_ok());
        let res = Decoder::new(&gif[..]).strict(true).decode();
        assert!(matches!(res, Err(Error::MalformedHeader)));
        gif[0] = b'G';
        gif[3..6].copy_from_slice(b"90a");
        let res = Decoder::new(&gif[..]).strict(true).decode();
        assert!(matches!(res, Err(Error::UnsupportedVersion(v)) if &v == b"90a"));
        gif[3..6].copy_from_slice(b"87a");
        assert!(Decoder::new(&gif[..]).strict(true).decode().is_ok());
        Ok(())
    }

    #[test]
    fn truncated() {
        let res = Decoder::new(&SIMPLE_1[..50]).decode();
        assert!(matches!(res, Err(Error::UnexpectedEndOfFile)));
        let res = Decoder::new(&SIMPLE_1[..8]).decode();
        assert!(matches!(res, Err(Error::UnexpectedEndOfFile)));
        let res = Decoder::new(&[][..]).decode();
        assert!(matches!(res, Err(Error::UnexpectedEndOfFile)));
    }

    #[test]
    fn end_without_trailer() -> Result<()> {
        let gif = GifBuilder::new(1, 1, TABLE)
            .image(0, 0, 1, 1, false, &[], &[0])
            .build();
        assert_eq!(Decoder::new(&gif[..]).decode()?.len(), 1);
        let gif = GifBuilder::new(1, 1, TABLE)
            .raw(&[0])
            .image(0, 0, 1, 1, false, &[], &[0])
            .trailer();
        assert_eq!(Decoder::new(&gif[..]).decode()?.len(), 0);
        Ok(())
    }

    #[test]
    fn loop_count() -> Result<()> {
        let mut app = vec![0x21, 0xFF, 11];
        app.extend_from_slice(b"NETSCAPE2.0");
        app.extend_from_slice(&[3, 1, 5, 0, 0]);
        let gif = GifBuilder::new(1, 1, TABLE)
            .raw(&app)
            .image(0, 0, 1, 1, false, &[], &[0])
            .trailer();
        let animation = Decoder::new(&gif[..]).decode()?;
        assert_eq!(animation.loop_count(), Some(5));
        assert!(!animation.is_looping());
        assert_eq!(animation.len(), 1);
        Ok(())
    }

    #[test]
    fn other_application_skipped() -> Result<()> {
        let mut app = vec![0x21, 0xFF, 11];
        app.extend_from_slice(b"XMP DataXMP");
        app.extend_from_slice(&[3, 1, 5, 0, 0]);
        let gif = GifBuilder::new(1, 1, TABLE)
            .raw(&app)
            .image(0, 0, 1, 1, false, &[], &[0])
            .trailer();
        let animation = Decoder::new(&gif[..]).decode()?;
        assert_eq!(animation.loop_count(), None);
        assert_eq!(animation.len(), 1);
        Ok(())
    }

    #[test]
    fn local_table() -> Result<()> {
        let gif = GifBuilder::new(1, 1, &[1, 1, 1, 2, 2, 2])
            .image(0, 0, 1, 1, false, &[9, 8, 7, 6, 5, 4], &[1])
            .image(0, 0, 1, 1, false, &[], &[1])
            .trailer();
        let animation = Decoder::new(&gif[..]).decode()?;
        assert_eq!(animation.frames()[0].pixel(0, 0), SRgba8::new(6, 5, 4, 255));
        assert_eq!(animation.frames()[1].pixel(0, 0), SRgba8::new(2, 2, 2, 255));
        Ok(())
    }

    #[test]
    fn missing_table() {
        let gif = GifBuilder::new(1, 1, &[])
            .image(0, 0, 1, 1, false, &[], &[0])
            .trailer();
        let res = Decoder::new(&gif[..]).decode();
        assert!(matches!(res, Err(Error::MissingColorTable)));
    }

    #[test]
    fn graphic_control_consumed_once() -> Result<()> {
        let gif = GifBuilder::new(1, 1, TABLE)
            .graphic_control(1, None, 4)
            .image(0, 0, 1, 1, false, &[], &[0])
            .image(0, 0, 1, 1, false, &[], &[0])
            .trailer();
        let animation = Decoder::new(&gif[..]).decode()?;
        let frames = animation.frames();
        assert_eq!(frames[0].delay_time_cs(), 4);
        assert_eq!(frames[0].disposal_method(), DisposalMethod::NotDispose);
        assert!(frames[1].graphic_control_ext().is_none());
        assert_eq!(animation.delay_time_cs(), 4);
        assert_eq!(animation.time_per_frame(), Duration::from_millis(40));
        Ok(())
    }

    #[test]
    fn transparent_frame() -> Result<()> {
        let gif = GifBuilder::new(2, 2, TABLE)
            .graphic_control(0, Some(0), 0)
            .image(0, 0, 2, 2, false, &[], &[0, 0, 0, 0])
            .trailer();
        let animation = Decoder::new(&gif[..]).decode()?;
        let frame = &animation.frames()[0];
        assert!(frame.as_u8_slice().iter().all(|b| *b == 0));
        Ok(())
    }

    #[test]
    fn restore_to_previous_loops() -> Result<()> {
        let gif = GifBuilder::new(1, 1, TABLE)
            .graphic_control(3, None, 2)
            .image(0, 0, 1, 1, false, &[], &[0])
            .trailer();
        let animation = Decoder::new(&gif[..]).decode()?;
        assert!(animation.is_looping());
        Ok(())
    }

    #[test]
    fn interlaced() -> Result<()> {
        // stored rows 0, 2, 1, 3
        let gif = GifBuilder::new(1, 4, TABLE)
            .image(0, 0, 1, 4, true, &[], &[0, 1, 0, 1])
            .trailer();
        let animation = Decoder::new(&gif[..]).decode()?;
        let frame = &animation.frames()[0];
        let first = SRgba8::new(10, 20, 30, 255);
        let second = SRgba8::new(0, 0, 0, 255);
        assert_eq!(frame.pixel(0, 0), first);
        assert_eq!(frame.pixel(0, 1), first);
        assert_eq!(frame.pixel(0, 2), second);
        assert_eq!(frame.pixel(0, 3), second);
        Ok(())
    }

    #[test]
    fn short_image_data() -> Result<()> {
        let gif = GifBuilder::new(2, 1, TABLE)
            .image(0, 0, 2, 1, false, &[], &[1])
            .trailer();
        let animation = Decoder::new(&gif[..]).decode()?;
        let frame = &animation.frames()[0];
        assert_eq!(frame.pixel(0, 0), SRgba8::new(0, 0, 0, 255));
        assert_eq!(frame.pixel(1, 0), SRgba8::new(10, 20, 30, 255));
        let res = Decoder::new(&gif[..]).strict(true).decode();
        assert!(matches!(res, Err(Error::IncompleteImageData)));
        Ok(())
    }

    #[test]
    fn invalid_color_index() {
        let gif = GifBuilder::new(1, 1, TABLE)
            .image(0, 0, 1, 1, false, &[], &[3])
            .trailer();
        let res = Decoder::new(&gif[..]).decode();
        assert!(matches!(res, Err(Error::InvalidColorIndex(3))));
    }

    #[test]
    fn frame_outside_screen() {
        let gif = GifBuilder::new(2, 2, TABLE)
            .image(1, 0, 2, 1, false, &[], &[0, 0])
            .trailer();
        let res = Decoder::new(&gif[..]).decode();
        assert!(matches!(res, Err(Error::InvalidFrameDimensions)));
    }

    #[test]
    fn too_large() {
        let gif = GifBuilder::new(2, 2, TABLE)
            .image(0, 0, 2, 2, false, &[], &[0, 0, 0, 0])
            .trailer();
        let res = Decoder::new(&gif[..]).max_image_sz(Some(3)).decode();
        assert!(matches!(res, Err(Error::TooLargeImage)));
        assert!(Decoder::new(&gif[..]).max_image_sz(None).decode().is_ok());
        let gif = GifBuilder::new(u16::MAX, u16::MAX, TABLE).trailer();
        let res = Decoder::new(&gif[..]).decode();
        assert!(matches!(res, Err(Error::TooLargeImage)));
    }

    #[test]
    fn invalid_code_size() {
        let mut gif = GifBuilder::new(1, 1, TABLE).build();
        gif.extend_from_slice(&[0x2C, 0, 0, 0, 0, 1, 0, 1, 0, 0, 12, 0, 0x3B]);
        let res = Decoder::new(&gif[..]).decode();
        assert!(matches!(res, Err(Error::InvalidCodeSize(12))));
    }

    #[test]
    fn cancelled() {
        let token = CancelToken::new();
        token.cancel();
        let res = Decoder::new(SIMPLE_1).decode_with(&token);
        assert!(matches!(res, Err(Error::Cancelled)));
    }
}
