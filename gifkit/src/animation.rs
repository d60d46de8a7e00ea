// animation.rs
//
// Copyright (c) 2026  gifkit developers
//
//! Decoded animation
use crate::block::{DisposalMethod, GraphicControl, ImageDesc};
use pix::rgb::SRgba8;
use pix::Raster;
use std::time::Duration;

/// One composited frame of an animation.
///
/// The raster always covers the whole logical screen.
pub struct Frame {
    /// Composited pixels
    raster: Raster<SRgba8>,
    /// Image descriptor the frame was decoded from
    image_desc: ImageDesc,
    /// Graphic control applied to the frame
    graphic_control_ext: Option<GraphicControl>,
}

impl Clone for Frame {
    fn clone(&self) -> Self {
        Frame {
            raster: Raster::with_raster(&self.raster),
            image_desc: self.image_desc,
            graphic_control_ext: self.graphic_control_ext,
        }
    }
}

impl Frame {
    /// Create a frame from a raster
    pub fn new(
        raster: Raster<SRgba8>,
        image_desc: ImageDesc,
        graphic_control_ext: Option<GraphicControl>,
    ) -> Self {
        Frame {
            raster,
            image_desc,
            graphic_control_ext,
        }
    }

    /// Create a frame from a raster with no descriptor
    pub fn with_raster(raster: Raster<SRgba8>) -> Self {
        let image_desc = ImageDesc::new(
            0,
            0,
            raster.width().try_into().unwrap_or(u16::MAX),
            raster.height().try_into().unwrap_or(u16::MAX),
        );
        Frame::new(raster, image_desc, None)
    }

    /// Get the width in pixels
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Get the height in pixels
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Get the pixel at a location
    pub fn pixel(&self, x: u32, y: u32) -> SRgba8 {
        self.raster.pixel(x as i32, y as i32)
    }

    /// Get the raster
    pub fn raster(&self) -> &Raster<SRgba8> {
        &self.raster
    }

    /// Get the pixels as RGBA bytes (row-major, top to bottom)
    pub fn as_u8_slice(&self) -> &[u8] {
        self.raster.as_u8_slice()
    }

    /// Convert into a raster
    pub fn into_raster(self) -> Raster<SRgba8> {
        self.raster
    }

    /// Get the image descriptor
    pub fn image_desc(&self) -> &ImageDesc {
        &self.image_desc
    }

    /// Get the graphic control extension
    pub fn graphic_control_ext(&self) -> Option<&GraphicControl> {
        self.graphic_control_ext.as_ref()
    }

    /// Get the delay time in centiseconds
    pub fn delay_time_cs(&self) -> u16 {
        self.graphic_control_ext
            .map(|c| c.delay_time_cs())
            .unwrap_or_default()
    }

    /// Get the disposal method
    pub fn disposal_method(&self) -> DisposalMethod {
        self.graphic_control_ext
            .map(|c| c.disposal_method())
            .unwrap_or_default()
    }

    /// Get the transparent color index
    pub fn transparent_color(&self) -> Option<u8> {
        self.graphic_control_ext.and_then(|c| c.transparent_color())
    }
}

/// Decoded GIF animation.
///
/// Frames are appended in stream order while decoding; once handed to the
/// caller the animation is read-only.
pub struct Animation {
    /// Logical screen width
    width: u16,
    /// Logical screen height
    height: u16,
    /// Most recent positive delay (centiseconds)
    delay_time_cs: u16,
    /// Loop flag
    looping: bool,
    /// Loop count from an application extension
    loop_count: Option<u16>,
    /// All frames
    frames: Vec<Frame>,
}

impl Animation {
    /// Create an empty animation
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Animation {
            width,
            height,
            delay_time_cs: 0,
            looping: false,
            loop_count: None,
            frames: vec![],
        }
    }

    /// Append a frame
    pub(crate) fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Set the time per frame
    pub(crate) fn set_delay_time_cs(&mut self, delay_time_cs: u16) {
        self.delay_time_cs = delay_time_cs;
    }

    /// Set the loop flag
    pub(crate) fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Set the loop count
    pub(crate) fn set_loop_count(&mut self, loop_count: u16) {
        self.loop_count = Some(loop_count);
    }

    /// Get the logical screen width
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get the logical screen height
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get the time per frame in centiseconds.
    ///
    /// This is the most recent positive delay seen in the stream.
    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }

    /// Get the time per frame
    pub fn time_per_frame(&self) -> Duration {
        Duration::from_millis(u64::from(self.delay_time_cs) * 10)
    }

    /// Check the loop flag.
    ///
    /// Set when any frame uses the `RestoreToPrevious` disposal method.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Get the loop count from a NETSCAPE2.0 extension (0 means forever)
    pub fn loop_count(&self) -> Option<u16> {
        self.loop_count
    }

    /// Get the frames
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Get the number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if there are no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Convert into frames
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}
