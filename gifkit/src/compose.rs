// compose.rs
//
// Copyright (c) 2026  gifkit developers
//
//! Frame compositing
use crate::animation::{Animation, Frame};
use crate::block::{ColorTable, DisposalMethod, GraphicControl, ImageDesc};
use crate::error::{Error, Result};
use log::debug;
use pix::rgb::SRgba8;
use pix::Raster;
use std::mem;

/// Interlace passes: (starting row, row step)
const INTERLACE_PASSES: [(u32, u32); 4] = [(0, 8), (4, 8), (2, 4), (1, 2)];

/// Non-interlaced rows: one pass
const NATURAL_PASS: [(u32, u32); 1] = [(0, 1)];

/// Iterator of destination rows, in the order source rows are stored
pub(crate) struct Rows {
    /// Frame height
    height: u32,
    /// Remaining passes
    passes: &'static [(u32, u32)],
    /// Next row in current pass
    y: u32,
}

impl Rows {
    /// Create a row iterator
    pub(crate) fn new(height: u16, interlaced: bool) -> Self {
        let passes: &'static [(u32, u32)] = if interlaced {
            &INTERLACE_PASSES
        } else {
            &NATURAL_PASS
        };
        Rows {
            height: height.into(),
            passes,
            y: passes[0].0,
        }
    }
}

impl Iterator for Rows {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while let Some(&(_, step)) = self.passes.first() {
            if self.y < self.height {
                let y = self.y;
                self.y += step;
                return Some(y);
            }
            self.passes = &self.passes[1..];
            if let Some(&(start, _)) = self.passes.first() {
                self.y = start;
            }
        }
        None
    }
}

/// Compositor for frames on the logical screen.
///
/// The working raster persists across frames of one decode session, but it
/// is replaced with a clear raster after every committed frame.
pub struct Compositor {
    /// Logical screen width
    width: u16,
    /// Logical screen height
    height: u16,
    /// Working raster
    canvas: Raster<SRgba8>,
    /// Snapshot taken for `RestoreToPrevious` disposal.
    ///
    /// The snapshot is never restored onto the canvas.
    previous: Option<Raster<SRgba8>>,
}

impl Compositor {
    /// Create a compositor for a logical screen
    pub fn new(width: u16, height: u16) -> Self {
        Compositor {
            width,
            height,
            canvas: Raster::with_clear(width.into(), height.into()),
            previous: None,
        }
    }

    /// Get the most recent `RestoreToPrevious` snapshot
    pub fn previous(&self) -> Option<&Raster<SRgba8>> {
        self.previous.as_ref()
    }

    /// Composite one frame and append it to an animation.
    ///
    /// * `indices` must hold one color index per pixel of `image_desc`.
    pub fn composite(
        &mut self,
        image_desc: ImageDesc,
        control: Option<GraphicControl>,
        table: &ColorTable,
        indices: &[u8],
        animation: &mut Animation,
    ) -> Result<()> {
        image_desc.check_bounds(self.width, self.height)?;
        debug_assert_eq!(indices.len(), image_desc.image_sz());
        let disposal = control.map(|c| c.disposal_method()).unwrap_or_default();
        if disposal == DisposalMethod::RestoreToPrevious {
            self.previous = Some(Raster::with_raster(&self.canvas));
        }
        let transparent = control.and_then(|c| c.transparent_color());
        self.draw(&image_desc, transparent, table, indices)?;
        let raster = mem::replace(
            &mut self.canvas,
            Raster::with_clear(self.width.into(), self.height.into()),
        );
        animation.push_frame(Frame::new(raster, image_desc, control));
        if let Some(c) = control {
            if c.delay_time_cs() > 0 {
                animation.set_delay_time_cs(c.delay_time_cs());
            }
        }
        if disposal == DisposalMethod::RestoreToPrevious {
            animation.set_looping(true);
        }
        debug!("frame {} composited", animation.len());
        Ok(())
    }

    /// Draw indexed pixels into the working raster
    fn draw(
        &mut self,
        image_desc: &ImageDesc,
        transparent: Option<u8>,
        table: &ColorTable,
        indices: &[u8],
    ) -> Result<()> {
        let width = usize::from(image_desc.width());
        if width == 0 {
            return Ok(());
        }
        let left = i32::from(image_desc.left());
        let top = i32::from(image_desc.top());
        let rows = Rows::new(image_desc.height(), image_desc.interlaced());
        for (row, y) in indices.chunks_exact(width).zip(rows) {
            let y = top + y as i32;
            for (x, idx) in row.iter().enumerate() {
                if Some(*idx) == transparent {
                    continue;
                }
                let (red, green, blue) =
                    table.entry(*idx).ok_or(Error::InvalidColorIndex(*idx))?;
                *self.canvas.pixel_mut(left + x as i32, y) =
                    SRgba8::new(red, green, blue, 255);
            }
        }
        Ok(())
    }
}
