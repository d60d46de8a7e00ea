// lib.rs      gifkit crate.
//
// Copyright (c) 2026  gifkit developers
//
//! A library for decoding GIF animations, with background workers for
//! decoding and encoding.
//!
//! * [Decoder] parses a GIF stream into an [Animation] of RGBA frames
//! * [DecodeTask] / [DecodePool] run decodes off the caller's thread
//! * [EncodeQueue] forwards frames to a [FrameEncoder] on its own thread
//!
//! [Animation]: struct.Animation.html
//! [DecodePool]: struct.DecodePool.html
//! [DecodeTask]: struct.DecodeTask.html
//! [Decoder]: struct.Decoder.html
//! [EncodeQueue]: struct.EncodeQueue.html
//! [FrameEncoder]: trait.FrameEncoder.html
#![forbid(unsafe_code)]

mod animation;
pub mod block;
mod compose;
mod decode;
mod error;
mod lzw;
mod queue;
mod reader;
mod task;
#[cfg(test)]
mod testgif;

pub use crate::animation::{Animation, Frame};
pub use crate::compose::Compositor;
pub use crate::decode::Decoder;
pub use crate::error::{Error, Result};
pub use crate::lzw::Decompressor;
pub use crate::queue::{
    EncodeQueue, FrameEncoder, FrameSender, QueueConfig, QueueId,
};
pub use crate::reader::BlockReader;
pub use crate::task::{
    CancelToken, DecodePool, DecodeTask, Source, TaskHandle, TaskId,
};
