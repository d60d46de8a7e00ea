// queue.rs
//
// Copyright (c) 2026  gifkit developers
//
//! Background encode queue
use crate::animation::Frame;
use crate::error::{Error, Result};
use log::{debug, warn};
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default drain loop poll interval
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// GIF encoder driven by an [EncodeQueue](struct.EncodeQueue.html).
///
/// Calls happen in this order: `set_delay` (if configured), `start`, any
/// number of `add_frame`, then `finish` exactly once.
pub trait FrameEncoder: Send {
    /// Begin writing to a file
    fn start(&mut self, path: &Path) -> Result<()>;

    /// Set the delay between frames, in milliseconds
    fn set_delay(&mut self, delay_ms: u32);

    /// Encode one frame
    fn add_frame(&mut self, frame: Frame) -> Result<()>;

    /// Finalize the file
    fn finish(&mut self) -> Result<()>;
}

/// Encode queue identifier, assigned by the queue owner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueueId(u64);

impl QueueId {
    /// Create a queue identifier
    pub fn new(id: u64) -> Self {
        QueueId(id)
    }

    /// Get the identifier value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for QueueId {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "#{}", self.0)
    }
}

/// Callback invoked after the encoder finishes a file
type FinishedFn = Box<dyn FnOnce(QueueId, PathBuf) + Send>;

/// Encode queue configuration
pub struct QueueConfig {
    /// Drain loop poll interval
    poll_interval: Duration,
    /// Frame delay passed to the encoder
    delay_ms: Option<u32>,
    /// File finished callback
    on_finished: Option<FinishedFn>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        QueueConfig {
            poll_interval: POLL_INTERVAL,
            delay_ms: None,
            on_finished: None,
        }
    }
}

impl QueueConfig {
    /// Set the drain loop poll interval
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set the frame delay (milliseconds) passed to the encoder
    pub fn delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Set a callback to invoke after the file is finished
    pub fn on_finished<F>(mut self, on_finished: F) -> Self
    where
        F: FnOnce(QueueId, PathBuf) + Send + 'static,
    {
        self.on_finished = Some(Box::new(on_finished));
        self
    }
}

/// State guarded by the queue mutex
#[derive(Default)]
struct Pending {
    /// Frames not yet forwarded
    frames: Vec<Frame>,
    /// Accepting frames
    running: bool,
    /// Cancel requested
    cancelled: bool,
}

/// State shared with the drain thread
#[derive(Default)]
struct Shared {
    /// Pending frames and flags
    pending: Mutex<Pending>,
    /// Drain loop wake-up
    wake: Condvar,
}

impl Shared {
    /// Add a frame to the pending list
    fn add_frame(&self, frame: Frame) -> Result<()> {
        let mut pending = self.pending.lock();
        if !pending.running {
            return Err(Error::QueueClosed);
        }
        pending.frames.push(frame);
        self.wake.notify_one();
        Ok(())
    }

    /// Check if cancel was requested
    fn is_cancelled(&self) -> bool {
        self.pending.lock().cancelled
    }
}

/// Cloneable handle for adding frames from other threads
#[derive(Clone)]
pub struct FrameSender {
    shared: Arc<Shared>,
}

impl FrameSender {
    /// Add a frame to the queue
    pub fn add_frame(&self, frame: Frame) -> Result<()> {
        self.shared.add_frame(frame)
    }
}

/// Queue which forwards frames to an encoder on a dedicated thread.
///
/// Frames are forwarded in the order they were added.  Every frame added
/// before [stop](struct.EncodeQueue.html#method.stop) reaches the encoder.
pub struct EncodeQueue {
    /// Queue identifier
    id: QueueId,
    /// Shared state
    shared: Arc<Shared>,
    /// Drain thread
    drain: Option<JoinHandle<()>>,
}

impl EncodeQueue {
    /// Start an encoder and its drain thread.
    ///
    /// The encoder's `set_delay` and `start` are called before this
    /// returns; a `start` error is returned and no thread is spawned.
    pub fn start<E, P>(
        id: QueueId,
        path: P,
        mut encoder: E,
        config: QueueConfig,
    ) -> Result<Self>
    where
        E: FrameEncoder + 'static,
        P: Into<PathBuf>,
    {
        let path = path.into();
        if let Some(delay_ms) = config.delay_ms {
            encoder.set_delay(delay_ms);
        }
        encoder.start(&path)?;
        debug!("queue {}: started {:?}", id, path);
        let shared = Arc::new(Shared::default());
        shared.pending.lock().running = true;
        let drain = Drain {
            id,
            path,
            shared: Arc::clone(&shared),
            poll_interval: config.poll_interval,
            on_finished: config.on_finished,
        };
        let drain = thread::Builder::new()
            .name(format!("gifkit-encode-{}", id.get()))
            .spawn(move || drain.run(encoder))?;
        Ok(EncodeQueue {
            id,
            shared,
            drain: Some(drain),
        })
    }

    /// Get the queue identifier
    pub fn id(&self) -> QueueId {
        self.id
    }

    /// Get a handle for adding frames from other threads
    pub fn sender(&self) -> FrameSender {
        FrameSender {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Add a frame to the queue
    pub fn add_frame(&self, frame: Frame) -> Result<()> {
        self.shared.add_frame(frame)
    }

    /// Stop accepting frames, forward all pending frames, then finish.
    ///
    /// Blocks until the encoder has finished.
    pub fn stop(mut self) {
        self.close(false);
    }

    /// Discard pending frames and finish as soon as possible.
    ///
    /// A frame being encoded is completed; the drain thread then finishes
    /// the encoder and exits.  Blocks until that happens.
    pub fn cancel(mut self) {
        self.close(true);
    }

    /// Close the queue and join the drain thread
    fn close(&mut self, cancel: bool) {
        if let Some(drain) = self.drain.take() {
            {
                let mut pending = self.shared.pending.lock();
                pending.running = false;
                if cancel {
                    let n_frames = pending.frames.len();
                    pending.frames.clear();
                    pending.cancelled = true;
                    debug!("queue {}: cancel, {} dropped", self.id, n_frames);
                }
                self.shared.wake.notify_one();
            }
            if drain.join().is_err() {
                warn!("queue {}: drain thread panicked", self.id);
            }
        }
    }
}

impl Drop for EncodeQueue {
    fn drop(&mut self) {
        self.close(false);
    }
}

/// Drain loop state, owned by the drain thread
struct Drain {
    /// Queue identifier
    id: QueueId,
    /// Output path
    path: PathBuf,
    /// Shared state
    shared: Arc<Shared>,
    /// Poll interval
    poll_interval: Duration,
    /// File finished callback
    on_finished: Option<FinishedFn>,
}

impl Drain {
    /// Forward frames until stopped, then finish the encoder
    fn run<E: FrameEncoder>(self, mut encoder: E) {
        let mut n_frames = 0;
        'drain: loop {
            let (frames, running) = {
                let mut pending = self.shared.pending.lock();
                if pending.running && pending.frames.is_empty() {
                    self.shared.wake.wait_for(&mut pending, self.poll_interval);
                }
                (mem::take(&mut pending.frames), pending.running)
            };
            for frame in frames {
                if self.shared.is_cancelled() {
                    break 'drain;
                }
                if let Err(e) = encoder.add_frame(frame) {
                    warn!("queue {}: add_frame: {}", self.id, e);
                }
                n_frames += 1;
            }
            if !running {
                break;
            }
        }
        debug!("queue {}: {} frames forwarded", self.id, n_frames);
        match encoder.finish() {
            Ok(()) => {
                debug!("queue {}: finished {:?}", self.id, self.path);
                if let Some(on_finished) = self.on_finished {
                    on_finished(self.id, self.path);
                }
            }
            Err(e) => warn!("queue {}: finish: {}", self.id, e),
        }
    }
}
