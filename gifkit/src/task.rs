// task.rs
//
// Copyright (c) 2026  gifkit developers
//
//! Background decode tasks
use crate::animation::Animation;
use crate::decode::{Decoder, MAX_IMAGE_SZ};
use crate::error::{Error, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Cooperative cancellation flag.
///
/// Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a new token (not cancelled)
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Decode task identifier, assigned by the task owner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Create a task identifier
    pub fn new(id: u64) -> Self {
        TaskId(id)
    }

    /// Get the identifier value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "#{}", self.0)
    }
}

/// Source of GIF data for a task
pub enum Source {
    /// File to open on the task thread
    File(PathBuf),
    /// Any reader
    Reader(Box<dyn Read + Send>),
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::File(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::File(path.to_path_buf())
    }
}

impl Source {
    /// Create a source from a reader
    pub fn reader<R: Read + Send + 'static>(reader: R) -> Self {
        Source::Reader(Box::new(reader))
    }

    /// Open the source for reading
    fn open(self) -> Result<Box<dyn Read + Send>> {
        match self {
            Source::File(path) => {
                debug!("opening {:?}", path);
                Ok(Box::new(File::open(path)?))
            }
            Source::Reader(reader) => Ok(reader),
        }
    }
}

/// Completion callback
type Callback = Box<dyn FnOnce(Result<Animation>) + Send>;

/// Single-use background decode.
///
/// The completion callback is invoked exactly once, on the thread which
/// runs the task, with either the whole animation or an error.
pub struct DecodeTask {
    /// Task identifier
    id: TaskId,
    /// Data source
    source: Source,
    /// Maximum image size, in pixels
    max_image_sz: Option<usize>,
    /// Strict decoding
    strict: bool,
    /// Cancellation flag
    cancel: CancelToken,
    /// Completion callback
    callback: Callback,
}

impl DecodeTask {
    /// Create a new decode task
    pub fn new<S, F>(id: TaskId, source: S, callback: F) -> Self
    where
        S: Into<Source>,
        F: FnOnce(Result<Animation>) + Send + 'static,
    {
        DecodeTask {
            id,
            source: source.into(),
            max_image_sz: Some(MAX_IMAGE_SZ),
            strict: false,
            cancel: CancelToken::new(),
            callback: Box::new(callback),
        }
    }

    /// Set the maximum image size (in pixels)
    pub fn max_image_sz(mut self, max_image_sz: Option<usize>) -> Self {
        self.max_image_sz = max_image_sz;
        self
    }

    /// Enable or disable strict decoding
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Use a shared cancellation token
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Get the task identifier
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Get a clone of the cancellation token
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run the task on the current thread
    pub fn run(self) {
        let DecodeTask {
            id,
            source,
            max_image_sz,
            strict,
            cancel,
            callback,
        } = self;
        let res = decode_source(source, max_image_sz, strict, &cancel);
        match &res {
            Ok(animation) => {
                debug!("task {}: {} frames", id, animation.len())
            }
            Err(e) => warn!("task {}: {}", id, e),
        }
        callback(res);
    }

    /// Run the task on a dedicated thread.
    ///
    /// If the thread cannot be spawned, the callback is never invoked.
    pub fn spawn(self) -> Result<JoinHandle<()>> {
        let name = format!("gifkit-decode-{}", self.id.get());
        Ok(thread::Builder::new().name(name).spawn(move || self.run())?)
    }

    /// Reject the task without running it
    fn reject(self, err: Error) {
        warn!("task {}: {}", self.id, err);
        (self.callback)(Err(err));
    }
}

/// Open a source and decode it
fn decode_source(
    source: Source,
    max_image_sz: Option<usize>,
    strict: bool,
    cancel: &CancelToken,
) -> Result<Animation> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    let reader = source.open()?;
    Decoder::new(reader)
        .max_image_sz(max_image_sz)
        .strict(strict)
        .decode_with(cancel)
}

/// Handle for a task submitted to a [DecodePool](struct.DecodePool.html)
#[derive(Clone, Debug)]
pub struct TaskHandle {
    /// Task identifier
    id: TaskId,
    /// Cancellation flag
    cancel: CancelToken,
}

impl TaskHandle {
    /// Get the task identifier
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Request cancellation of the task.
    ///
    /// The task reports `Cancelled` unless decoding already finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Get a clone of the cancellation token
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

/// Fixed-size pool of decode worker threads
pub struct DecodePool {
    /// Job sender (`None` after shutdown)
    sender: Option<Sender<DecodeTask>>,
    /// Worker threads
    workers: Vec<JoinHandle<()>>,
    /// Task identifier sequence
    next_id: AtomicU64,
    /// Maximum image size for submitted tasks
    max_image_sz: Option<usize>,
    /// Strict decoding for submitted tasks
    strict: bool,
}

impl DecodePool {
    /// Create a pool with a number of worker threads (at least one)
    pub fn new(n_workers: usize) -> Result<Self> {
        let (sender, receiver) = unbounded();
        let n_workers = n_workers.max(1);
        let mut workers = Vec::with_capacity(n_workers);
        for i in 0..n_workers {
            let receiver = receiver.clone();
            let worker = thread::Builder::new()
                .name(format!("gifkit-pool-{i}"))
                .spawn(move || work(receiver))?;
            workers.push(worker);
        }
        debug!("decode pool: {} workers", n_workers);
        Ok(DecodePool {
            sender: Some(sender),
            workers,
            next_id: AtomicU64::new(1),
            max_image_sz: Some(MAX_IMAGE_SZ),
            strict: false,
        })
    }

    /// Set the maximum image size (in pixels) for submitted tasks
    pub fn max_image_sz(mut self, max_image_sz: Option<usize>) -> Self {
        self.max_image_sz = max_image_sz;
        self
    }

    /// Enable or disable strict decoding for submitted tasks
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Get the number of worker threads
    pub fn n_workers(&self) -> usize {
        self.workers.len()
    }

    /// Get the next task identifier
    pub fn next_id(&self) -> TaskId {
        TaskId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Submit a source for decoding
    pub fn submit<S, F>(&self, source: S, callback: F) -> Result<TaskHandle>
    where
        S: Into<Source>,
        F: FnOnce(Result<Animation>) + Send + 'static,
    {
        let task = DecodeTask::new(self.next_id(), source, callback)
            .max_image_sz(self.max_image_sz)
            .strict(self.strict);
        self.submit_task(task)
    }

    /// Submit a task.
    ///
    /// A rejected task has its callback invoked with `PoolClosed`.
    pub fn submit_task(&self, task: DecodeTask) -> Result<TaskHandle> {
        let handle = TaskHandle {
            id: task.id(),
            cancel: task.cancel_token(),
        };
        let task = match &self.sender {
            Some(sender) => match sender.send(task) {
                Ok(()) => {
                    debug!("task {} submitted", handle.id);
                    return Ok(handle);
                }
                Err(err) => err.into_inner(),
            },
            None => task,
        };
        task.reject(Error::PoolClosed);
        Err(Error::PoolClosed)
    }

    /// Stop accepting tasks, finish queued ones and join the workers
    pub fn shutdown(&mut self) {
        if self.sender.take().is_some() {
            for worker in self.workers.drain(..) {
                if worker.join().is_err() {
                    warn!("decode worker panicked");
                }
            }
            debug!("decode pool shut down");
        }
    }
}

impl Drop for DecodePool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Worker loop: run tasks until the channel closes
fn work(receiver: Receiver<DecodeTask>) {
    for task in receiver.iter() {
        task.run();
    }
}
