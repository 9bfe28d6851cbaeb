//! Change notification source
//!
//! Bridges the `notify` callback API into a blocking signal stream. The
//! stream and its closer are split halves, mirroring a channel split, so the
//! recorder thread can block on `wait_next` while another thread closes the
//! source out from under it.

use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{VigilError, VigilResult};

/// Outcome of one blocking wait on the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// Something in the watched tree changed
    Signal,
    /// The source closed or failed; no further signals will arrive
    Closed,
}

/// Blocking stream of opaque change signals
pub trait ChangeSource: Send {
    fn wait_next(&mut self) -> SourceStatus;
}

/// Closes a [`ChangeSource`] from another thread
pub trait CloseSource: Send + Sync {
    /// Idempotent; any in-flight `wait_next` returns `Closed`.
    fn close(&self);
}

/// Receiving half of a notify-backed source
pub struct NotifySource {
    rx: Receiver<()>,
}

impl NotifySource {
    /// Start watching `path` recursively. Returns the blocking source and
    /// the closer handle that ends it.
    pub fn new(path: &Path) -> VigilResult<(NotifySource, NotifyCloser)> {
        let (tx, rx) = channel();
        let event_tx = tx.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if res.is_ok() {
                    let _ = event_tx.send(());
                }
            },
            Config::default(),
        )
        .map_err(|e| VigilError::Io(std::io::Error::other(e.to_string())))?;

        watcher
            .watch(path, RecursiveMode::Recursive)
            .map_err(|e| VigilError::Io(std::io::Error::other(e.to_string())))?;

        let closer = NotifyCloser {
            inner: Mutex::new(Some((watcher, tx))),
        };
        Ok((NotifySource { rx }, closer))
    }
}

impl ChangeSource for NotifySource {
    fn wait_next(&mut self) -> SourceStatus {
        match self.rx.recv() {
            Ok(()) => SourceStatus::Signal,
            Err(_) => SourceStatus::Closed,
        }
    }
}

/// Closing half of a notify-backed source
///
/// Dropping the watcher tears down its callback (and the sender captured in
/// it), which ends the stream and unblocks the waiter.
pub struct NotifyCloser {
    inner: Mutex<Option<(RecommendedWatcher, Sender<()>)>>,
}

impl CloseSource for NotifyCloser {
    fn close(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.take();
    }
}
