//! Monitor session: the two worker threads and their shutdown plumbing
//!
//! The event recorder blocks on the notification source and stamps the burst
//! window; the trigger ticker polls the coalescer on a fixed cadence and may
//! fire the action. The two workers share nothing but the coalescer's lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::VigilResult;

use super::coalesce::Coalescer;
use super::event::{WatchEvent, WatchOptions};
use super::executor::{ActionExecutor, ShellExecutor};
use super::source::{ChangeSource, CloseSource, NotifySource, SourceStatus};

/// Shared event sink for both workers
pub(crate) type EventCallback = dyn Fn(WatchEvent) + Send + Sync;

/// A running monitoring session
///
/// Owns the event recorder and trigger ticker threads. [`MonitorSession::stop`]
/// is the only way to end it short of the notification source closing on its
/// own, and returns only after both workers have terminated.
pub struct MonitorSession {
    stop_flag: Arc<AtomicBool>,
    closer: Arc<dyn CloseSource>,
    recorder: JoinHandle<()>,
    ticker: JoinHandle<()>,
}

impl MonitorSession {
    /// Spawn both workers and begin monitoring.
    pub fn start(
        source: impl ChangeSource + 'static,
        closer: Arc<dyn CloseSource>,
        executor: impl ActionExecutor + 'static,
        options: WatchOptions,
        callback: Arc<EventCallback>,
    ) -> Self {
        let coalescer = Arc::new(Coalescer::new());
        let stop_flag = Arc::new(AtomicBool::new(false));

        let cb: &EventCallback = callback.as_ref();
        cb(WatchEvent::WatchStarted {
            path: options.path.display().to_string(),
            action: options.action.clone(),
        });

        let recorder = {
            let coalescer = coalescer.clone();
            let callback = callback.clone();
            thread::spawn(move || recorder_loop(source, &coalescer, callback.as_ref()))
        };

        let ticker = {
            let stop_flag = stop_flag.clone();
            thread::spawn(move || {
                ticker_loop(
                    &coalescer,
                    &stop_flag,
                    &executor,
                    &options,
                    callback.as_ref(),
                )
            })
        };

        Self {
            stop_flag,
            closer,
            recorder,
            ticker,
        }
    }

    /// Stop both workers and wait for them to terminate.
    ///
    /// Shutdown is cooperative: the ticker notices the flag after its current
    /// sleep (and any in-flight action), the recorder unblocks when the
    /// source is closed.
    pub fn stop(self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        self.closer.close();
        let _ = self.recorder.join();
        let _ = self.ticker.join();
    }
}

fn recorder_loop(
    mut source: impl ChangeSource,
    coalescer: &Coalescer,
    callback: &EventCallback,
) {
    loop {
        match source.wait_next() {
            SourceStatus::Signal => {
                callback(WatchEvent::ChangeDetected);
                coalescer.record_event(Instant::now());
            }
            // Source closure is normal shutdown, not a failure.
            SourceStatus::Closed => break,
        }
    }
    callback(WatchEvent::RecorderStopped);
}

fn ticker_loop(
    coalescer: &Coalescer,
    stop_flag: &AtomicBool,
    executor: &impl ActionExecutor,
    options: &WatchOptions,
    callback: &EventCallback,
) {
    while !stop_flag.load(Ordering::SeqCst) {
        thread::sleep(options.poll_interval);
        coalescer.evaluate_and_fire(
            Instant::now(),
            &options.policy,
            executor,
            &options.action,
            &|event| callback(event),
        );
    }
}

/// Watch `options.path` and run the action once per burst until `running`
/// goes false.
///
/// Convenience wrapper that wires the notify-backed source and the shell
/// executor into a [`MonitorSession`].
pub fn watch(
    options: WatchOptions,
    running: Arc<AtomicBool>,
    callback: impl Fn(WatchEvent) + Send + Sync + 'static,
) -> VigilResult<()> {
    let (source, closer) = NotifySource::new(&options.path)?;
    let callback: Arc<EventCallback> = Arc::new(callback);

    let session = MonitorSession::start(
        source,
        Arc::new(closer),
        ShellExecutor::new(),
        options,
        callback.clone(),
    );

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(50));
    }

    session.stop();
    callback.as_ref()(WatchEvent::Shutdown);
    Ok(())
}
