//! Directory monitor
//!
//! Implements the watch-and-run loop with:
//! - Burst coalescing (5s quiet period, 60s maximum window)
//! - One action invocation per burst, never overlapping
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

mod coalesce;
mod event;
mod executor;
mod session;
mod source;

pub use coalesce::{BurstState, Coalescer, FirePolicy, POLL_INTERVAL};
pub use event::{WatchEvent, WatchOptions};
pub use executor::{ActionExecutor, ShellExecutor};
pub use session::{watch, MonitorSession};
pub use source::{ChangeSource, CloseSource, NotifyCloser, NotifySource, SourceStatus};
