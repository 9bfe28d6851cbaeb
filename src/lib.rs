//! Vigil - debounced directory watcher
//!
//! Vigil watches a directory tree and runs an external action once per burst
//! of changes, rather than once per change event. A burst fires after it has
//! gone quiet for five seconds, or unconditionally once it has been alive for
//! a minute, so a rapid editing session triggers the action once instead of
//! dozens of times.

pub mod error;
pub mod watcher;

// Re-exports for convenience
pub use error::{VigilError, VigilResult};
pub use watcher::{
    watch, ActionExecutor, BurstState, ChangeSource, CloseSource, Coalescer, FirePolicy,
    MonitorSession, NotifyCloser, NotifySource, ShellExecutor, SourceStatus, WatchEvent,
    WatchOptions, POLL_INTERVAL,
};
