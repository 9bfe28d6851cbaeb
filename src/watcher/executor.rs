//! Action execution via the platform shell

use std::process::{Command, Stdio};

use crate::error::{VigilError, VigilResult};

/// Runs the configured action to completion and reports its exit status.
///
/// Zero means success. Non-zero is the caller's to report; only a failure to
/// launch at all surfaces as an error, and even that never ends monitoring.
pub trait ActionExecutor: Send + Sync {
    fn run(&self, action: &str) -> VigilResult<i32>;
}

impl<E: ActionExecutor + ?Sized> ActionExecutor for std::sync::Arc<E> {
    fn run(&self, action: &str) -> VigilResult<i32> {
        self.as_ref().run(action)
    }
}

/// Executes the action through the platform shell, like `system()` would
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl ActionExecutor for ShellExecutor {
    fn run(&self, action: &str) -> VigilResult<i32> {
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(action);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(action);
            c
        };

        let status = cmd
            .stdin(Stdio::null())
            .status()
            .map_err(|e| VigilError::ActionLaunch {
                action: action.to_string(),
                message: e.to_string(),
            })?;

        // Signal-terminated processes have no exit code; report them as -1.
        Ok(status.code().unwrap_or(-1))
    }
}
