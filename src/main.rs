//! Vigil CLI - debounced directory watcher
//!
//! Usage: vigil <PATH> <ACTION>
//!
//! Watches a directory tree and runs a shell action once per burst of
//! changes: after the burst has been quiet for 5 seconds, or unconditionally
//! once it has been alive for 60 seconds.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use vigil::{watch, VigilError, WatchEvent, WatchOptions};

/// Vigil - run an action once per burst of directory changes
#[derive(Parser, Debug)]
#[command(name = "vigil")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to watch (recursive)
    path: PathBuf,

    /// Shell command to run once per burst of changes
    action: String,

    /// Output events as NDJSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = normalize_watch_path(&cli.path);

    if !path.is_dir() {
        return Err(VigilError::DirectoryNotFound { path }.into());
    }

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let json = cli.json;
    if !json {
        println!("👀 Vigil");
        println!("Watching: {}", path.display());
        println!("Action: {}", cli.action);
        println!("Press Ctrl+C to stop\n");
    }

    let mut options = WatchOptions::new(path, cli.action);
    options.json = json;

    watch(options, running, move |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            render_event(event);
        }
    })?;

    Ok(())
}

fn render_event(event: WatchEvent) {
    let timestamp = chrono::Local::now().format("%H:%M:%S");

    match event {
        WatchEvent::WatchStarted { path, .. } => {
            println!("[{timestamp}] 📂 Monitoring: {path}");
        }
        WatchEvent::ChangeDetected => {
            println!("[{timestamp}] 📝 Detected a modification");
        }
        WatchEvent::ActionFired { action } => {
            println!("[{timestamp}] 🔄 Running: {action}");
        }
        WatchEvent::ActionComplete { status: 0 } => {
            println!("[{timestamp}] ✓ Action finished");
        }
        WatchEvent::ActionComplete { status } => {
            eprintln!("[{timestamp}] ⚠ Action returned non-zero status {status}");
        }
        WatchEvent::ActionFailed { message } => {
            eprintln!("[{timestamp}] ✗ {message}");
        }
        WatchEvent::RecorderStopped => {
            println!("[{timestamp}] Notification source closed");
        }
        WatchEvent::Shutdown => {
            println!("\n👋 Shutting down...");
        }
    }
}

/// Trim trailing path separators so the watcher gets a clean directory path.
fn normalize_watch_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let trimmed = raw.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        path.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}
