//! Terminal status line for deploy runs.
//!
//! [`StatusLine`] renders the engine's aggregate progress as a single
//! live spinner line and finalizes it with a success or failure glyph
//! exactly once. All updates arrive from the engine's control task, so
//! the line never interleaves output from concurrent uploads.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use cdnlift_engine::{DeployError, Phase, ProgressSink, ProgressUpdate};
use indicatif::{ProgressBar, ProgressStyle};

/// Single-line spinner reporter.
pub struct StatusLine {
    bar: ProgressBar,
    label: String,
    /// Last rendered counter text, kept so the terminal glyph can repeat it.
    last_text: Mutex<String>,
    finished: AtomicBool,
}

impl StatusLine {
    /// Creates a visible status line for uploads to `bucket`.
    pub fn new(bucket: &str) -> Self {
        Self::with_bar(bucket, ProgressBar::new_spinner())
    }

    /// Creates a status line that draws nowhere. Used in tests and when
    /// stdout is not a terminal.
    pub fn hidden(bucket: &str) -> Self {
        Self::with_bar(bucket, ProgressBar::hidden())
    }

    fn with_bar(bucket: &str, bar: ProgressBar) -> Self {
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("spinner template is valid"),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        Self {
            bar,
            label: bucket.to_string(),
            last_text: Mutex::new(String::new()),
            finished: AtomicBool::new(false),
        }
    }
}

impl ProgressSink for StatusLine {
    fn update(&self, progress: ProgressUpdate) {
        let text = status_text(&self.label, &progress);
        *self.last_text.lock().unwrap() = text.clone();
        self.bar.set_message(text);
    }

    fn finish(&self, error: Option<&DeployError>) {
        // Terminal glyph renders exactly once; later calls are ignored.
        if self.finished.swap(true, Ordering::SeqCst) {
            return;
        }
        let last = self.last_text.lock().unwrap().clone();
        match error {
            None => self.bar.finish_with_message(format!("✔ {last}")),
            Some(e) => self.bar.abandon_with_message(format!("✖ {last}: {e}")),
        }
    }
}

/// Formats the one-line status text for an update.
fn status_text(label: &str, progress: &ProgressUpdate) -> String {
    let mut text = format!(
        "Uploading to {label}: {}% {}/{} files uploaded",
        progress.percent(),
        progress.uploaded,
        progress.total,
    );
    if progress.failed > 0 {
        text.push_str(&format!(", {} failed", progress.failed));
    }
    if progress.phase == Phase::Retrying {
        text.push_str(" (retrying)");
    }
    text
}
