//! JSONL audit trail.
//!
//! Appends `TrailEvent` records to per-session `{trail_dir}/{session_id}.jsonl`
//! files with `serde_jsonlines::append_json_lines`, one line per committed
//! transition. Async callers go through [`TrailWriter::write`], which runs the
//! append on the blocking pool.

use std::path::{Path, PathBuf};

use rare_core::trail::TrailEvent;

/// Appends trail events to per-session JSONL files.
#[derive(Debug, Clone)]
pub struct TrailWriter {
    trail_dir: PathBuf,
    enabled: bool,
}

impl TrailWriter {
    /// Create a writer for `trail_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory cannot be created.
    pub fn new(trail_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let trail_dir = trail_dir.into();
        std::fs::create_dir_all(&trail_dir)?;
        Ok(Self {
            trail_dir,
            enabled: true,
        })
    }

    /// A writer that drops every event.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            trail_dir: PathBuf::new(),
            enabled: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Path of a session's trail file.
    #[must_use]
    pub fn path_for(&self, session: &str) -> PathBuf {
        self.trail_dir.join(format!("{session}.jsonl"))
    }

    /// Append one event to `{trail_dir}/{event.session}.jsonl`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the line cannot be written.
    pub fn append(&self, event: &TrailEvent) -> std::io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let path = self.path_for(event.session.as_str());
        serde_jsonlines::append_json_lines(&path, [event])
    }

    /// Append one event without blocking the async worker.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the append, or an error if the blocking task
    /// panicked or was cancelled.
    pub async fn write(&self, event: TrailEvent) -> std::io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let writer = self.clone();
        tokio::task::spawn_blocking(move || writer.append(&event))
            .await
            .map_err(std::io::Error::other)?
    }
}

/// Read every event of one trail file, in write order.
///
/// # Errors
///
/// Returns the I/O error if the file cannot be read, or if a line is not a
/// valid `TrailEvent`.
pub fn read_trail(path: &Path) -> std::io::Result<Vec<TrailEvent>> {
    serde_jsonlines::json_lines(path)?.collect()
}
