//! Per-actor leveled logging
//!
//! Actors never write to a global sink. Each one holds an `Arc<dyn Logger>`
//! whose lowest severity can be raised and restored at runtime, which the
//! waiting engine uses to keep repeated polls out of the log.

use std::sync::atomic::{AtomicU8, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use screenplay_core_types::Severity;
use serde::{Deserialize, Serialize};

/// Leveled log sink with a settable minimum severity.
pub trait Logger: Send + Sync {
    /// Messages below this severity are dropped.
    fn lowest_severity(&self) -> Severity;

    fn set_lowest_severity(&self, severity: Severity);

    /// Writes a message that already passed the severity filter.
    fn write(&self, severity: Severity, message: &str);

    /// Records a file produced during the run (screenshot, dump, report).
    fn write_artifact(&self, artifact: Artifact) {
        self.write(
            Severity::Info,
            &format!("Logged artifact ({}): {}", artifact.kind, artifact.path),
        );
    }

    fn enabled(&self, severity: Severity) -> bool {
        severity >= self.lowest_severity()
    }

    fn log(&self, severity: Severity, message: &str) {
        if self.enabled(severity) {
            self.write(severity, message);
        }
    }

    fn trace(&self, message: &str) {
        self.log(Severity::Trace, message);
    }

    fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }

    /// Artifacts are filtered at `Info`.
    fn log_artifact(&self, kind: &str, path: &str) {
        if self.enabled(Severity::Info) {
            self.write_artifact(Artifact {
                kind: kind.to_string(),
                path: path.to_string(),
            });
        }
    }
}

/// Lock-free holder for a logger's lowest severity.
#[derive(Debug)]
pub struct SeverityCell(AtomicU8);

impl SeverityCell {
    pub fn new(severity: Severity) -> Self {
        Self(AtomicU8::new(severity.as_u8()))
    }

    pub fn get(&self) -> Severity {
        Severity::from_u8(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, severity: Severity) {
        self.0.store(severity.as_u8(), Ordering::Relaxed);
    }
}

impl Default for SeverityCell {
    fn default() -> Self {
        Self::new(Severity::Info)
    }
}

/// Raises a logger's lowest severity and restores the original on drop.
pub struct SeverityGuard<'a> {
    logger: &'a dyn Logger,
    original: Severity,
}

impl<'a> SeverityGuard<'a> {
    /// Raises to `floor` only when the current severity is below it.
    pub fn raise_to(logger: &'a dyn Logger, floor: Severity) -> Self {
        let original = logger.lowest_severity();
        if original < floor {
            logger.set_lowest_severity(floor);
        }
        Self { logger, original }
    }

    pub fn original(&self) -> Severity {
        self.original
    }
}

impl Drop for SeverityGuard<'_> {
    fn drop(&mut self) {
        self.logger.set_lowest_severity(self.original);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: String,
    pub path: String,
}

/// Logger that discards everything. Default for actors built without one.
#[derive(Debug, Default)]
pub struct NoOpLogger {
    severity: SeverityCell,
}

impl NoOpLogger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Logger for NoOpLogger {
    fn lowest_severity(&self) -> Severity {
        self.severity.get()
    }

    fn set_lowest_severity(&self, severity: Severity) {
        self.severity.set(severity);
    }

    fn write(&self, _severity: Severity, _message: &str) {}

    fn write_artifact(&self, _artifact: Artifact) {}
}

/// Forwards actor log lines to `tracing` events under the `screenplay` target.
#[derive(Debug, Default)]
pub struct TracingLogger {
    severity: SeverityCell,
}

impl TracingLogger {
    pub fn new(lowest: Severity) -> Self {
        Self {
            severity: SeverityCell::new(lowest),
        }
    }
}

impl Logger for TracingLogger {
    fn lowest_severity(&self) -> Severity {
        self.severity.get()
    }

    fn set_lowest_severity(&self, severity: Severity) {
        self.severity.set(severity);
    }

    fn write(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Trace => tracing::trace!(target: "screenplay", "{}", message),
            Severity::Debug => tracing::debug!(target: "screenplay", "{}", message),
            Severity::Info => tracing::info!(target: "screenplay", "{}", message),
            Severity::Warning => tracing::warn!(target: "screenplay", "{}", message),
            Severity::Error => tracing::error!(target: "screenplay", "{}", message),
        }
    }

    fn write_artifact(&self, artifact: Artifact) {
        tracing::info!(
            target: "screenplay",
            kind = %artifact.kind,
            path = %artifact.path,
            "artifact"
        );
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    pub artifact: Option<Artifact>,
}

/// Keeps every accepted entry in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    severity: SeverityCell,
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new(lowest: Severity) -> Self {
        Self {
            severity: SeverityCell::new(lowest),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn artifacts(&self) -> Vec<Artifact> {
        self.entries
            .lock()
            .iter()
            .filter_map(|entry| entry.artifact.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Logger for MemoryLogger {
    fn lowest_severity(&self) -> Severity {
        self.severity.get()
    }

    fn set_lowest_severity(&self, severity: Severity) {
        self.severity.set(severity);
    }

    fn write(&self, severity: Severity, message: &str) {
        self.entries.lock().push(LogEntry {
            at: Utc::now(),
            severity,
            message: message.to_string(),
            artifact: None,
        });
    }

    fn write_artifact(&self, artifact: Artifact) {
        self.entries.lock().push(LogEntry {
            at: Utc::now(),
            severity: Severity::Info,
            message: format!("Logged artifact ({}): {}", artifact.kind, artifact.path),
            artifact: Some(artifact),
        });
    }
}
