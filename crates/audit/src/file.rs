//! Flat-file audit store (newline-delimited JSON).
//!
//! MVP storage backend: one record per line, appended under a single writer
//! lock and fsynced before `append` returns. The read path takes no lock on
//! the file: appends are whole-line atomic from a reader's point of view, so
//! a concurrent reader sees each record in full or not at all (it may miss a
//! record appended after its read started).

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::query::AuditQuery;
use crate::record::AuditRecord;
use crate::store::{AuditStore, AuditStoreError};

/// Environment variable naming the audit log file.
pub const AUDIT_LOG_PATH_VAR: &str = "AUDIT_LOG_PATH";

const DEFAULT_LOG_PATH: &str = "./audit.log";

/// Durable NDJSON audit log.
///
/// Rotation/compaction/retention are intentionally absent; they belong to an
/// external storage process.
#[derive(Debug)]
pub struct FileAuditStore {
    path: PathBuf,
    /// Serializes the write step so concurrent appenders cannot interleave
    /// bytes within one record.
    writer: Mutex<()>,
}

impl FileAuditStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: Mutex::new(()),
        }
    }

    /// Construct from `AUDIT_LOG_PATH`, falling back to `./audit.log`.
    ///
    /// Read once at process start; the path is immutable thereafter.
    pub fn from_env() -> Self {
        let path = std::env::var(AUDIT_LOG_PATH_VAR).unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditStore for FileAuditStore {
    fn append(&self, record: &AuditRecord) -> Result<(), AuditStoreError> {
        // serde_json never emits raw newlines, so one record is one line.
        let line = serde_json::to_string(record)
            .map_err(|e| AuditStoreError::Serialize(e.to_string()))?;

        let _guard = self
            .writer
            .lock()
            .map_err(|e| AuditStoreError::Lock(e.to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        // Durable before returning control: the record must survive a crash
        // immediately following this call.
        file.sync_data()?;

        tracing::trace!(path = %self.path.display(), action = %record.action, outcome = %record.outcome, "audit record appended");
        Ok(())
    }

    fn find(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, AuditStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            // No log yet means nothing has been recorded, not a failure.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let complete_tail = raw.ends_with('\n');
        let lines: Vec<&str> = raw.lines().filter(|l| !l.trim().is_empty()).collect();

        let mut records = Vec::with_capacity(lines.len());
        for (idx, line) in lines.iter().enumerate() {
            match serde_json::from_str::<AuditRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    // A final line without its newline is the artifact of an
                    // append interrupted by a crash; skip it. Anything else
                    // is corruption and must not be silently dropped.
                    if idx == lines.len() - 1 && !complete_tail {
                        tracing::warn!(path = %self.path.display(), "skipping truncated trailing audit line");
                        continue;
                    }
                    return Err(AuditStoreError::Corrupt(format!(
                        "line {}: {e}",
                        idx + 1
                    )));
                }
            }
        }

        Ok(query.apply(records))
    }
}
