//! Append-only audit log
//!
//! Entries are stored one JSON object per line (JSONL) and flushed as soon
//! as they are written, so a crash mid-session loses at most the entry
//! being appended.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::{LarderError, LarderResult};

use super::entry::AuditEntry;

/// Writes and reads the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry to the log and flush it.
    ///
    /// The whole line goes out in a single write so entries from separate
    /// processes cannot interleave.
    pub fn log(&self, entry: &AuditEntry) -> LarderResult<()> {
        let mut line = serde_json::to_vec(entry)
            .map_err(|e| LarderError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| LarderError::Io(format!("Failed to open audit log: {}", e)))?;

        file.write_all(&line)
            .map_err(|e| LarderError::Io(format!("Failed to append to audit log: {}", e)))?;
        file.flush()
            .map_err(|e| LarderError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// All entries in chronological order, oldest first
    pub fn read_all(&self) -> LarderResult<Vec<AuditEntry>> {
        let raw = match fs::read_to_string(&self.log_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(LarderError::Io(format!("Failed to read audit log: {}", e)));
            }
        };

        let mut entries = Vec::new();
        for (number, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(line).map_err(|e| {
                LarderError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    number + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The most recent `count` entries, still oldest first
    pub fn read_recent(&self, count: usize) -> LarderResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }

    /// Number of entries in the log, without parsing them
    pub fn entry_count(&self) -> LarderResult<usize> {
        let raw = match fs::read_to_string(&self.log_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(LarderError::Io(format!("Failed to read audit log: {}", e)));
            }
        };

        Ok(raw.lines().filter(|l| !l.trim().is_empty()).count())
    }
}
