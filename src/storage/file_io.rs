//! File I/O utilities with atomic writes
//!
//! Every data file is replaced through a staging file and a rename, so a
//! crash mid-write leaves the previous contents intact.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::LarderError;

/// Read JSON from a file, returning a default value if the file is missing
pub fn read_json<T, P>(path: P) -> Result<T, LarderError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(LarderError::Storage(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )));
        }
    };

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| LarderError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// The staging file sits next to the target so the rename stays on one
/// filesystem.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("staging"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_and_sync<T: Serialize>(staging: &Path, data: &T) -> Result<(), LarderError> {
    let file = File::create(staging).map_err(|e| {
        LarderError::Storage(format!("Failed to create {}: {}", staging.display(), e))
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data).map_err(|e| {
        LarderError::Storage(format!("Failed to serialize to {}: {}", staging.display(), e))
    })?;
    writer.flush().map_err(|e| {
        LarderError::Storage(format!("Failed to flush {}: {}", staging.display(), e))
    })?;

    // On disk before the rename makes it visible
    writer.get_ref().sync_all().map_err(|e| {
        LarderError::Storage(format!("Failed to sync {}: {}", staging.display(), e))
    })
}

/// Write JSON to a file atomically.
///
/// The data is written and synced to a staging file first, then renamed
/// over the target. On any failure the staging file is removed and the
/// target is left as it was.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), LarderError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LarderError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let staging = staging_path(path);
    let outcome = write_and_sync(&staging, data).and_then(|_| {
        fs::rename(&staging, path).map_err(|e| {
            LarderError::Storage(format!("Failed to replace {}: {}", path.display(), e))
        })
    });

    if outcome.is_err() {
        let _ = fs::remove_file(&staging);
    }

    outcome
}
