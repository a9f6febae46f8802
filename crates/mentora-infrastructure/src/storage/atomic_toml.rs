//! Atomic TOML file operations.
//!
//! A thin layer for safe concurrent access to single-record TOML files:
//! atomic replace via tmp file + fsync + rename, and an advisory exclusive
//! lock callers hold across a read-check-write window.

use fs2::FileExt;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during atomic TOML operations.
#[derive(Debug, Error)]
pub enum AtomicTomlError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// File locking error.
    #[error("lock error: {0}")]
    Lock(String),
}

/// A handle to one TOML-encoded record on disk.
///
/// Writes are all-or-nothing: the record is serialized to a hidden temp file
/// in the same directory, fsynced, then renamed over the target. Readers
/// never observe a half-written file.
///
/// Isolation across a read-modify-write sequence is the caller's business:
/// take [`lock`](Self::lock) first and keep the guard alive until the final
/// `save` or `delete` returns.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a handle for the record at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    /// The path of the underlying record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: record exists and parsed
    /// - `Ok(None)`: file missing or empty
    /// - `Err`: read or parse failure
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let record: T = toml::from_str(&content)?;
        Ok(Some(record))
    }

    /// Replaces the record atomically.
    pub fn save(&self, record: &T) -> Result<(), AtomicTomlError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = toml::to_string_pretty(record)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Removes the record file.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if a file was removed, `Ok(false)` if none existed.
    pub fn delete(&self) -> Result<bool, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }

    /// Acquires an exclusive advisory lock scoped to this record.
    ///
    /// The lock lives in a sibling `.lock` file and is released when the
    /// returned guard drops. Hold it across load-inspect-save sequences that
    /// must not interleave with other writers.
    pub fn lock(&self) -> Result<FileLockGuard, AtomicTomlError> {
        FileLockGuard::acquire(&self.path)
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicTomlError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicTomlError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no parent directory",
            ))
        })?;
        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicTomlError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no file name",
            ))
        })?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Guard for an exclusive advisory lock; unlocks on drop.
pub struct FileLockGuard {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLockGuard {
    fn acquire(record_path: &Path) -> Result<Self, AtomicTomlError> {
        let lock_path = record_path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| AtomicTomlError::Lock(format!("failed to acquire lock: {}", e)))?;

        Ok(Self { file, lock_path })
    }
}

impl Drop for FileLockGuard {
    fn drop(&mut self) {
        // Unlock is implicit when the handle closes; removing the lock file
        // is best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}
