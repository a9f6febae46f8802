//! Storage primitives shared by the file-backed repositories.

mod atomic_toml;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile, FileLockGuard};

use mentora_core::MentoraError;

/// Maps a storage-layer failure onto the shared error taxonomy.
///
/// Storage failures must surface as data-access/IO/serialization errors and
/// never be mistaken for lifecycle rule violations.
pub(crate) fn storage_error(err: AtomicTomlError) -> MentoraError {
    match err {
        AtomicTomlError::Io(e) => MentoraError::from(e),
        AtomicTomlError::Parse(e) => MentoraError::from(e),
        AtomicTomlError::Serialize(e) => MentoraError::from(e),
        AtomicTomlError::Lock(message) => MentoraError::data_access(message),
    }
}
