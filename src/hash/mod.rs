//! Content checksums
//!
//! The synchronizer compares a normalized in-memory buffer with the current
//! destination file, so both sides must go through the same hasher.

use crate::types::SyncError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 32-byte Blake3 digest
pub type Checksum = [u8; 32];

/// Compute the Blake3 checksum of a file
///
/// The file is streamed in 64KB chunks.
///
/// # Example
/// ```no_run
/// use srcsync::hash::compute_hash;
/// use std::path::Path;
///
/// let hash = compute_hash(Path::new("file.txt"))?;
/// # Ok::<(), srcsync::SyncError>(())
/// ```
pub fn compute_hash(file_path: &Path) -> Result<Checksum, SyncError> {
    let mut file = File::open(file_path).map_err(|e| SyncError::copy_failed(file_path, e))?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| SyncError::copy_failed(file_path, e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[0..bytes_read]);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Compute the Blake3 checksum of an in-memory buffer
pub fn hash_bytes(content: &[u8]) -> Checksum {
    *blake3::hash(content).as_bytes()
}

/// Check whether a file already holds exactly `content`
///
/// A size mismatch short-circuits without reading the file.
pub fn file_matches(file_path: &Path, content: &[u8]) -> Result<bool, SyncError> {
    let metadata =
        std::fs::metadata(file_path).map_err(|e| SyncError::copy_failed(file_path, e))?;
    if metadata.len() != content.len() as u64 {
        return Ok(false);
    }
    Ok(compute_hash(file_path)? == hash_bytes(content))
}
