//! Atomic file writes

use crate::types::SyncError;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Copy a file atomically using the write-then-rename strategy
///
/// 1. Stream `src` into a temporary file next to `dest`
/// 2. Flush and sync to disk
/// 3. Preserve metadata (permissions, mtime) of `src`
/// 4. Rename over `dest`
///
/// The temporary file is removed if any step fails. When `dest` is a symlink
/// the file it points to is replaced and the link itself is kept.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SyncError::CopyFailed)` - IO failure, tagged with `dest`
///
/// # Example
/// ```no_run
/// use srcsync::executor::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(Path::new("logo.png"), Path::new("site/logo.png"))?;
/// # Ok::<(), srcsync::SyncError>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    let fail = |e| SyncError::copy_failed(dest, e);

    let target = resolve_target(dest).map_err(fail)?;
    let mut part_file = create_part_file(&target).map_err(fail)?;
    let mut src_file = File::open(src).map_err(|e| SyncError::copy_failed(src, e))?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file
            .read(&mut buffer)
            .map_err(|e| SyncError::copy_failed(src, e))?;

        if bytes_read == 0 {
            break;
        }

        part_file.write_all(&buffer[0..bytes_read]).map_err(fail)?;
        total_bytes += bytes_read as u64;
    }

    part_file.as_file().sync_all().map_err(fail)?;

    let src_metadata = fs::metadata(src).map_err(|e| SyncError::copy_failed(src, e))?;
    fs::set_permissions(part_file.path(), src_metadata.permissions()).map_err(fail)?;
    let mtime = src_metadata
        .modified()
        .map_err(|e| SyncError::copy_failed(src, e))?;
    filetime::set_file_mtime(part_file.path(), filetime::FileTime::from_system_time(mtime))
        .map_err(fail)?;

    part_file.persist(&target).map_err(|e| fail(e.error))?;

    Ok(total_bytes)
}

/// Replace `dest` with `content` using the same write-then-rename strategy
///
/// Permissions of an existing `dest` are kept; the modification time becomes
/// the time of the write. Symlinks are written through, as in
/// [`copy_file_atomic`].
pub fn write_file_atomic(dest: &Path, content: &[u8]) -> Result<u64, SyncError> {
    let fail = |e| SyncError::copy_failed(dest, e);

    let target = resolve_target(dest).map_err(fail)?;
    let existing_permissions = fs::metadata(&target).ok().map(|m| m.permissions());

    let mut part_file = create_part_file(&target).map_err(fail)?;
    part_file.write_all(content).map_err(fail)?;
    part_file.as_file().sync_all().map_err(fail)?;

    if let Some(permissions) = existing_permissions {
        fs::set_permissions(part_file.path(), permissions).map_err(fail)?;
    }

    part_file.persist(&target).map_err(|e| fail(e.error))?;

    Ok(content.len() as u64)
}

// A rename onto a symlink would replace the link, so write to what it points at.
fn resolve_target(dest: &Path) -> std::io::Result<PathBuf> {
    match fs::symlink_metadata(dest) {
        Ok(metadata) if metadata.file_type().is_symlink() => fs::canonicalize(dest),
        _ => Ok(dest.to_path_buf()),
    }
}

// Same directory as `dest` so the final rename never crosses filesystems.
fn create_part_file(dest: &Path) -> std::io::Result<NamedTempFile> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    tempfile::Builder::new()
        .prefix(".srcsync-")
        .suffix(".part")
        .tempfile_in(parent)
}
