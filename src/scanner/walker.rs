//! Sequential directory walker

use std::path::{Path, PathBuf};

/// Lazy recursive walk yielding regular files under a root
///
/// Hidden files are included and `.gitignore`-style filters are off: every
/// file on disk counts. Entries are visited depth-first, sorted by file name
/// within each directory. Symlinks are yielded when they resolve to a file.
/// Unreadable entries are logged and skipped.
pub struct FileWalk {
    inner: ignore::Walk,
}

impl FileWalk {
    /// Start walking `root`
    pub fn new(root: &Path) -> Self {
        let inner = ignore::WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();
        Self { inner }
    }
}

impl Iterator for FileWalk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        "Error during directory traversal: {}. Walk will continue with remaining files.",
                        e
                    );
                    continue;
                }
            };

            let file_type = match entry.file_type() {
                Some(ft) => ft,
                None => continue,
            };

            if file_type.is_file() {
                return Some(entry.into_path());
            }

            // Pipes, sockets and dangling links are not files to sync.
            if file_type.is_symlink() && entry.path().is_file() {
                return Some(entry.into_path());
            }
        }
    }
}

/// Collect every file under `root`
///
/// # Example
/// ```no_run
/// use srcsync::scanner::list_files;
/// use std::path::Path;
///
/// for path in list_files(Path::new("site")) {
///     println!("{}", path.display());
/// }
/// ```
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    FileWalk::new(root).collect()
}

/// Map `path` under `from_root` to the same relative location under `to_root`
///
/// Returns `None` when `path` is not inside `from_root`.
pub fn translate_path(path: &Path, from_root: &Path, to_root: &Path) -> Option<PathBuf> {
    path.strip_prefix(from_root)
        .ok()
        .map(|relative| to_root.join(relative))
}
