//! Crash-safe file writes shared by the key file and the vault file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temp file used while replacing `path`: `.<name>.tmp` in the same
/// directory, so the final rename stays on one filesystem.
pub fn temp_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

/// Replace `path` with `contents` atomically.
///
/// 1. Write to the temp file (owner-only permissions on Unix).
/// 2. fsync the temp file.
/// 3. Rename it over `path`.
/// 4. fsync the parent directory (best effort).
///
/// Readers see either the old file or the new one, never a prefix.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let tmp_path = temp_path(path);

    let result = (|| {
        let mut file = open_private(&tmp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result?;

    sync_parent(path);
    Ok(())
}

/// fsync the directory containing `path` so a rename is durable.
/// Errors are ignored; not every platform supports syncing directories.
pub fn sync_parent(path: &Path) {
    #[cfg(unix)]
    if let Some(parent) = path.parent() {
        let dir = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        if let Ok(handle) = File::open(dir) {
            let _ = handle.sync_all();
        }
    }

    #[cfg(not(unix))]
    let _ = path;
}

fn open_private(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    options.open(path)
}
