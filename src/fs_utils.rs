//! Filesystem helpers for output artifacts
//!
//! - `ensure_parent_dir`: creates the directory an output file will live in
//! - `atomic_rename`: replaces a file in one step (Windows needs an explicit delete)
//! - `write_atomically`: writes through a temporary sibling, then renames it
//!   over the target so readers never observe a half-written artifact

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Cross-platform atomic rename that handles Windows file replacement.
///
/// On Unix, `fs::rename` atomically replaces the target if it exists.
/// On Windows, `fs::rename` fails if the target exists, so the target is
/// deleted first.
pub fn atomic_rename(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if dst.exists() {
            fs::remove_file(dst)?;
        }
    }
    fs::rename(src, dst)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file<F>(path: &Path, write: F) -> io::Result<u64>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer)?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(file.metadata()?.len())
}

/// Write a file through a buffered writer into a temporary sibling, then
/// rename it over `path`. Returns the number of bytes written.
pub fn write_atomically<F>(path: &Path, write: F) -> io::Result<u64>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    ensure_parent_dir(path)?;
    let tmp = temp_sibling(path);

    let result = write_file(&tmp, write);

    match result {
        Ok(bytes) => {
            atomic_rename(&tmp, path)?;
            Ok(bytes)
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}
