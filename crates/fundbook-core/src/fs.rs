//! Filesystem utilities for atomic snapshot writes.

use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a full file snapshot atomically: write to a sibling temp file,
/// then rename over the destination.
///
/// A mutation either lands completely or not at all; readers never observe
/// a half-written file.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or the rename fails
/// even after the fallback attempt.
pub fn write_snapshot(path: &Path, contents: &[u8]) -> io::Result<()> {
    let temp_path = temp_sibling(path);
    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }
    rename_with_fallback(&temp_path, path)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "snapshot".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Atomically rename a file, with fallback for platforms where rename fails
/// if the target exists.
///
/// On some platforms (notably Windows), `fs::rename` fails if the destination
/// already exists, so the destination is removed first and the rename retried.
/// If the rename ultimately fails, the temp file is cleaned up.
fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_snapshot_new_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("dest.csv");

        write_snapshot(&dest, b"Id,Name\n").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "Id,Name\n");
        assert!(!temp_sibling(&dest).exists());
    }

    #[test]
    fn test_write_snapshot_overwrites_existing() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("dest.csv");

        fs::write(&dest, "old").unwrap();
        write_snapshot(&dest, b"new").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
        assert!(!temp_sibling(&dest).exists());
    }
}
