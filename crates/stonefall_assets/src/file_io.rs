//! # File I/O
//!
//! Blocking whole-file reads and writes. Every failure is logged here so
//! callers can simply degrade.

use std::fs;
use std::path::Path;

use crate::error::{AssetError, AssetResult};

/// Reads an entire file into memory.
///
/// # Errors
///
/// Returns [`AssetError::Read`] if the file is missing or unreadable.
pub fn read_file(path: &Path) -> AssetResult<Vec<u8>> {
    fs::read(path).map_err(|source| {
        tracing::warn!("Failed to read file {}: {}", path.display(), source);
        AssetError::Read {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Writes `bytes` to `path`, replacing any previous contents.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns [`AssetError::Write`] if the file cannot be created or written.
pub fn write_file(path: &Path, bytes: &[u8]) -> AssetResult<()> {
    let result = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
    .and_then(|()| fs::write(path, bytes));

    result.map_err(|source| {
        tracing::warn!("Failed to write file {}: {}", path.display(), source);
        AssetError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/blob.bin");

        write_file(&path, &[1, 2, 3]).unwrap();
        assert_eq!(read_file(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(&dir.path().join("missing.tga")).unwrap_err();
        assert!(matches!(err, AssetError::Read { .. }));
    }

    #[test]
    fn test_write_into_file_as_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        write_file(&blocker, b"x").unwrap();

        let err = write_file(&blocker.join("child.bin"), b"y").unwrap_err();
        assert!(matches!(err, AssetError::Write { .. }));
    }
}
