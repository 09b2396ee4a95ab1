//! Whole-document JSON persistence.
//!
//! Every store re-reads its full document per operation and writes the whole
//! thing back. Writes are not atomic and there is no locking: last writer wins.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StoreError, StoreResult};

/// Read a JSON document.
///
/// A missing or whitespace-only file yields `Ok(None)`; content that does not
/// parse is a [`StoreError::Malformed`].
pub fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "document not found");
            return Ok(None);
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if text.trim().is_empty() {
        tracing::debug!(path = %path.display(), "document empty");
        return Ok(None);
    }

    let value = serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "document loaded");
    Ok(Some(value))
}

/// Write a JSON document with two-space indentation, creating parent
/// directories as needed.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut text = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');

    fs::write(path, text).map_err(io_err)?;
    tracing::debug!(path = %path.display(), "document written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let value: Option<Vec<u32>> = read_json(&dir.path().join("absent.json")).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn blank_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.json");
        fs::write(&path, "  \n").unwrap();
        let value: Option<Vec<u32>> = read_json(&path).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[1, 2,").unwrap();
        match read_json::<Vec<u32>>(&path) {
            Err(StoreError::Malformed { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected Malformed error, got {other:?}"),
        }
    }

    #[test]
    fn write_creates_parent_directories_and_indents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/doc.json");
        write_json(&path, &vec![1u32, 2]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  1,"));
        assert_eq!(read_json::<Vec<u32>>(&path).unwrap(), Some(vec![1, 2]));
    }
}
