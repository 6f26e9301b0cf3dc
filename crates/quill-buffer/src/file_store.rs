//! Whole-file text I/O.
//!
//! Each call opens, uses and closes its own file handle; nothing stays
//! open between calls. Failures are logged and returned to the caller.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Result type for file store operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading or writing a document file.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Not a UTF-8 text file: {}", .0.display())]
    NotText(PathBuf),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => FileError::PermissionDenied(path.to_path_buf()),
            _ => FileError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// The path the failed operation was acting on.
    pub fn path(&self) -> &Path {
        match self {
            FileError::NotFound(path)
            | FileError::PermissionDenied(path)
            | FileError::NotText(path)
            | FileError::Io { path, .. } => path,
        }
    }
}

const UTF8_BOM: &str = "\u{feff}";

/// Reads and writes whole text files.
///
/// Remembers the text of the last successful read so a failed read never
/// clobbers it.
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    last_text: String,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text returned by the last successful `read_text_file`, or empty.
    pub fn last_text(&self) -> &str {
        &self.last_text
    }

    /// Reads the whole file at `path` as text.
    ///
    /// A leading byte-order mark is dropped. Invalid UTF-8 is reported as
    /// `FileError::NotText`.
    pub fn read_text_file(&mut self, path: impl AsRef<Path>) -> FileResult<String> {
        let path = path.as_ref();
        let text = read_text(path).inspect_err(|e| {
            tracing::warn!("Read file failed: {}", e);
        })?;

        tracing::debug!("Read {} bytes from {}", text.len(), path.display());
        self.last_text.clone_from(&text);
        Ok(text)
    }

    /// Appends `text` to the file at `path`, creating it if missing.
    pub fn write_text_file(&self, path: impl AsRef<Path>, text: &str) -> FileResult<()> {
        let path = path.as_ref();
        append_text(path, text).inspect_err(|e| {
            tracing::warn!("Write file failed: {}", e);
        })?;

        tracing::debug!("Appended {} bytes to {}", text.len(), path.display());
        Ok(())
    }

    /// Replaces the contents of the file at `path` with `text`.
    ///
    /// Writes a sibling temporary file first and renames it over the
    /// target, so a failed save leaves the old contents intact.
    pub fn save_text_file(&self, path: impl AsRef<Path>, text: &str) -> FileResult<()> {
        let path = path.as_ref();
        replace_text(path, text).inspect_err(|e| {
            tracing::warn!("Save file failed: {}", e);
        })?;

        tracing::info!("Saved {}", path.display());
        Ok(())
    }
}

fn read_text(path: &Path) -> FileResult<String> {
    let bytes = std::fs::read(path).map_err(|e| FileError::from_io(path, e))?;
    let mut text = String::from_utf8(bytes).map_err(|_| FileError::NotText(path.to_path_buf()))?;
    if text.starts_with(UTF8_BOM) {
        text.drain(..UTF8_BOM.len());
    }
    Ok(text)
}

fn append_text(path: &Path, text: &str) -> FileResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FileError::from_io(path, e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| FileError::from_io(path, e))
}

fn replace_text(path: &Path, text: &str) -> FileResult<()> {
    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".quill-tmp");
    let temp_path = path.with_file_name(temp_name);

    std::fs::write(&temp_path, text.as_bytes()).map_err(|e| FileError::from_io(path, e))?;
    std::fs::rename(&temp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        FileError::from_io(path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut store = FileStore::new();

        let text = "first line\nsecond line with ünïcode\n";
        store.write_text_file(&path, text).unwrap();
        assert_eq!(store.read_text_file(&path).unwrap(), text);
        assert_eq!(store.last_text(), text);
    }

    #[test]
    fn test_write_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let mut store = FileStore::new();

        store.write_text_file(&path, "one ").unwrap();
        store.write_text_file(&path, "two").unwrap();
        assert_eq!(store.read_text_file(&path).unwrap(), "one two");
    }

    #[test]
    fn test_save_replaces_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        let mut store = FileStore::new();

        store.write_text_file(&path, "old contents").unwrap();
        store.save_text_file(&path, "new").unwrap();
        assert_eq!(store.read_text_file(&path).unwrap(), "new");
        // No temporary file left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_file_is_reported_and_state_survives() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.txt");
        std::fs::write(&good, "kept").unwrap();
        let mut store = FileStore::new();

        store.read_text_file(&good).unwrap();
        let err = store.read_text_file(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));
        assert!(err.path().ends_with("missing.txt"));
        assert_eq!(store.last_text(), "kept");

        assert_eq!(store.read_text_file(&good).unwrap(), "kept");
    }

    #[test]
    fn test_last_text_starts_empty() {
        let mut store = FileStore::new();
        assert!(store.read_text_file("/definitely/not/here.txt").is_err());
        assert_eq!(store.last_text(), "");
    }

    #[test]
    fn test_binary_file_is_not_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x9f]).unwrap();

        let err = FileStore::new().read_text_file(&path).unwrap_err();
        assert!(matches!(err, FileError::NotText(_)));
    }

    #[test]
    fn test_bom_is_stripped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        std::fs::write(&path, "\u{feff}hello").unwrap();

        assert_eq!(FileStore::new().read_text_file(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("file.txt");
        let err = FileStore::new().write_text_file(&path, "x").unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));
    }
}
