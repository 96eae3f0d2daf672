//! Schedule sources: where the raw record text comes from.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures reading a schedule source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The storage medium holding the schedule is not present.
    #[error("storage unavailable: {path}")]
    StorageUnavailable { path: PathBuf },

    /// The storage is present but holds no schedule file.
    #[error("schedule file not found: {path}")]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Supplies the full text of the schedule.
pub trait ScheduleSource {
    fn read_text(&self) -> Result<String, SourceError>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

/// A schedule file. Its parent directory stands in for the storage medium.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_present(&self) -> bool {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.is_dir(),
            _ => true,
        }
    }
}

impl ScheduleSource for FileSource {
    fn read_text(&self) -> Result<String, SourceError> {
        if !self.storage_present() {
            return Err(SourceError::StorageUnavailable {
                path: self.path.clone(),
            });
        }

        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SourceError::NotFound {
                path: self.path.clone(),
            }),
            Err(source) => Err(SourceError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory text, for tests and one-off rendering.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    text: Option<String>,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// A source whose storage is missing.
    pub const fn missing() -> Self {
        Self { text: None }
    }
}

impl ScheduleSource for StaticSource {
    fn read_text(&self) -> Result<String, SourceError> {
        self.text
            .clone()
            .ok_or_else(|| SourceError::StorageUnavailable {
                path: PathBuf::from("<memory>"),
            })
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("schedule.csv");
        std::fs::write(&path, "start,stop,action\n").unwrap();

        let text = FileSource::new(&path).read_text().unwrap();
        assert_eq!(text, "start,stop,action\n");
    }

    #[test]
    fn missing_file_in_present_directory_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let source = FileSource::new(temp.path().join("schedule.csv"));
        assert!(matches!(
            source.read_text(),
            Err(SourceError::NotFound { .. })
        ));
    }

    #[test]
    fn missing_directory_is_storage_unavailable() {
        let temp = tempfile::tempdir().unwrap();
        let source = FileSource::new(temp.path().join("card").join("schedule.csv"));
        assert!(matches!(
            source.read_text(),
            Err(SourceError::StorageUnavailable { .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("schedule.csv");
        std::fs::write(&path, b"a\xffb").unwrap();

        let text = FileSource::new(&path).read_text().unwrap();
        assert_eq!(text, "a\u{fffd}b");
    }

    #[test]
    fn static_source() {
        assert_eq!(StaticSource::new("x").read_text().unwrap(), "x");
        assert!(matches!(
            StaticSource::missing().read_text(),
            Err(SourceError::StorageUnavailable { .. })
        ));
    }
}
