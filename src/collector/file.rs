use crate::collector::StatusSource;
use crate::error::CollectorError;
use std::path::PathBuf;

/// Replays a captured `birdc show protocols all` dump from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> FileSource {
        FileSource { path: path.into() }
    }
}

impl StatusSource for FileSource {
    fn collect(&self) -> Result<String, CollectorError> {
        let bytes = std::fs::read(&self.path).map_err(|source| CollectorError::Io {
            command: format!("read {}", self.path.display()),
            source,
        })?;
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.txt");
        std::fs::write(&path, "BIRD 2.0.12 ready.\n").unwrap();
        assert_eq!(
            FileSource::new(&path).collect().unwrap(),
            "BIRD 2.0.12 ready.\n"
        );

        let err = FileSource::new(dir.path().join("missing.txt"))
            .collect()
            .unwrap_err();
        assert!(matches!(err, CollectorError::Io { .. }));

        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = FileSource::new(&path).collect().unwrap_err();
        assert!(matches!(err, CollectorError::InvalidUtf8(_)));
    }
}
