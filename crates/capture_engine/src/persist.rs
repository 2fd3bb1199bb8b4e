use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("cannot write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        Ok(())
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))
    }
}

/// Writes a file by filling a sibling temp file and renaming it over the target.
///
/// Readers see either the previous content or the new content, never a torn
/// file, and a failed write leaves any existing file untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomicFileWriter;

impl AtomicFileWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, target: &Path, content: &[u8]) -> Result<PathBuf, PersistError> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        ensure_output_dir(&dir)?;

        let io_err = |source: io::Error| PersistError::Io {
            path: target.to_path_buf(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
        tmp.write_all(content).map_err(io_err)?;
        tmp.flush().map_err(io_err)?;
        tmp.as_file_mut().sync_all().map_err(io_err)?;
        tmp.persist(target).map_err(|e| io_err(e.error))?;
        Ok(target.to_path_buf())
    }
}
