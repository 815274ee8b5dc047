use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use exporter_logging::export_info;
use tempfile::NamedTempFile;
use thiserror::Error;

pub const HTML_MIME: &str = "text/html;charset=utf-8";

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Rejected(String),
}

/// Receives finished documents. How (or whether) they are persisted is the
/// sink's business.
pub trait DocumentSink {
    fn accept(&mut self, file_name: &str, mime_type: &str, content: &str)
        -> Result<(), SinkError>;
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), SinkError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| SinkError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(SinkError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| SinkError::OutputDir(e.to_string()))?;
    }
    NamedTempFile::new_in(dir).map_err(|e| SinkError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Writes each document to `{dir}/{file_name}` through a temp file and a rename.
/// An existing file with the same name is replaced in one step.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            written: Vec::new(),
        }
    }

    /// Paths written so far, in hand-off order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write_atomic(&self, file_name: &str, content: &str) -> Result<PathBuf, SinkError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(file_name);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| SinkError::Io(e.error))?;
        Ok(target)
    }
}

impl DocumentSink for DirectorySink {
    fn accept(&mut self, file_name: &str, mime_type: &str, content: &str) -> Result<(), SinkError> {
        let path = self.write_atomic(file_name, content)?;
        export_info!("wrote {} ({}, {} bytes)", path.display(), mime_type, content.len());
        self.written.push(path);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkRecord {
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
}

/// Keeps every accepted document in memory. Used for dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<SinkRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentSink for MemorySink {
    fn accept(&mut self, file_name: &str, mime_type: &str, content: &str) -> Result<(), SinkError> {
        self.records.push(SinkRecord {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}
