use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::JobRecord;

pub const CSV_HEADER: [&str; 6] = [
    "Job Title",
    "Name",
    "Region",
    "Email",
    "Facility Type",
    "Creation Date",
];

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Address-book CSV for one run.
///
/// Creating it truncates the file and writes the header; every appended
/// record is flushed and synced before `append` returns.
pub struct CsvRecordWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvRecordWriter {
    pub fn create(path: &Path) -> Result<Self, OutputError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(CSV_HEADER)?;
        let mut this = Self {
            path: path.to_path_buf(),
            writer,
        };
        this.sync()?;
        Ok(this)
    }

    pub fn append(&mut self, record: &JobRecord) -> Result<(), OutputError> {
        self.writer.write_record(record.to_row())?;
        self.sync()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sync(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        self.writer.get_ref().sync_data()?;
        Ok(())
    }
}

/// Replaces `path` with `content` by writing a sibling temp file then renaming.
pub fn write_atomically(path: &Path, content: &str) -> Result<(), OutputError> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            parent.to_path_buf()
        }
        None => PathBuf::from("."),
    };

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| OutputError::Io(e.error))?;
    Ok(())
}
