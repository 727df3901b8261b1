//! JSON file backend for the harvested dataset

use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::BookCollection;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Single-file JSON dataset
///
/// The file holds one JSON array of book objects, UTF-8 encoded with
/// non-ASCII text written as-is.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    /// Creates a backend for the dataset at `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the dataset file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the dataset lives in; temporary files are created there so
    /// the final rename stays on one filesystem
    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl Storage for JsonStorage {
    fn save(&self, collection: &BookCollection) -> StorageResult<()> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(&dir)?;

        let temp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, collection)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;

        Ok(())
    }

    fn load(&self) -> StorageResult<BookCollection> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                StorageError::NotFound(self.path.display().to_string())
            }
            _ => StorageError::Io(e),
        })?;
        let collection = serde_json::from_reader(BufReader::new(file))?;
        Ok(collection)
    }
}
