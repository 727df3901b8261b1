//! Storage module for persisting the harvested dataset
//!
//! This module defines the dataset types and how they are written:
//! - `BookRecord` and `BookCollection`, the harvest output
//! - The `Storage` trait for dataset backends
//! - `JsonStorage`, a single-file JSON backend with atomic replacement

mod json;
mod traits;

pub use json::JsonStorage;
pub use traits::{Storage, StorageError, StorageResult};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One harvested book
///
/// Field names in the dataset follow the established `book_list.json`
/// layout (`img_src`, `book_path`); the descriptive names are accepted as
/// aliases when loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Book title, trimmed and non-empty
    pub title: String,

    /// Book author, trimmed and non-empty
    pub author: String,

    /// Local path of the cover image, if it was downloaded
    #[serde(rename = "img_src", alias = "image_path")]
    pub image_path: Option<PathBuf>,

    /// Local path of the book text, if it was downloaded
    #[serde(rename = "book_path", alias = "text_path")]
    pub text_path: Option<PathBuf>,

    /// Reader comments in page order
    #[serde(default)]
    pub comments: Vec<String>,

    /// Genres in page order
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Ordered collection of harvested books
///
/// Order is discovery order: catalog page order, then order on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookCollection {
    records: Vec<BookRecord>,
}

impl BookCollection {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record at the end
    pub fn push(&mut self, record: BookRecord) {
        self.records.push(record);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no books were collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in collection order
    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    /// Iterates over records in collection order
    pub fn iter(&self) -> std::slice::Iter<'_, BookRecord> {
        self.records.iter()
    }
}

impl From<Vec<BookRecord>> for BookCollection {
    fn from(records: Vec<BookRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a BookCollection {
    type Item = &'a BookRecord;
    type IntoIter = std::slice::Iter<'a, BookRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
