use std::fs;
use std::path::Path;

use thiserror::Error;

use super::item::ExamItem;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read content file: {0}")]
    Io(#[from] std::io::Error),

    #[error("content file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("content file contains no items")]
    Empty,
}

/// The fixed, ordered collection of exam items, loaded whole at startup
/// and addressed by zero-based position.
pub struct ContentStore {
    items: Vec<ExamItem>,
}

impl ContentStore {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let items: Vec<ExamItem> = serde_json::from_str(raw)?;
        if items.is_empty() {
            return Err(ContentError::Empty);
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[ExamItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ExamItem> {
        self.items.get(index)
    }

    /// Selection used by the navigation surface: an out-of-range position
    /// falls back to the first item.
    pub fn select(&self, index: usize) -> &ExamItem {
        self.items.get(index).unwrap_or(&self.items[0])
    }
}
