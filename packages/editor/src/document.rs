//! # Page Document
//!
//! One page's widget collection plus its persistence bookkeeping.
//!
//! Pages are persisted through a [`PageStore`], which only knows how to load
//! a page and replace it wholesale. Stores can be:
//! - **Memory-backed**: [`MemoryStore`], for tests and embedding
//! - **File-backed**: [`JsonFileStore`], one `<page_id>.json` per page
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Save
//!   ↓      ↓      ↓
//! Store  Mutations  Store (replace whole collection)
//! ```

use crate::block::BlockInstance;
use crate::collection::BlockCollection;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Invalid page id: {0:?}")]
    InvalidPageId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed page data: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Store rejected the write: {0}")]
    Rejected(String),
}

/// Persistence boundary for pages
pub trait PageStore {
    fn load(&self, page_id: &str) -> Result<Vec<BlockInstance>, StoreError>;

    /// Replace the whole stored collection of `page_id`
    fn replace(&mut self, page_id: &str, blocks: &[BlockInstance]) -> Result<(), StoreError>;
}

/// In-memory page store
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: HashMap<String, Vec<BlockInstance>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every write with [`StoreError::Rejected`]
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn page(&self, page_id: &str) -> Option<&[BlockInstance]> {
        self.pages.get(page_id).map(Vec::as_slice)
    }
}

impl PageStore for MemoryStore {
    fn load(&self, page_id: &str) -> Result<Vec<BlockInstance>, StoreError> {
        self.pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(page_id.to_string()))
    }

    fn replace(&mut self, page_id: &str, blocks: &[BlockInstance]) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Rejected("store is read-only".to_string()));
        }
        self.pages.insert(page_id.to_string(), blocks.to_vec());
        Ok(())
    }
}

/// Directory of `<page_id>.json` files
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn page_path(&self, page_id: &str) -> Result<PathBuf, StoreError> {
        let valid = !page_id.is_empty()
            && page_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(StoreError::InvalidPageId(page_id.to_string()));
        }

        Ok(self.dir.join(format!("{}.json", page_id)))
    }

    /// Ids of every stored page, sorted
    pub fn page_ids(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl PageStore for JsonFileStore {
    fn load(&self, page_id: &str) -> Result<Vec<BlockInstance>, StoreError> {
        let path = self.page_path(page_id)?;
        if !path.exists() {
            return Err(StoreError::NotFound(page_id.to_string()));
        }

        let source = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&source)?)
    }

    fn replace(&mut self, page_id: &str, blocks: &[BlockInstance]) -> Result<(), StoreError> {
        let path = self.page_path(page_id)?;
        fs::create_dir_all(&self.dir)?;

        // Write-then-rename so a failed write never truncates the page
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(blocks)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Editable page
#[derive(Debug, Clone)]
pub struct PageDocument {
    page_id: String,
    blocks: BlockCollection,
    dirty: bool,
    last_saved: Option<DateTime<Utc>>,
}

impl PageDocument {
    /// New empty, unsaved page
    pub fn new(page_id: impl Into<String>) -> Self {
        Self::from_collection(page_id, BlockCollection::new())
    }

    pub fn from_collection(page_id: impl Into<String>, blocks: BlockCollection) -> Self {
        Self {
            page_id: page_id.into(),
            blocks,
            dirty: false,
            last_saved: None,
        }
    }

    pub fn load(store: &dyn PageStore, page_id: &str) -> Result<Self, StoreError> {
        let blocks = BlockCollection::from_blocks(store.load(page_id)?);
        info!(page_id, widgets = blocks.len(), "Loaded page");
        Ok(Self::from_collection(page_id, blocks))
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub fn blocks(&self) -> &BlockCollection {
        &self.blocks
    }

    /// Mutable access; marks the document dirty
    pub fn blocks_mut(&mut self) -> &mut BlockCollection {
        self.dirty = true;
        &mut self.blocks
    }

    pub fn replace_blocks(&mut self, blocks: BlockCollection) {
        self.blocks = blocks;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Persist the whole collection. On failure nothing in memory changes.
    pub fn save(&mut self, store: &mut dyn PageStore) -> Result<(), StoreError> {
        store.replace(&self.page_id, self.blocks.blocks())?;
        self.dirty = false;
        self.last_saved = Some(Utc::now());
        info!(page_id = %self.page_id, widgets = self.blocks.len(), "Saved page");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_common::ConfigMap;

    fn blocks() -> Vec<BlockInstance> {
        vec![BlockInstance::new("a", "text", ConfigMap::new())]
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        store.replace("home", &blocks()).unwrap();
        assert_eq!(store.load("home").unwrap(), blocks());
        assert!(matches!(store.load("other"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_save_clears_dirty() {
        let mut store = MemoryStore::new();
        let mut doc = PageDocument::from_collection("home", BlockCollection::from_blocks(blocks()));
        doc.blocks_mut().toggle_enabled("a");
        assert!(doc.is_dirty());

        doc.save(&mut store).unwrap();
        assert!(!doc.is_dirty());
        assert!(doc.last_saved().is_some());
        assert!(!store.page("home").unwrap()[0].enabled);
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let mut store = MemoryStore::new();
        store.set_read_only(true);

        let mut doc = PageDocument::new("home");
        doc.replace_blocks(BlockCollection::from_blocks(blocks()));

        assert!(matches!(doc.save(&mut store), Err(StoreError::Rejected(_))));
        assert!(doc.is_dirty());
        assert!(doc.last_saved().is_none());
        assert_eq!(doc.blocks().len(), 1);
    }

    #[test]
    fn test_file_store_rejects_traversal() {
        let store = JsonFileStore::new("/tmp/pages");
        assert!(matches!(
            store.page_path("../etc/passwd"),
            Err(StoreError::InvalidPageId(_))
        ));
        assert!(store.page_path("landing_v2").is_ok());
    }
}
