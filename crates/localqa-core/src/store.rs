//! In-memory document store and directory corpus loader.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::error::Error;
use crate::traits::DocumentStore;
use crate::types::{Document, DocumentId};

/// Process-local store backing the CLI and tests.
///
/// Last write wins per document id. Listing order is sorted by id so
/// downstream passes are reproducible.
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<BTreeMap<DocumentId, Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, doc: Document) -> Result<()> {
        let mut docs = self
            .docs
            .write()
            .map_err(|_| Error::Storage("store lock poisoned".to_string()))?;
        docs.insert(doc.id.clone(), doc);
        Ok(())
    }

    pub fn remove(&self, id: &DocumentId) -> Result<()> {
        let mut docs = self
            .docs
            .write()
            .map_err(|_| Error::Storage("store lock poisoned".to_string()))?;
        docs.remove(id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.docs.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Document>> {
        let docs = self
            .docs
            .read()
            .map_err(|_| Error::Storage("store lock poisoned".to_string()))?;
        Ok(docs.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &DocumentId) -> Result<Option<Document>> {
        let docs = self
            .docs
            .read()
            .map_err(|_| Error::Storage("store lock poisoned".to_string()))?;
        Ok(docs.get(id).cloned())
    }
}

/// Load every `.txt` file under `root` (recursively) as one document.
///
/// The file stem becomes both id and title. Files are visited in sorted
/// path order so repeated loads produce the same document sequence.
pub fn load_txt_directory(root: &Path) -> Result<Vec<Document>> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("txt"))
        .collect();
    files.sort();

    let mut docs = Vec::with_capacity(files.len());
    let now = Utc::now();
    for path in &files {
        let content = read_file_content(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string());
        docs.push(Document {
            id: DocumentId::new(stem.clone()),
            title: stem,
            content,
            created_at: now,
            updated_at: now,
            summary: None,
        });
    }
    info!(count = docs.len(), root = %root.display(), "loaded corpus directory");
    Ok(docs)
}

fn read_file_content(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(_) => Ok(String::from_utf8_lossy(&fs::read(path)?).to_string()),
    }
}
