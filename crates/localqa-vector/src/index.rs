//! Chunk storage and similarity search.

use std::cmp::Ordering;
use std::sync::RwLock;

use anyhow::Result;
use tracing::debug;

use localqa_core::types::{Chunk, DocumentId};

use crate::similarity::cosine_similarity;

/// Stores chunk/vector pairs per document and answers top-K similarity
/// queries with a full scan.
///
/// The scan is deliberate: chunk counts stay small for a personal
/// knowledge base. Any indexing optimization must keep the same
/// contract: tie-break by insertion order, zero score for zero-norm
/// vectors, per-document atomic replacement.
///
/// Writers take the lock exclusively, so a search never observes a mix
/// of old and new chunks for one document. Chunk order in the backing
/// Vec is insertion order; the stable sort in `search` preserves it for
/// equal scores.
#[derive(Default)]
pub struct EmbeddingIndex {
    chunks: RwLock<Vec<Chunk>>,
}

impl EmbeddingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every stored chunk for `document_id` with `chunks`,
    /// atomically.
    pub fn upsert(&self, document_id: &DocumentId, chunks: Vec<Chunk>) -> Result<()> {
        let mut stored = self
            .chunks
            .write()
            .map_err(|_| anyhow::anyhow!("index lock poisoned"))?;
        stored.retain(|c| &c.document_id != document_id);
        let added = chunks.len();
        stored.extend(chunks);
        debug!(doc = %document_id, chunks = added, "replaced document chunks");
        Ok(())
    }

    /// Delete all chunks for the document. Removing an absent document
    /// is a no-op, not an error.
    pub fn remove(&self, document_id: &DocumentId) -> Result<()> {
        let mut stored = self
            .chunks
            .write()
            .map_err(|_| anyhow::anyhow!("index lock poisoned"))?;
        stored.retain(|c| &c.document_id != document_id);
        Ok(())
    }

    /// Rank all stored chunks against `query` by cosine similarity,
    /// descending, and return at most `top_k`. Ties keep insertion
    /// order.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<(Chunk, f32)>> {
        let stored = self
            .chunks
            .read()
            .map_err(|_| anyhow::anyhow!("index lock poisoned"))?;
        let mut scored: Vec<(&Chunk, f32)> = stored
            .iter()
            .map(|c| (c, cosine_similarity(query, &c.embedding)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(c, score)| (c.clone(), score))
            .collect())
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_count() == 0
    }
}
