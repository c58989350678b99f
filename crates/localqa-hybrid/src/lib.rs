//! localqa-hybrid
//!
//! Merges the semantic (vector) and lexical (keyword) passes into one
//! ranked, de-duplicated candidate list, and drives document ingestion
//! into the embedding index.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::timeout;
use tracing::{debug, warn};

use localqa_core::traits::{DocumentStore, Embedder};
use localqa_core::types::{Candidate, CandidateOrigin, Chunk, Document, DocumentId};
use localqa_text::{extract_keywords, in_score_band, score_sentence, segment, split_sentences};
use localqa_vector::EmbeddingIndex;

/// Tuning knobs for retrieval and ingestion.
///
/// The asymmetric merge floors are intentional: semantic scores cluster
/// around mid-range, so a lower admission bar surfaces more recall, while
/// lexical scores are coarse ratios and need a higher bar to keep
/// near-zero-signal matches out.
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    pub semantic_top_k: usize,
    pub lexical_top_k: usize,
    pub semantic_threshold: f32,
    pub semantic_merge_floor: f32,
    pub lexical_merge_floor: f32,
    pub lexical_weight: f32,
    pub max_candidates: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    /// Bound on the document-list fetch; elapsing degrades to an empty
    /// corpus instead of failing the turn.
    pub list_timeout: Duration,
    /// Bound on query embedding; elapsing skips the semantic pass.
    pub embed_timeout: Duration,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            semantic_top_k: 8,
            lexical_top_k: 8,
            semantic_threshold: 0.2,
            semantic_merge_floor: 0.1,
            lexical_merge_floor: 0.15,
            lexical_weight: 0.8,
            max_candidates: 10,
            chunk_size: 500,
            chunk_overlap: 100,
            list_timeout: Duration::from_secs(10),
            embed_timeout: Duration::from_secs(30),
        }
    }
}

pub struct HybridRetriever {
    store: Arc<dyn DocumentStore>,
    embedder: Arc<dyn Embedder>,
    index: Arc<EmbeddingIndex>,
    config: RetrieverConfig,
}

impl HybridRetriever {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        embedder: Arc<dyn Embedder>,
        index: Arc<EmbeddingIndex>,
    ) -> Self {
        Self::with_config(store, embedder, index, RetrieverConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn DocumentStore>,
        embedder: Arc<dyn Embedder>,
        index: Arc<EmbeddingIndex>,
        config: RetrieverConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            index,
            config,
        }
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Segment, embed and index one document, replacing any prior chunk
    /// set for its id. Returns the number of chunks stored.
    pub async fn ingest_document(&self, doc: &Document) -> Result<usize> {
        let pieces = segment(&doc.content, self.config.chunk_size, self.config.chunk_overlap);
        if pieces.is_empty() {
            self.index.remove(&doc.id)?;
            return Ok(0);
        }
        let embeddings = self.embedder.embed_batch(&pieces).await?;
        let chunks: Vec<Chunk> = pieces
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (text, embedding))| Chunk {
                document_id: doc.id.clone(),
                index: i,
                text,
                embedding,
            })
            .collect();
        let stored = chunks.len();
        self.index.upsert(&doc.id, chunks)?;
        debug!(doc = %doc.id, chunks = stored, "ingested document");
        Ok(stored)
    }

    /// Drop a document's chunks from the index.
    pub fn remove_document(&self, id: &DocumentId) -> Result<()> {
        self.index.remove(id)
    }

    /// Ranked, de-duplicated candidates for `query`, at most
    /// `max_candidates`. An empty result means no local answer exists and
    /// the caller should escalate to external search.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<Candidate>> {
        let docs = self.fetch_corpus().await?;
        let titles: HashMap<DocumentId, String> = docs
            .iter()
            .map(|d| (d.id.clone(), d.title.clone()))
            .collect();

        let semantic = self.semantic_pass(query, &titles).await;
        let lexical = self.lexical_pass(query, &docs);
        Ok(self.merge(semantic, lexical))
    }

    /// Fetch the document list, bounded by `list_timeout`. A timeout
    /// degrades to an empty corpus; a store error is a turn failure.
    async fn fetch_corpus(&self) -> Result<Vec<Document>> {
        match timeout(self.config.list_timeout, self.store.list_all()).await {
            Ok(Ok(docs)) => Ok(docs),
            Ok(Err(e)) => Err(e),
            Err(_) => {
                warn!("document list fetch timed out; treating corpus as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn semantic_pass(
        &self,
        query: &str,
        titles: &HashMap<DocumentId, String>,
    ) -> Vec<Candidate> {
        let query_vec = match timeout(self.config.embed_timeout, self.embedder.embed(query)).await {
            Ok(Ok(v)) => v,
            Ok(Err(e)) => {
                warn!(error = %e, "query embedding failed; semantic pass skipped");
                return Vec::new();
            }
            Err(_) => {
                warn!("query embedding timed out; semantic pass skipped");
                return Vec::new();
            }
        };
        let hits = match self.index.search(&query_vec, self.config.semantic_top_k) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "vector search failed; semantic pass skipped");
                return Vec::new();
            }
        };
        hits.into_iter()
            .filter(|(_, score)| *score >= self.config.semantic_threshold)
            .map(|(chunk, score)| Candidate {
                text: chunk.text,
                score,
                origin: CandidateOrigin::Semantic,
                document_title: titles.get(&chunk.document_id).cloned().unwrap_or_default(),
                document_id: chunk.document_id,
            })
            .collect()
    }

    /// Score every document's sentences against the query keywords.
    /// Keyword hits are discounted by `lexical_weight`: they are noisier
    /// than semantic matches.
    fn lexical_pass(&self, query: &str, docs: &[Document]) -> Vec<Candidate> {
        let keywords = extract_keywords(query);
        if keywords.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for doc in docs {
            for sentence in split_sentences(&doc.content) {
                if !in_score_band(&sentence) {
                    continue;
                }
                let score = score_sentence(&sentence, &keywords);
                if score > 0.0 {
                    hits.push(Candidate {
                        text: sentence,
                        score: score * self.config.lexical_weight,
                        origin: CandidateOrigin::Keyword,
                        document_id: doc.id.clone(),
                        document_title: doc.title.clone(),
                    });
                }
            }
        }
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(self.config.lexical_top_k);
        hits
    }

    /// Merge on a normalized text key. Semantic results enter first and
    /// always win a text collision; both passes have a score floor below
    /// which a candidate is not worth surfacing.
    fn merge(&self, semantic: Vec<Candidate>, lexical: Vec<Candidate>) -> Vec<Candidate> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut merged = Vec::new();
        for c in semantic {
            if c.score <= self.config.semantic_merge_floor {
                continue;
            }
            if seen.insert(dedup_key(&c.text)) {
                merged.push(c);
            }
        }
        for c in lexical {
            if c.score <= self.config.lexical_merge_floor {
                continue;
            }
            if seen.insert(dedup_key(&c.text)) {
                merged.push(c);
            }
        }
        merged.truncate(self.config.max_candidates);
        merged
    }
}

/// Lowercased, whitespace-collapsed text used to spot the same passage
/// surfacing from both passes.
fn dedup_key(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
