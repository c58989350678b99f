use crate::types::{Document, DocumentId};
use async_trait::async_trait;

/// Produces fixed-length embedding vectors for text.
///
/// Implementations must be deterministic for identical input and must
/// keep `dim()` constant for the lifetime of any index built from them.
#[async_trait]
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;

    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;

    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }
}

/// Read-only view of the document collection.
///
/// The pipeline never mutates documents through this trait; ingestion
/// and deletion are driven by whoever owns the store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_all(&self) -> anyhow::Result<Vec<Document>>;
    async fn get_by_id(&self, id: &DocumentId) -> anyhow::Result<Option<Document>>;
}
