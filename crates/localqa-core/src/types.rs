//! Domain types shared by the retrieval and answer pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable document identity assigned by the owning store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document as held by the storage collaborator.
///
/// The pipeline only ever reads `id`, `title` and `content`; the
/// remaining fields belong to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub summary: Option<String>,
}

/// A bounded slice of a document's text, embedded independently.
///
/// `index` is the ordinal within the parent document. Re-ingesting a
/// document replaces its whole chunk set; partial sets are never visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub document_id: DocumentId,
    pub index: usize,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// Indicates which retrieval pass produced a candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CandidateOrigin {
    Semantic,
    Keyword,
}

/// A ranked passage assembled for a single query turn.
///
/// `score` is pass-specific but higher is always better; values land in
/// `[0, 1]` in practice without being hard-clamped. Candidates are never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub score: f32,
    pub origin: CandidateOrigin,
    pub document_id: DocumentId,
    pub document_title: String,
}

/// One item of a streamed answer.
///
/// `NeedsExternalSearch` and `Cancelled` are terminal: no further events
/// follow either of them. Callers must never render `NeedsExternalSearch`
/// as literal answer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerEvent {
    Fragment(String),
    NeedsExternalSearch,
    Cancelled,
}

/// Sent on the escalation channel when no local answer exists.
///
/// The web-search collaborator owns everything past this signal; the
/// pipeline does not depend on its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationRequest {
    pub query: String,
}
