//! localqa-vector
//!
//! In-memory embedding index with per-document atomic replacement and
//! full-scan cosine search. See `index` for the locking contract any
//! future ANN optimization must preserve.

pub mod index;
pub mod similarity;

pub use index::EmbeddingIndex;
pub use similarity::cosine_similarity;
