//! localqa-answer
//!
//! Question intent classification, template-based answer synthesis and
//! deterministic follow-up generation. Everything here is pure CPU work:
//! no model calls, no suspension points.

pub mod followup;
pub mod intent;
pub mod synthesize;

pub use followup::{generate_follow_ups, RecentQuestions, MAX_FOLLOW_UPS};
pub use intent::{classify, QuestionIntent};
pub use synthesize::synthesize;
