//! Core data models for the import pipeline.
//!
//! These types represent the entities that flow from the remote API into
//! SQLite. Questions and answers are decoded from API pages; `QuestionTag`
//! is derived from the deduplicated question set.

use chrono::{DateTime, Utc};

/// A question decoded from a questions page.
#[derive(Debug, Clone)]
pub struct Question {
    pub question_id: i64,
    pub title: String,
    pub creation_date: DateTime<Utc>,
    /// Reference to the accepted [`Answer`], when one exists. Only questions
    /// with an accepted answer drive the answer-fetch phase.
    pub accepted_answer_id: Option<i64>,
    /// Tags in the order the API returned them.
    pub tags: Vec<String>,
}

impl Question {
    /// Tags encoded as a JSON array for single-column storage.
    pub fn tags_json(&self) -> String {
        serde_json::to_string(&self.tags).unwrap_or_else(|_| "[]".to_string())
    }
}

/// An answer decoded from an answers page.
///
/// `question_id` is a logical reference only; the store does not enforce a
/// foreign key.
#[derive(Debug, Clone)]
pub struct Answer {
    pub answer_id: i64,
    pub question_id: i64,
    pub creation_date: DateTime<Utc>,
    pub score: i64,
    pub is_accepted: bool,
    /// The API omits answer bodies unless a filter requests them.
    pub body: Option<String>,
}

/// One (question, tag) pair, regenerated on every import from the
/// deduplicated question set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTag {
    pub question_id: i64,
    pub tag: String,
}
